//! # pinbot-gateway
//!
//! Event gateway: receives platform events from Redis pub/sub and runs the
//! automation engine against the platform's REST API.

pub mod platform;
pub mod server;

pub use platform::RestPlatform;
pub use server::run;
