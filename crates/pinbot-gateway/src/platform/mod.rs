//! Chat platform client

mod models;
mod rest;

pub use rest::{error_for_status, RestPlatform};
