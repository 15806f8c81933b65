//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in pinbot-core.

mod auto_thread;
mod error;
mod preference;

pub use auto_thread::PgAutoThreadRepository;
pub use preference::PgPreferenceRepository;
