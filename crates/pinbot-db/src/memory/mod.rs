//! In-memory repositories
//!
//! Process-local stores backed by `DashMap`, used when no database is
//! configured and by tests.

mod auto_thread;
mod preference;

pub use auto_thread::MemoryAutoThreadRepository;
pub use preference::MemoryPreferenceRepository;
