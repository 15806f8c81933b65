//! Entity <-> model mappers

mod auto_thread;
mod preference;

pub use preference::PreferenceInsert;
