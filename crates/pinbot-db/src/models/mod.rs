//! Database models with SQLx `FromRow` derives

mod auto_thread;
mod preference;

pub use auto_thread::AutoThreadModel;
pub use preference::PreferenceModel;
