//! Port traits implemented by infrastructure crates

mod platform;
mod repositories;

pub use platform::ChatPlatform;
pub use repositories::{AutoThreadRepository, PreferenceRepository, RepoResult};
