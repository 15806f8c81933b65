//! Data transfer objects
//!
//! Command inputs (validated with `validator`) and the outcome types the
//! engine reports back to callers and tests.

mod requests;
mod responses;

pub use requests::SetLimitRequest;
pub use responses::{
    AutoThreadEntry, CleanupOutcome, CreateOutcome, PreferenceChange, PreferenceEntry,
    ReactionOutcome, ThreadSettings, GUILD_SCOPE_LABEL,
};
