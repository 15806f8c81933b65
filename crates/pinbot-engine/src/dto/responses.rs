//! Outcome DTOs

use pinbot_core::entities::AutoArchiveDuration;
use pinbot_core::Snowflake;
use serde::Serialize;

use crate::services::IgnoreReason;

/// Scope label used for guild-wide records in listings
pub const GUILD_SCOPE_LABEL: &str = "(server)";

// ============================================================================
// Event outcomes
// ============================================================================

/// What handling one reaction-add event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    Ignored(IgnoreReason),
    /// Removed a user's 📍 and told them to use 📌
    WrongMarkerNotice,
    /// Feature disabled or unconfigured for this channel
    NotApplicable,
    /// Threshold not yet reached
    Waiting { reactors: u32, limit: u32 },
    Pinned { reactors: Vec<Snowflake> },
    /// Message already pinned; pin votes cleared
    AlreadyPinned,
    /// No 📌 reactions left on the message
    NoPinVotes,
    BookmarkDelivered,
    ThreadCreated { thread_id: Snowflake },
    ThreadReopened { thread_id: Snowflake },
    /// Thread already open; thread votes cleared
    ThreadAlreadyOpen,
    /// A thread is flagged on the message but not listed in the channel
    ThreadStateUnknown,
}

/// What handling one message-create event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Skipped,
    ThreadCreated {
        thread_id: Snowflake,
        duration: AutoArchiveDuration,
    },
}

/// What handling one message-delete event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    NoThread,
    Archived(Snowflake),
    Deleted(Snowflake),
}

// ============================================================================
// Command responses
// ============================================================================

/// Result of setting a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreferenceChange {
    /// Limit 0 stored; the feature is off at this scope
    Disabled,
    Updated { limit: u32 },
}

/// One row of a preference listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceEntry {
    /// `(server)`, a channel name, or a raw channel id
    pub scope: String,
    pub channel_id: Option<Snowflake>,
    pub value: u32,
}

/// Thread limits as they apply to one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThreadSettings {
    pub guild_limit: Option<u32>,
    pub channel_limit: Option<u32>,
}

impl ThreadSettings {
    /// Guild limit for display, "disabled" when unset or 0
    pub fn guild_label(&self) -> String {
        match self.guild_limit {
            None | Some(0) => "disabled".to_string(),
            Some(limit) => limit.to_string(),
        }
    }

    /// Limit that actually applies in the channel
    pub fn effective(&self) -> u32 {
        self.channel_limit.or(self.guild_limit).unwrap_or(0)
    }
}

/// One auto-thread channel in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoThreadEntry {
    pub channel_id: Snowflake,
    pub channel_name: String,
    pub duration: AutoArchiveDuration,
}
