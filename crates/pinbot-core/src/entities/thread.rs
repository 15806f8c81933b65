//! Thread info - a sub-conversation anchored to a root message

use serde::{Deserialize, Serialize};

use crate::entities::AutoArchiveDuration;
use crate::value_objects::Snowflake;

/// Thread as listed by the platform
///
/// A thread started from a message carries that message's id as its own id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadInfo {
    pub id: Snowflake,
    pub parent_id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

impl ThreadInfo {
    /// Check whether this thread was started from the given message
    #[inline]
    pub fn is_anchored_to(&self, message_id: Snowflake) -> bool {
        self.id == message_id
    }
}

/// Request to start a thread from a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewThread {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_archive_duration: Option<AutoArchiveDuration>,
}

impl NewThread {
    /// Thread with the platform's default archive duration
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auto_archive_duration: None,
        }
    }

    /// Set the auto-archive duration
    #[must_use]
    pub fn archive_after(mut self, duration: AutoArchiveDuration) -> Self {
        self.auto_archive_duration = Some(duration);
        self
    }
}
