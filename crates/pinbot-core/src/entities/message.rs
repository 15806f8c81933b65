//! Message snapshot - a message as fetched from the platform for one event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::ReactionSummary;
use crate::value_objects::{MessageFlags, Snowflake};

/// Message type
///
/// Only regular posts and replies may be acted upon; everything else
/// (boost announcements, join notices, pin notices) is a system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "u8", into = "u8")]
pub enum MessageKind {
    #[default]
    Default,
    Reply,
    System(u8),
}

impl MessageKind {
    /// Check if this is a user-authored post or reply
    #[inline]
    #[must_use]
    pub fn is_user_content(self) -> bool {
        matches!(self, Self::Default | Self::Reply)
    }
}

impl From<u8> for MessageKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Default,
            19 => Self::Reply,
            other => Self::System(other),
        }
    }
}

impl From<MessageKind> for u8 {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Default => 0,
            MessageKind::Reply => 19,
            MessageKind::System(code) => code,
        }
    }
}

/// Author of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl MessageAuthor {
    /// Name shown in the guild, falling back to the account name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Message snapshot
///
/// Fetched fresh on every event and never cached: reaction counts move
/// between events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub author: MessageAuthor,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub flags: MessageFlags,
    #[serde(default)]
    pub attachment_count: u32,
    #[serde(default)]
    pub embed_count: u32,
    pub created_at: DateTime<Utc>,
    pub jump_url: String,
    #[serde(default)]
    pub reactions: Vec<ReactionSummary>,
}

impl MessageSnapshot {
    /// Live aggregate for an emoji, if anyone holds it
    pub fn reaction(&self, emoji: &str) -> Option<&ReactionSummary> {
        self.reactions.iter().find(|r| r.is_emoji(emoji))
    }

    /// Check whether the platform flags a thread started from this message
    #[inline]
    pub fn has_thread(&self) -> bool {
        self.flags.has_thread()
    }

    /// Get the content truncated to at most `max_chars` characters
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((end, _)) => &self.content[..end],
            None => &self.content,
        }
    }
}
