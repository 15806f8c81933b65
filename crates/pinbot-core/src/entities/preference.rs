//! Channel preference entity - per-channel or guild-wide automation settings

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Which automation a preference controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceKind {
    /// Pin a message once enough users react with the pin marker
    Pin,
    /// Deliver a private copy of a message to whoever reacts with the bookmark marker
    Bookmark,
    /// Open (or reopen) a thread once enough users react with the thread marker
    Thread,
}

impl PreferenceKind {
    /// All kinds, in display order
    const ALL: [PreferenceKind; 3] = [Self::Pin, Self::Bookmark, Self::Thread];

    /// Stable storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Bookmark => "bookmark",
            Self::Thread => "thread",
        }
    }

    /// Parse a storage name
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pin" => Some(Self::Pin),
            "bookmark" => Some(Self::Bookmark),
            "thread" => Some(Self::Thread),
            _ => None,
        }
    }

    /// Whether the stored value is a reaction limit (as opposed to an on/off switch)
    #[inline]
    #[must_use]
    pub const fn is_limit(self) -> bool {
        matches!(self, Self::Pin | Self::Thread)
    }
}

impl std::fmt::Display for PreferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored preference record
///
/// `channel_id == None` is the guild-wide default. Records are unique per
/// `(guild_id, channel_id, kind)`. For [`PreferenceKind::Bookmark`] the value
/// is 1 when enabled and 0 when disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPreference {
    pub guild_id: Snowflake,
    pub channel_id: Option<Snowflake>,
    pub kind: PreferenceKind,
    pub value: u32,
}

impl ChannelPreference {
    /// Create a reaction-limit preference (pin or thread)
    pub fn limit(
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
        limit: u32,
    ) -> Self {
        Self {
            guild_id,
            channel_id,
            kind,
            value: limit,
        }
    }

    /// Create a bookmark on/off preference
    pub fn bookmark(guild_id: Snowflake, channel_id: Option<Snowflake>, enabled: bool) -> Self {
        Self {
            guild_id,
            channel_id,
            kind: PreferenceKind::Bookmark,
            value: u32::from(enabled),
        }
    }

    /// Check if this is the guild-wide default record
    #[inline]
    pub fn is_guild_default(&self) -> bool {
        self.channel_id.is_none()
    }

    /// Whether the feature is switched on at this scope
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.value > 0
    }
}
