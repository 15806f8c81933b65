//! Channel info - a text channel, DM, or thread as reported by the platform

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Channel type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "u8", into = "u8")]
pub enum ChannelType {
    /// Guild text channel
    #[default]
    GuildText,
    /// Direct message between users
    Dm,
    /// Group direct message
    GroupDm,
    /// Announcement channel
    GuildNews,
    /// Thread inside an announcement channel
    NewsThread,
    /// Public thread
    PublicThread,
    /// Private thread
    PrivateThread,
    /// Anything else (voice, category, forum, ...)
    Other(u8),
}

impl From<u8> for ChannelType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Dm,
            3 => Self::GroupDm,
            5 => Self::GuildNews,
            10 => Self::NewsThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            other => Self::Other(other),
        }
    }
}

impl From<ChannelType> for u8 {
    fn from(ct: ChannelType) -> Self {
        match ct {
            ChannelType::GuildText => 0,
            ChannelType::Dm => 1,
            ChannelType::GroupDm => 3,
            ChannelType::GuildNews => 5,
            ChannelType::NewsThread => 10,
            ChannelType::PublicThread => 11,
            ChannelType::PrivateThread => 12,
            ChannelType::Other(code) => code,
        }
    }
}

impl ChannelType {
    /// Check if this is any kind of thread
    #[inline]
    #[must_use]
    pub fn is_thread(self) -> bool {
        matches!(
            self,
            Self::NewsThread | Self::PublicThread | Self::PrivateThread
        )
    }

    /// Check if this is a private (non-guild) channel
    #[inline]
    #[must_use]
    pub fn is_private(self) -> bool {
        matches!(self, Self::Dm | Self::GroupDm)
    }
}

/// Channel info
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
}

impl ChannelInfo {
    /// Create a guild text channel
    #[must_use]
    pub fn text(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id: Some(guild_id),
            name: Some(name.into()),
            channel_type: ChannelType::GuildText,
            parent_id: None,
        }
    }

    /// Check if messages in this channel live inside a thread
    #[inline]
    #[must_use]
    pub fn is_thread(&self) -> bool {
        self.channel_type.is_thread()
    }

    /// Get display name (channel name or raw id)
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}
