//! Auto-thread configuration - channels where every new post gets a thread

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Thread auto-archive duration accepted by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum AutoArchiveDuration {
    OneHour,
    OneDay,
    ThreeDays,
    OneWeek,
}

impl AutoArchiveDuration {
    /// All durations, shortest first
    const ALL: [AutoArchiveDuration; 4] =
        [Self::OneHour, Self::OneDay, Self::ThreeDays, Self::OneWeek];

    /// Duration in minutes
    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            Self::OneHour => 60,
            Self::OneDay => 1440,
            Self::ThreeDays => 4320,
            Self::OneWeek => 10080,
        }
    }

    /// Short label used by configuration commands
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
            Self::OneWeek => "7d",
        }
    }

    /// Parse a short label (`1h`, `1d`, `3d`, `7d`)
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label.trim())
    }

    /// Map a minute count back to a duration
    #[must_use]
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.minutes() == minutes)
    }
}

impl TryFrom<u32> for AutoArchiveDuration {
    type Error = String;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes).ok_or_else(|| format!("unsupported duration: {minutes}"))
    }
}

impl From<AutoArchiveDuration> for u32 {
    fn from(duration: AutoArchiveDuration) -> Self {
        duration.minutes()
    }
}

impl std::fmt::Display for AutoArchiveDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Auto-thread record, one per channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoThreadConfig {
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub duration: AutoArchiveDuration,
}

impl AutoThreadConfig {
    /// Create a new AutoThreadConfig
    pub fn new(guild_id: Snowflake, channel_id: Snowflake, duration: AutoArchiveDuration) -> Self {
        Self {
            guild_id,
            channel_id,
            duration,
        }
    }
}
