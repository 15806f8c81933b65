//! Pub/Sub channel definitions.

use pinbot_core::Snowflake;

/// Channel prefix for events scoped to one guild
const GUILD_CHANNEL_PREFIX: &str = "guild:";
/// Channel carrying events for every guild
const BROADCAST_CHANNEL: &str = "broadcast";

/// Pub/Sub channel the bot listens on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventChannel {
    /// Events for a single guild
    Guild(Snowflake),
    /// Events for all guilds
    Broadcast,
    /// Any other channel name
    Custom(String),
}

impl EventChannel {
    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Guild(id) => format!("{GUILD_CHANNEL_PREFIX}{id}"),
            Self::Broadcast => BROADCAST_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to an `EventChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == BROADCAST_CHANNEL {
            return Self::Broadcast;
        }

        if let Some(id) = name
            .strip_prefix(GUILD_CHANNEL_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
        {
            return Self::Guild(Snowflake::from(id));
        }

        Self::Custom(name.to_string())
    }
}

impl std::fmt::Display for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
