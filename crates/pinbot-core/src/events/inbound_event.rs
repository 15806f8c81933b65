//! Inbound platform events - the three dispatches the engine handles
//!
//! Events are transient: decoded once, handled once, never persisted.

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Every inbound dispatch the engine subscribes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    ReactionAdd(ReactionEvent),
    MessageDelete(MessageDeletedEvent),
    MessageCreate(MessageCreatedEvent),
}

impl InboundEvent {
    pub const REACTION_ADD: &'static str = "MESSAGE_REACTION_ADD";
    pub const MESSAGE_DELETE: &'static str = "MESSAGE_DELETE";
    pub const MESSAGE_CREATE: &'static str = "MESSAGE_CREATE";

    /// Decode a dispatch by its type name
    ///
    /// Returns `Ok(None)` for dispatch types the engine does not handle.
    pub fn decode(event_type: &str, data: serde_json::Value) -> Result<Option<Self>, serde_json::Error> {
        let event = match event_type {
            Self::REACTION_ADD => Self::ReactionAdd(serde_json::from_value(data)?),
            Self::MESSAGE_DELETE => Self::MessageDelete(serde_json::from_value(data)?),
            Self::MESSAGE_CREATE => Self::MessageCreate(serde_json::from_value(data)?),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionAdd(_) => Self::REACTION_ADD,
            Self::MessageDelete(_) => Self::MESSAGE_DELETE,
            Self::MessageCreate(_) => Self::MESSAGE_CREATE,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

/// Emoji as sent in reaction dispatches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEmoji {
    #[serde(default)]
    pub id: Option<Snowflake>,
    /// Unicode emoji, or the custom emoji's name
    #[serde(default)]
    pub name: Option<String>,
}

/// User reference inside a dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUser {
    pub id: Snowflake,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

/// Guild member reference inside a dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMember {
    pub user: EventUser,
    #[serde(default)]
    pub nick: Option<String>,
}

/// MESSAGE_REACTION_ADD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// Present only for reactions inside a guild
    #[serde(default)]
    pub member: Option<EventMember>,
    pub emoji: EventEmoji,
}

impl ReactionEvent {
    /// Emoji name, if the platform sent one
    pub fn emoji_name(&self) -> Option<&str> {
        self.emoji.name.as_deref()
    }

    /// Check if the reacting user is a bot account
    pub fn actor_is_bot(&self) -> bool {
        self.member.as_ref().is_some_and(|m| m.user.bot)
    }

    /// Check if the reacting user was resolved as a guild member
    pub fn actor_is_member(&self) -> bool {
        self.member.is_some()
    }
}

/// MESSAGE_DELETE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDeletedEvent {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
}

/// MESSAGE_CREATE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCreatedEvent {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub author: EventUser,
}
