//! Test fixtures and data generators
//!
//! Provides reusable ids, messages and events for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{TimeZone, Utc};
use pinbot_core::entities::{
    ChannelInfo, ChannelType, GuildInfo, MessageAuthor, MessageKind, MessageSnapshot,
};
use pinbot_core::{
    EventEmoji, EventMember, EventUser, MessageCreatedEvent, MessageDeletedEvent, MessageFlags,
    ReactionEvent, Snowflake,
};

pub const GUILD: Snowflake = Snowflake::new(10);
pub const CHANNEL: Snowflake = Snowflake::new(100);
pub const OTHER_CHANNEL: Snowflake = Snowflake::new(200);
pub const BOT: Snowflake = Snowflake::new(999);
pub const AUTHOR: Snowflake = Snowflake::new(5);
pub const ADMIN: Snowflake = Snowflake::new(1);

/// Counter for unique message ids
static COUNTER: AtomicI64 = AtomicI64::new(10_000);

/// Get a unique message id
pub fn unique_message_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Reactor ids `1..=n`, offset to stay clear of the fixture ids above
pub fn users(n: i64) -> Vec<Snowflake> {
    (1..=n).map(|i| Snowflake::new(500 + i)).collect()
}

pub fn guild(premium_tier: u8) -> GuildInfo {
    GuildInfo::new(GUILD, "Rust *Fans*", premium_tier)
}

pub fn text_channel(id: Snowflake, name: &str) -> ChannelInfo {
    ChannelInfo::text(id, GUILD, name)
}

pub fn thread_channel(id: Snowflake, parent: Snowflake) -> ChannelInfo {
    ChannelInfo {
        id,
        guild_id: Some(GUILD),
        name: Some("Thread by author".to_string()),
        channel_type: ChannelType::PublicThread,
        parent_id: Some(parent),
    }
}

pub fn dm_channel(id: Snowflake) -> ChannelInfo {
    ChannelInfo {
        id,
        guild_id: None,
        name: None,
        channel_type: ChannelType::Dm,
        parent_id: None,
    }
}

/// A regular post by [`AUTHOR`] with no reactions
pub fn text_message(id: Snowflake, channel_id: Snowflake) -> MessageSnapshot {
    MessageSnapshot {
        id,
        channel_id,
        guild_id: Some(GUILD),
        author: MessageAuthor {
            id: AUTHOR,
            name: "author".to_string(),
            display_name: Some("The Author".to_string()),
            bot: false,
        },
        kind: MessageKind::Default,
        content: "Ferris says hi".to_string(),
        pinned: false,
        flags: MessageFlags::empty(),
        attachment_count: 0,
        embed_count: 0,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        jump_url: format!("https://discord.com/channels/{GUILD}/{channel_id}/{id}"),
        reactions: Vec::new(),
    }
}

/// Reaction-add dispatch from a guild member
pub fn reaction_event(
    channel_id: Snowflake,
    message_id: Snowflake,
    emoji: &str,
    user_id: Snowflake,
) -> ReactionEvent {
    ReactionEvent {
        user_id,
        channel_id,
        message_id,
        guild_id: Some(GUILD),
        member: Some(EventMember {
            user: EventUser {
                id: user_id,
                username: Some(format!("user{user_id}")),
                bot: user_id == BOT,
            },
            nick: None,
        }),
        emoji: EventEmoji {
            id: None,
            name: Some(emoji.to_string()),
        },
    }
}

pub fn message_deleted(channel_id: Snowflake, message_id: Snowflake) -> MessageDeletedEvent {
    MessageDeletedEvent {
        id: message_id,
        channel_id,
        guild_id: Some(GUILD),
    }
}

pub fn message_created(
    channel_id: Snowflake,
    message_id: Snowflake,
    author_bot: bool,
) -> MessageCreatedEvent {
    MessageCreatedEvent {
        id: message_id,
        channel_id,
        guild_id: Some(GUILD),
        author: EventUser {
            id: AUTHOR,
            username: Some("author".to_string()),
            bot: author_bot,
        },
    }
}
