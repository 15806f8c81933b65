//! Wire models for the platform's REST API
//!
//! Only the fields the engine reads are declared; everything else in a
//! response is ignored.

use chrono::{DateTime, Utc};
use pinbot_core::entities::{MessageAuthor, MessageKind, MessageSnapshot, ReactionSummary, ThreadInfo};
use pinbot_core::{MessageFlags, Snowflake};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMember {
    #[serde(default)]
    pub nick: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEmoji {
    #[serde(default)]
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ApiEmoji {
    /// Unicode emoji name; custom emoji are never markers
    pub fn unicode_name(&self) -> Option<&str> {
        match self.id {
            Some(_) => None,
            None => self.name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiReaction {
    pub count: u32,
    pub emoji: ApiEmoji,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub author: ApiUser,
    #[serde(default)]
    pub member: Option<ApiMember>,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub flags: MessageFlags,
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
    #[serde(default)]
    pub embeds: Vec<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub reactions: Vec<ApiReaction>,
}

impl ApiMessage {
    /// Build the engine's view of the message
    pub fn into_snapshot(
        self,
        guild_id: Option<Snowflake>,
        jump_url: String,
        reactions: Vec<ReactionSummary>,
    ) -> MessageSnapshot {
        let display_name = self
            .member
            .and_then(|m| m.nick)
            .or(self.author.global_name);

        MessageSnapshot {
            id: self.id,
            channel_id: self.channel_id,
            guild_id: self.guild_id.or(guild_id),
            author: MessageAuthor {
                id: self.author.id,
                name: self.author.username,
                display_name,
                bot: self.author.bot,
            },
            kind: self.kind,
            content: self.content,
            pinned: self.pinned,
            flags: self.flags,
            attachment_count: self.attachments.len() as u32,
            embed_count: self.embeds.len() as u32,
            created_at: self.timestamp,
            jump_url,
            reactions,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiThreadMetadata {
    #[serde(default)]
    pub archived: bool,
    /// ISO8601 time of the last archive change, the archived-listing cursor
    #[serde(default)]
    pub archive_timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiThread {
    pub id: Snowflake,
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub thread_metadata: Option<ApiThreadMetadata>,
}

impl ApiThread {
    pub fn into_info(self, fallback_parent: Snowflake) -> ThreadInfo {
        ThreadInfo {
            id: self.id,
            parent_id: self.parent_id.unwrap_or(fallback_parent),
            name: self.name.unwrap_or_default(),
            archived: self.thread_metadata.is_some_and(|m| m.archived),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiThreadList {
    #[serde(default)]
    pub threads: Vec<ApiThread>,
    #[serde(default)]
    pub has_more: bool,
}

impl ApiThreadList {
    /// `before` cursor for the next archived page, `None` on the last page
    pub fn next_before(&self) -> Option<String> {
        if !self.has_more {
            return None;
        }
        self.threads
            .last()
            .and_then(|t| t.thread_metadata.as_ref())
            .and_then(|m| m.archive_timestamp.clone())
    }
}

/// Any object where only the id matters (DM channel, sent message)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiId {
    pub id: Snowflake,
}

/// Body of a rate-limit response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRateLimit {
    /// Seconds
    pub retry_after: f64,
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateDm {
    pub recipient_id: Snowflake,
}

#[derive(Debug, Serialize)]
pub struct ArchiveThread {
    pub archived: bool,
}
