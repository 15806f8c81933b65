//! Chat platform port - every call the engine makes against the hosting platform
//!
//! All calls suspend only at this I/O boundary. Implementations report a
//! deleted or unknown target as [`PlatformError::NotFound`].
//!
//! [`PlatformError::NotFound`]: crate::error::PlatformError::NotFound

use async_trait::async_trait;

use crate::entities::{ChannelInfo, GuildInfo, MessageSnapshot, NewThread, OutgoingMessage, ThreadInfo};
use crate::error::PlatformResult;
use crate::value_objects::Snowflake;

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    // === Reads ===

    /// Fetch a message with its live reaction aggregates
    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> PlatformResult<MessageSnapshot>;

    /// Fetch channel metadata
    async fn fetch_channel(&self, channel_id: Snowflake) -> PlatformResult<ChannelInfo>;

    /// Fetch guild metadata, including its service tier
    async fn fetch_guild(&self, guild_id: Snowflake) -> PlatformResult<GuildInfo>;

    /// List active and archived threads under a channel
    async fn list_threads(&self, channel_id: Snowflake) -> PlatformResult<Vec<ThreadInfo>>;

    /// Count messages in a thread, stopping at `limit`
    async fn count_thread_messages(&self, thread_id: Snowflake, limit: u32) -> PlatformResult<u32>;

    // === Pins ===

    /// Pin a message in its channel
    async fn pin_message(&self, channel_id: Snowflake, message_id: Snowflake) -> PlatformResult<()>;

    // === Reactions ===

    /// Add a reaction as the bot
    async fn add_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()>;

    /// Remove one user's reaction
    async fn remove_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
        user_id: Snowflake,
    ) -> PlatformResult<()>;

    /// Remove every reaction of one emoji
    async fn clear_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()>;

    // === Threads ===

    /// Start a thread from a message
    async fn create_thread(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        thread: &NewThread,
    ) -> PlatformResult<ThreadInfo>;

    /// Archive or unarchive a thread
    async fn set_thread_archived(&self, thread_id: Snowflake, archived: bool) -> PlatformResult<()>;

    /// Delete a thread
    async fn delete_thread(&self, thread_id: Snowflake) -> PlatformResult<()>;

    // === Messages ===

    /// Send a private message to a user
    async fn send_direct_message(
        &self,
        user_id: Snowflake,
        message: &OutgoingMessage,
    ) -> PlatformResult<()>;
}
