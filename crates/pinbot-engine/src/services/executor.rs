//! ActionExecutor - side-effecting actions and their reaction cleanup
//!
//! Each action is safe to repeat: callers check live state ("already
//! pinned", "thread already open") before calling, and cleanup calls are
//! idempotent on the platform side.

use pinbot_core::entities::{
    AutoArchiveDuration, Marker, MessageSnapshot, NewThread, OutgoingMessage, ThreadInfo,
};
use pinbot_core::{ReactionEvent, Snowflake};
use tracing::{debug, error, info, instrument};

use super::audit::{format_reactors, AUDIT_TARGET};
use super::bookmark::render_bookmark;
use super::context::EngineContext;
use super::error::EngineResult;

/// Private reply to users who react with the bot's own "pinned" marker
pub const WRONG_MARKER_NOTICE: &str = "I'm using 📍 to mark the pinned message, use 📌.";

/// Name for threads opened by reaction votes
pub fn reaction_thread_name(author_name: &str) -> String {
    format!("Thread by {author_name}")
}

/// Name for threads opened on every post
pub const AUTO_THREAD_NAME: &str = "Automatic thread";

pub struct ActionExecutor<'a> {
    ctx: &'a EngineContext,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    // === Pin ===

    /// Pin the message, then swap the 📌 votes for the 📍 confirmation.
    ///
    /// A failed pin leaves every reaction in place.
    #[instrument(skip(self, event, message, reactors), fields(message_id = %message.id))]
    pub async fn pin(
        &self,
        event: &ReactionEvent,
        message: &MessageSnapshot,
        reactors: &[Snowflake],
    ) -> EngineResult<()> {
        let platform = self.ctx.platform();

        if let Err(e) = platform.pin_message(message.channel_id, message.id).await {
            error!(
                target: AUDIT_TARGET,
                actor = %event.user_id,
                channel = %message.channel_id,
                guild = ?event.guild_id,
                error = %e,
                "Could not pin message"
            );
            return Err(e.into());
        }

        info!(
            target: AUDIT_TARGET,
            actor = %event.user_id,
            channel = %message.channel_id,
            guild = ?event.guild_id,
            "Pinned message {}. Reacted by users: {}",
            message.jump_url,
            format_reactors(reactors)
        );

        self.clear_marker(message, Marker::Pin).await?;
        platform
            .add_reaction(message.channel_id, message.id, Marker::Pinned.emoji())
            .await?;
        Ok(())
    }

    /// Clear 📌 votes from a message that is already pinned
    pub async fn clear_stale_pin_votes(
        &self,
        event: &ReactionEvent,
        message: &MessageSnapshot,
    ) -> EngineResult<()> {
        debug!(
            target: AUDIT_TARGET,
            actor = %event.user_id,
            channel = %message.channel_id,
            guild = ?event.guild_id,
            "Removing {}'s pin: Message is already pinned.",
            event.user_id
        );
        self.clear_marker(message, Marker::Pin).await
    }

    /// Strip a user's 📍 and explain which marker to use
    pub async fn notify_wrong_marker(&self, event: &ReactionEvent) -> EngineResult<()> {
        let platform = self.ctx.platform();
        platform
            .remove_reaction(
                event.channel_id,
                event.message_id,
                Marker::Pinned.emoji(),
                event.user_id,
            )
            .await?;
        platform
            .send_direct_message(event.user_id, &OutgoingMessage::text(WRONG_MARKER_NOTICE))
            .await?;
        Ok(())
    }

    // === Bookmark ===

    /// Remove the reactor's 🔖 from the public message and send them a private copy
    #[instrument(skip(self, event, message), fields(message_id = %message.id))]
    pub async fn deliver_bookmark(
        &self,
        event: &ReactionEvent,
        message: &MessageSnapshot,
        guild_name: &str,
        channel_name: &str,
    ) -> EngineResult<()> {
        let platform = self.ctx.platform();
        let copy = render_bookmark(
            message,
            guild_name,
            channel_name,
            self.ctx.settings().max_message_length,
        );

        platform
            .remove_reaction(
                message.channel_id,
                message.id,
                Marker::Bookmark.emoji(),
                event.user_id,
            )
            .await?;
        platform.send_direct_message(event.user_id, &copy).await?;

        debug!(
            target: AUDIT_TARGET,
            actor = %event.user_id,
            channel = %message.channel_id,
            guild = ?event.guild_id,
            "Bookmarked message {}.",
            message.jump_url
        );
        Ok(())
    }

    // === Threads ===

    /// Open a thread on the message. Nothing is recorded if creation fails.
    #[instrument(skip(self, event, message, reactors), fields(message_id = %message.id))]
    pub async fn create_thread(
        &self,
        event: &ReactionEvent,
        message: &MessageSnapshot,
        reactors: &[Snowflake],
    ) -> EngineResult<ThreadInfo> {
        let request = NewThread::named(reaction_thread_name(&message.author.name));

        let thread = match self
            .ctx
            .platform()
            .create_thread(message.channel_id, message.id, &request)
            .await
        {
            Ok(thread) => thread,
            Err(e) => {
                error!(
                    target: AUDIT_TARGET,
                    actor = %event.user_id,
                    channel = %message.channel_id,
                    guild = ?event.guild_id,
                    error = %e,
                    "Could not open a thread on a message {}.",
                    message.jump_url
                );
                return Err(e.into());
            }
        };

        info!(
            target: AUDIT_TARGET,
            actor = %event.user_id,
            channel = %message.channel_id,
            guild = ?event.guild_id,
            "Thread opened on a message {}. Reacted by users: {}",
            message.jump_url,
            format_reactors(reactors)
        );

        self.clear_marker(message, Marker::Thread).await?;
        Ok(thread)
    }

    /// Unarchive the message's thread
    pub async fn reopen_thread(
        &self,
        event: &ReactionEvent,
        message: &MessageSnapshot,
        thread_id: Snowflake,
    ) -> EngineResult<()> {
        self.ctx
            .platform()
            .set_thread_archived(thread_id, false)
            .await?;

        info!(
            target: AUDIT_TARGET,
            actor = %event.user_id,
            channel = %message.channel_id,
            guild = ?event.guild_id,
            "Thread unarchived on a message {}.",
            message.jump_url
        );

        self.clear_marker(message, Marker::Thread).await
    }

    /// Open a thread on a fresh post with the given archive duration
    #[instrument(skip(self))]
    pub async fn create_auto_thread(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        author_id: Snowflake,
        duration: AutoArchiveDuration,
    ) -> EngineResult<ThreadInfo> {
        let request = NewThread::named(AUTO_THREAD_NAME).archive_after(duration);

        match self
            .ctx
            .platform()
            .create_thread(channel_id, message_id, &request)
            .await
        {
            Ok(thread) => {
                debug!(
                    target: AUDIT_TARGET,
                    actor = %author_id,
                    channel = %channel_id,
                    guild = %guild_id,
                    "A new thread created automatically."
                );
                Ok(thread)
            }
            Err(e) => {
                error!(
                    target: AUDIT_TARGET,
                    actor = %author_id,
                    channel = %channel_id,
                    guild = %guild_id,
                    error = %e,
                    "Could not create a thread automatically"
                );
                Err(e.into())
            }
        }
    }

    /// Archive a thread whose root was deleted, or delete it when nobody replied.
    ///
    /// Returns `true` when the thread was archived, `false` when deleted.
    pub async fn retire_orphan_thread(
        &self,
        guild_id: Option<Snowflake>,
        channel_id: Snowflake,
        thread_id: Snowflake,
    ) -> EngineResult<bool> {
        let platform = self.ctx.platform();

        // The root message counts as one
        let messages = platform.count_thread_messages(thread_id, 2).await?;

        if messages > 1 {
            platform.set_thread_archived(thread_id, true).await?;
            info!(
                target: AUDIT_TARGET,
                actor = "-",
                channel = %channel_id,
                guild = ?guild_id,
                "Deleted message, thread id {} archived.",
                thread_id
            );
            Ok(true)
        } else {
            platform.delete_thread(thread_id).await?;
            info!(
                target: AUDIT_TARGET,
                actor = "-",
                channel = %channel_id,
                guild = ?guild_id,
                "Deleted message, empty thread id {} also deleted.",
                thread_id
            );
            Ok(false)
        }
    }

    // === Cleanup ===

    /// Clear 🧵 votes on a message whose thread is already live
    pub async fn clear_open_thread_votes(
        &self,
        event: &ReactionEvent,
        message: &MessageSnapshot,
    ) -> EngineResult<()> {
        debug!(
            target: AUDIT_TARGET,
            actor = %event.user_id,
            channel = %message.channel_id,
            guild = ?event.guild_id,
            "Removing {}'s thread vote: Message already has an open thread.",
            event.user_id
        );
        self.clear_marker(message, Marker::Thread).await
    }

    /// Clear 🧵 on a message that lives inside a thread
    pub async fn clear_nested_thread_votes(
        &self,
        event: &ReactionEvent,
        message: &MessageSnapshot,
    ) -> EngineResult<()> {
        debug!(
            target: AUDIT_TARGET,
            actor = %event.user_id,
            channel = %message.channel_id,
            guild = ?event.guild_id,
            "Removing {}'s thread vote: Threads cannot be nested.",
            event.user_id
        );
        self.clear_marker(message, Marker::Thread).await
    }

    /// Remove every reaction of `marker` from the message
    async fn clear_marker(&self, message: &MessageSnapshot, marker: Marker) -> EngineResult<()> {
        self.ctx
            .platform()
            .clear_reaction(message.channel_id, message.id, marker.emoji())
            .await?;
        Ok(())
    }
}
