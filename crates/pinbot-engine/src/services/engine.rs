//! Engine - entry point for the three inbound event handlers
//!
//! `process_*` methods return what happened so callers and tests can
//! inspect it. The `on_*` handlers wrap them as the error boundary: a
//! failure is logged and scoped to the one event, never propagated.

use pinbot_core::{
    InboundEvent, MessageCreatedEvent, MessageDeletedEvent, PlatformError, ReactionEvent,
};
use tracing::{debug, error, instrument};

use super::audit::AUDIT_TARGET;
use super::classifier::{Classification, ReactionClassifier};
use super::context::EngineContext;
use super::error::{EngineError, EngineResult};
use super::executor::ActionExecutor;
use super::intents::{handler_for, IntentRequest};
use super::tier_clamp::GuildTierClamp;
use crate::dto::{CleanupOutcome, CreateOutcome, ReactionOutcome};
use crate::services::IgnoreReason;

/// Reaction-threshold automation engine
#[derive(Debug, Clone)]
pub struct Engine {
    ctx: EngineContext,
}

impl Engine {
    pub fn new(ctx: EngineContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    fn classifier(&self) -> ReactionClassifier {
        ReactionClassifier::new(self.ctx.bot_user_id())
    }

    // ========================================================================
    // Event handlers
    // ========================================================================

    /// Dispatch any inbound event to its handler
    #[instrument(skip_all, fields(event = event.event_type()))]
    pub async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::ReactionAdd(e) => self.on_reaction_add(&e).await,
            InboundEvent::MessageDelete(e) => self.on_message_delete(&e).await,
            InboundEvent::MessageCreate(e) => self.on_message_create(&e).await,
        }
    }

    pub async fn on_reaction_add(&self, event: &ReactionEvent) {
        match self.process_reaction_add(event).await {
            Ok(outcome) => debug!(message_id = %event.message_id, ?outcome, "Reaction handled"),
            Err(e) => report(&e, event.user_id.to_string(), event),
        }
    }

    pub async fn on_message_delete(&self, event: &MessageDeletedEvent) {
        match self.process_message_delete(event).await {
            Ok(outcome) => debug!(message_id = %event.id, ?outcome, "Message delete handled"),
            Err(e) => report(&e, "-".to_string(), event),
        }
    }

    pub async fn on_message_create(&self, event: &MessageCreatedEvent) {
        match self.process_message_create(event).await {
            Ok(outcome) => debug!(message_id = %event.id, ?outcome, "Message create handled"),
            Err(e) => report(&e, event.author.id.to_string(), event),
        }
    }

    // ========================================================================
    // Reaction add
    // ========================================================================

    /// Classify a reaction and run the matching automation
    #[instrument(skip(self, event), fields(message_id = %event.message_id, channel_id = %event.channel_id))]
    pub async fn process_reaction_add(&self, event: &ReactionEvent) -> EngineResult<ReactionOutcome> {
        let classifier = self.classifier();

        if let Err(reason) = classifier.precheck(event) {
            return Ok(ReactionOutcome::Ignored(reason));
        }
        let Some(guild_id) = event.guild_id else {
            return Ok(ReactionOutcome::Ignored(IgnoreReason::NoGuildContext));
        };

        let message = match self
            .ctx
            .platform()
            .fetch_message(event.channel_id, event.message_id)
            .await
        {
            Ok(message) => Some(message),
            Err(e) if e.is_not_found() => {
                error!(
                    target: AUDIT_TARGET,
                    actor = %event.user_id,
                    channel = %event.channel_id,
                    guild = %guild_id,
                    "Could not find message {}",
                    event.message_id
                );
                None
            }
            Err(e) => return Err(e.into()),
        };

        match classifier.classify(event, message.as_ref()) {
            Classification::Ignore(reason) => Ok(ReactionOutcome::Ignored(reason)),
            Classification::WrongPinMarker => {
                ActionExecutor::new(&self.ctx).notify_wrong_marker(event).await?;
                Ok(ReactionOutcome::WrongMarkerNotice)
            }
            Classification::Act(intent) => {
                let Some(message) = message.as_ref() else {
                    return Ok(ReactionOutcome::Ignored(IgnoreReason::MessageUnavailable));
                };
                let request = IntentRequest {
                    guild_id,
                    event,
                    message,
                };
                handler_for(intent).handle(&self.ctx, request).await
            }
        }
    }

    // ========================================================================
    // Message delete
    // ========================================================================

    /// Retire the thread anchored to a deleted message, if any
    #[instrument(skip(self, event), fields(message_id = %event.id, channel_id = %event.channel_id))]
    pub async fn process_message_delete(
        &self,
        event: &MessageDeletedEvent,
    ) -> EngineResult<CleanupOutcome> {
        if event.guild_id.is_none() {
            return Ok(CleanupOutcome::NoThread);
        }

        let threads = self.ctx.platform().list_threads(event.channel_id).await?;
        let Some(thread) = threads.iter().find(|t| t.is_anchored_to(event.id)) else {
            return Ok(CleanupOutcome::NoThread);
        };

        let archived = ActionExecutor::new(&self.ctx)
            .retire_orphan_thread(event.guild_id, event.channel_id, thread.id)
            .await?;

        Ok(if archived {
            CleanupOutcome::Archived(thread.id)
        } else {
            CleanupOutcome::Deleted(thread.id)
        })
    }

    // ========================================================================
    // Message create
    // ========================================================================

    /// Open a thread on a new post in an auto-thread channel
    #[instrument(skip(self, event), fields(message_id = %event.id, channel_id = %event.channel_id))]
    pub async fn process_message_create(
        &self,
        event: &MessageCreatedEvent,
    ) -> EngineResult<CreateOutcome> {
        if event.author.bot {
            return Ok(CreateOutcome::Skipped);
        }
        let Some(guild_id) = event.guild_id else {
            return Ok(CreateOutcome::Skipped);
        };

        let Some(config) = self
            .ctx
            .auto_thread_repo()
            .get(guild_id, event.channel_id)
            .await?
        else {
            return Ok(CreateOutcome::Skipped);
        };

        let platform = self.ctx.platform();
        let channel = platform.fetch_channel(event.channel_id).await?;
        if channel.channel_type.is_private() || channel.is_thread() {
            return Ok(CreateOutcome::Skipped);
        }

        let guild = platform.fetch_guild(guild_id).await?;
        let duration = GuildTierClamp::clamp(config.duration, guild.premium_tier);

        let thread = ActionExecutor::new(&self.ctx)
            .create_auto_thread(guild_id, event.channel_id, event.id, event.author.id, duration)
            .await?;

        Ok(CreateOutcome::ThreadCreated {
            thread_id: thread.id,
            duration,
        })
    }
}

/// Fields every inbound event can report
trait EventScope {
    fn scope(&self) -> (String, Option<String>);
}

impl EventScope for ReactionEvent {
    fn scope(&self) -> (String, Option<String>) {
        (self.channel_id.to_string(), self.guild_id.map(|g| g.to_string()))
    }
}

impl EventScope for MessageDeletedEvent {
    fn scope(&self) -> (String, Option<String>) {
        (self.channel_id.to_string(), self.guild_id.map(|g| g.to_string()))
    }
}

impl EventScope for MessageCreatedEvent {
    fn scope(&self) -> (String, Option<String>) {
        (self.channel_id.to_string(), self.guild_id.map(|g| g.to_string()))
    }
}

/// Log a failed event. Not-found targets are expected races and stay quiet.
fn report(err: &EngineError, actor: String, event: &impl EventScope) {
    let (channel, guild) = event.scope();

    if err.is_not_found() {
        debug!(actor = %actor, channel = %channel, ?guild, error = %err, "Event target no longer exists");
        return;
    }

    let retry_after_ms = match err {
        EngineError::Platform(PlatformError::RateLimited { retry_after_ms }) => Some(*retry_after_ms),
        _ => None,
    };

    error!(
        target: AUDIT_TARGET,
        actor = %actor,
        channel = %channel,
        ?guild,
        code = err.error_code(),
        transient = err.is_transient(),
        ?retry_after_ms,
        error = %err,
        "Event processing aborted"
    );
}
