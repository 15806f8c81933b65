//! Intent handlers - one per automation a reaction can trigger
//!
//! The engine classifies the event, then dispatches to the handler for the
//! resulting [`Intent`]. Handlers re-read live state on every call, so a
//! duplicate or late event never repeats an action.

use async_trait::async_trait;
use pinbot_core::entities::{Marker, MessageSnapshot, PreferenceKind};
use pinbot_core::{ReactionEvent, Snowflake};
use tracing::{debug, instrument};

use super::classifier::{IgnoreReason, Intent};
use super::context::EngineContext;
use super::error::EngineResult;
use super::executor::ActionExecutor;
use super::gate::{GateDecision, ThresholdGate};
use super::resolver::ConfigResolver;
use super::thread_state::{ThreadState, ThreadStateMachine, ThreadTransition};
use crate::dto::ReactionOutcome;

/// A classified reaction, ready for its intent handler
#[derive(Debug, Clone, Copy)]
pub struct IntentRequest<'r> {
    pub guild_id: Snowflake,
    pub event: &'r ReactionEvent,
    pub message: &'r MessageSnapshot,
}

impl IntentRequest<'_> {
    fn channel_id(&self) -> Snowflake {
        self.message.channel_id
    }
}

#[async_trait]
pub trait IntentHandler: Send + Sync {
    async fn handle(
        &self,
        ctx: &EngineContext,
        request: IntentRequest<'_>,
    ) -> EngineResult<ReactionOutcome>;
}

/// Handler for an intent
pub fn handler_for(intent: Intent) -> &'static dyn IntentHandler {
    match intent {
        Intent::Pin => &PinHandler,
        Intent::Bookmark => &BookmarkHandler,
        Intent::Thread => &ThreadHandler,
    }
}

// ============================================================================
// Pin
// ============================================================================

pub struct PinHandler;

#[async_trait]
impl IntentHandler for PinHandler {
    #[instrument(name = "pin_intent", skip_all, fields(message_id = %request.message.id))]
    async fn handle(
        &self,
        ctx: &EngineContext,
        request: IntentRequest<'_>,
    ) -> EngineResult<ReactionOutcome> {
        let channel = ctx.platform().fetch_channel(request.channel_id()).await?;
        if channel.is_thread() {
            return Ok(ReactionOutcome::Ignored(IgnoreReason::ThreadContext));
        }

        let Some(votes) = request.message.reaction(Marker::Pin.emoji()) else {
            return Ok(ReactionOutcome::NoPinVotes);
        };

        let executor = ActionExecutor::new(ctx);

        if request.message.pinned {
            executor
                .clear_stale_pin_votes(request.event, request.message)
                .await?;
            return Ok(ReactionOutcome::AlreadyPinned);
        }

        let limit = ConfigResolver::new(ctx)
            .resolve(request.guild_id, request.channel_id(), PreferenceKind::Pin)
            .await?;
        let reactors = votes.distinct_count();

        match ThresholdGate::should_fire(Intent::Pin, reactors, limit) {
            GateDecision::NotApplicable => Ok(ReactionOutcome::NotApplicable),
            GateDecision::Wait => Ok(ReactionOutcome::Waiting {
                reactors,
                limit: limit.unwrap_or(0),
            }),
            GateDecision::Fire => {
                let reactors = votes.distinct_reactors();
                executor
                    .pin(request.event, request.message, &reactors)
                    .await?;
                Ok(ReactionOutcome::Pinned { reactors })
            }
        }
    }
}

// ============================================================================
// Bookmark
// ============================================================================

pub struct BookmarkHandler;

#[async_trait]
impl IntentHandler for BookmarkHandler {
    #[instrument(name = "bookmark_intent", skip_all, fields(message_id = %request.message.id))]
    async fn handle(
        &self,
        ctx: &EngineContext,
        request: IntentRequest<'_>,
    ) -> EngineResult<ReactionOutcome> {
        let enabled = ConfigResolver::new(ctx)
            .is_enabled(request.guild_id, request.channel_id(), PreferenceKind::Bookmark)
            .await?;
        if !enabled {
            return Ok(ReactionOutcome::NotApplicable);
        }

        let platform = ctx.platform();
        let guild = platform.fetch_guild(request.guild_id).await?;
        let channel = platform.fetch_channel(request.channel_id()).await?;

        ActionExecutor::new(ctx)
            .deliver_bookmark(
                request.event,
                request.message,
                &guild.name,
                &channel.display_name(),
            )
            .await?;

        Ok(ReactionOutcome::BookmarkDelivered)
    }
}

// ============================================================================
// Thread
// ============================================================================

pub struct ThreadHandler;

#[async_trait]
impl IntentHandler for ThreadHandler {
    #[instrument(name = "thread_intent", skip_all, fields(message_id = %request.message.id))]
    async fn handle(
        &self,
        ctx: &EngineContext,
        request: IntentRequest<'_>,
    ) -> EngineResult<ReactionOutcome> {
        let executor = ActionExecutor::new(ctx);
        let platform = ctx.platform();

        let channel = platform.fetch_channel(request.channel_id()).await?;
        if channel.is_thread() {
            executor
                .clear_nested_thread_votes(request.event, request.message)
                .await?;
            return Ok(ReactionOutcome::Ignored(IgnoreReason::ThreadContext));
        }

        let limit = ConfigResolver::new(ctx)
            .limit(request.guild_id, request.channel_id(), PreferenceKind::Thread)
            .await?;

        let threads = platform.list_threads(request.channel_id()).await?;
        let state = ThreadState::locate(request.message, &threads);

        let votes = request.message.reaction(Marker::Thread.emoji());
        let reactors = votes.map_or(0, |v| v.distinct_count());

        match ThreadStateMachine::decide(&state, reactors, limit) {
            ThreadTransition::Create => {
                let voters = votes.map(|v| v.distinct_reactors()).unwrap_or_default();
                let thread = executor
                    .create_thread(request.event, request.message, &voters)
                    .await?;
                Ok(ReactionOutcome::ThreadCreated {
                    thread_id: thread.id,
                })
            }
            ThreadTransition::Reopen(thread_id) => {
                executor
                    .reopen_thread(request.event, request.message, thread_id)
                    .await?;
                Ok(ReactionOutcome::ThreadReopened { thread_id })
            }
            ThreadTransition::ClearMarker => {
                executor
                    .clear_open_thread_votes(request.event, request.message)
                    .await?;
                Ok(ReactionOutcome::ThreadAlreadyOpen)
            }
            ThreadTransition::Hold if limit == 0 => Ok(ReactionOutcome::NotApplicable),
            ThreadTransition::Hold => {
                if state == ThreadState::Inconsistent {
                    debug!(
                        message_id = %request.message.id,
                        "Thread flagged on message but not listed in channel"
                    );
                    return Ok(ReactionOutcome::ThreadStateUnknown);
                }
                Ok(ReactionOutcome::Waiting {
                    reactors,
                    limit: ThreadStateMachine::effective_limit(&state, limit).unwrap_or(limit),
                })
            }
        }
    }
}
