//! Engine scenario tests
//!
//! Drive the three event handlers against the in-memory platform.
//!
//! Run with: cargo test -p integration-tests --test engine_tests

use integration_tests::*;
use pinbot_cache::EventEnvelope;
use pinbot_core::entities::{AutoArchiveDuration, MessageKind, PreferenceKind, ThreadInfo};
use pinbot_core::{MessageFlags, PlatformError, Snowflake};
use pinbot_engine::services::bookmark::BOOKMARK_TITLE;
use pinbot_engine::services::executor::WRONG_MARKER_NOTICE;
use pinbot_engine::{CleanupOutcome, CreateOutcome, EngineError, IgnoreReason, ReactionOutcome};
use serde_json::json;
use tracing::Level;

const PIN: &str = "📌";
const PINNED: &str = "📍";
const BOOKMARK: &str = "🔖";
const THREAD: &str = "🧵";

fn pin_calls(bot: &TestBot) -> usize {
    bot.platform
        .calls()
        .iter()
        .filter(|c| matches!(c, PlatformCall::Pin { .. }))
        .count()
}

fn archived_thread(message_id: Snowflake) -> ThreadInfo {
    ThreadInfo {
        id: message_id,
        parent_id: CHANNEL,
        name: "Thread by author".to_string(),
        archived: true,
    }
}

// ============================================================================
// Pin
// ============================================================================

#[tokio::test]
async fn test_pin_waits_then_fires_at_limit() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 3).await;
    let message = bot.post();
    let voters = users(3);

    let outcome = bot.react_all(&message, PIN, &voters[..2]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Waiting { reactors: 2, limit: 3 });
    assert!(!bot.platform.message(message.id).unwrap().pinned);

    let outcome = bot.react(&message, PIN, voters[2]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Pinned { reactors: voters.clone() });

    let pinned = bot.platform.message(message.id).unwrap();
    assert!(pinned.pinned);
    assert!(bot.platform.reactors(message.id, PIN).is_empty());
    assert_eq!(bot.platform.reactors(message.id, PINNED), vec![BOT]);

    assert_eq!(
        bot.platform.calls(),
        vec![
            PlatformCall::Pin { message: message.id },
            PlatformCall::ClearReaction {
                message: message.id,
                emoji: PIN.to_string()
            },
            PlatformCall::AddReaction {
                message: message.id,
                emoji: PINNED.to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_repeated_reactions_from_one_user_count_once() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 2).await;
    let message = bot.post();
    let voter = users(1)[0];

    bot.react(&message, PIN, voter).await.unwrap();
    let outcome = bot.react(&message, PIN, voter).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::Waiting { reactors: 1, limit: 2 });
    assert_eq!(pin_calls(&bot), 0);
}

#[tokio::test]
async fn test_pin_is_idempotent() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 1).await;
    let message = bot.post();
    let voters = users(2);

    let outcome = bot.react(&message, PIN, voters[0]).await.unwrap();
    assert!(matches!(outcome, ReactionOutcome::Pinned { .. }));

    let outcome = bot.react(&message, PIN, voters[1]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::AlreadyPinned);
    assert_eq!(pin_calls(&bot), 1);
    assert!(bot.platform.reactors(message.id, PIN).is_empty());
}

#[tokio::test]
async fn test_bot_confirmation_marker_is_ignored() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 1).await;
    let message = bot.post();
    bot.react(&message, PIN, users(1)[0]).await.unwrap();
    let calls_before = bot.platform.calls().len();

    let outcome = bot.react(&message, PINNED, BOT).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::Ignored(IgnoreReason::BotMarker));
    assert_eq!(bot.platform.calls().len(), calls_before);
}

#[tokio::test]
async fn test_channel_zero_overrides_guild_default() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 3).await;
    bot.set_limit(Some(CHANNEL), PreferenceKind::Pin, 0).await;
    let message = bot.post();

    let outcome = bot.react_all(&message, PIN, &users(5)).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::NotApplicable);
    assert_eq!(pin_calls(&bot), 0);
}

#[tokio::test]
async fn test_channel_limit_wins_over_guild_default() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 2).await;
    bot.set_limit(Some(CHANNEL), PreferenceKind::Pin, 4).await;
    let message = bot.post();

    let outcome = bot.react_all(&message, PIN, &users(3)).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Waiting { reactors: 3, limit: 4 });
}

#[tokio::test]
async fn test_unconfigured_pin_is_not_applicable() {
    let bot = TestBot::new();
    let message = bot.post();

    let outcome = bot.react_all(&message, PIN, &users(10)).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::NotApplicable);
}

#[tokio::test]
async fn test_pin_not_offered_inside_threads() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 1).await;
    let thread_id = Snowflake::new(300);
    bot.platform.add_channel(thread_channel(thread_id, CHANNEL));
    let message = text_message(unique_message_id(), thread_id);
    bot.platform.add_message(message.clone());

    let outcome = bot.react(&message, PIN, users(1)[0]).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::Ignored(IgnoreReason::ThreadContext));
    assert_eq!(pin_calls(&bot), 0);
}

#[tokio::test]
async fn test_failed_pin_leaves_reactions_in_place() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 1).await;
    bot.platform
        .fail("pin_message", PlatformError::RateLimited { retry_after_ms: 500 });
    let message = bot.post();
    let voter = users(1)[0];

    let result = bot.react(&message, PIN, voter).await;

    assert!(matches!(
        result,
        Err(EngineError::Platform(PlatformError::RateLimited { .. }))
    ));
    assert!(!bot.platform.message(message.id).unwrap().pinned);
    assert_eq!(bot.platform.reactors(message.id, PIN), vec![voter]);
    assert!(bot.platform.calls().is_empty());

    // Next qualifying reaction re-evaluates from scratch
    bot.platform.clear_failures();
    let outcome = bot.react(&message, PIN, users(2)[1]).await.unwrap();
    assert!(matches!(outcome, ReactionOutcome::Pinned { .. }));
}

#[tokio::test]
async fn test_handler_boundary_swallows_failures() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 1).await;
    bot.platform.fail(
        "fetch_message",
        PlatformError::Http {
            status: 503,
            message: "unavailable".to_string(),
        },
    );
    let message = bot.post();
    bot.platform.react(message.id, PIN, users(1)[0]);
    let (audit, _guard) = AuditLog::capture();

    bot.engine
        .on_reaction_add(&reaction_event(CHANNEL, message.id, PIN, users(1)[0]))
        .await;

    assert!(bot.platform.calls().is_empty());
    let failures = audit.matching(Level::ERROR, "Event processing aborted");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].transient, Some(true));
}

// ============================================================================
// Classification
// ============================================================================

#[tokio::test]
async fn test_wrong_marker_is_removed_with_notice() {
    let bot = TestBot::new();
    let message = bot.post();
    let user = users(1)[0];

    let outcome = bot.react(&message, PINNED, user).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::WrongMarkerNotice);
    assert!(bot.platform.reactors(message.id, PINNED).is_empty());
    let dms = bot.platform.direct_messages();
    assert_eq!(dms.len(), 1);
    assert_eq!(dms[0].0, user);
    assert_eq!(dms[0].1.content.as_deref(), Some(WRONG_MARKER_NOTICE));
}

#[tokio::test]
async fn test_system_messages_are_never_acted_on() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 1).await;
    let mut message = text_message(unique_message_id(), CHANNEL);
    message.kind = MessageKind::System(8);
    bot.platform.add_message(message.clone());

    let outcome = bot.react(&message, PIN, users(1)[0]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Ignored(IgnoreReason::SystemMessage));
    assert_eq!(pin_calls(&bot), 0);
}

#[tokio::test]
async fn test_deleted_message_is_ignored() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 1).await;
    let message = bot.post();
    bot.platform.remove_message(message.id);

    let outcome = bot.react(&message, PIN, users(1)[0]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Ignored(IgnoreReason::MessageUnavailable));
}

#[tokio::test]
async fn test_unrelated_emoji_and_missing_guild_are_ignored() {
    let bot = TestBot::new();
    let message = bot.post();

    let outcome = bot.react(&message, "👍", users(1)[0]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Ignored(IgnoreReason::UnrecognisedEmoji));

    let mut event = reaction_event(CHANNEL, message.id, PIN, users(1)[0]);
    event.guild_id = None;
    let outcome = bot.engine.process_reaction_add(&event).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Ignored(IgnoreReason::NoGuildContext));
}

// ============================================================================
// Bookmark
// ============================================================================

#[tokio::test]
async fn test_bookmark_delivers_private_copy() {
    let bot = TestBot::new();
    bot.set_bookmarks(None, true).await;
    let mut message = text_message(unique_message_id(), CHANNEL);
    message.attachment_count = 2;
    bot.platform.add_message(message.clone());
    let reader = users(1)[0];

    let outcome = bot.react(&message, BOOKMARK, reader).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::BookmarkDelivered);
    assert!(bot.platform.reactors(message.id, BOOKMARK).is_empty());

    let dms = bot.platform.direct_messages();
    assert_eq!(dms.len(), 1);
    assert_eq!(dms[0].0, reader);
    let embed = &dms[0].1.embeds[0];
    assert_eq!(embed.title, BOOKMARK_TITLE);
    assert_eq!(embed.description.as_deref(), Some("Ferris says hi"));
    assert_eq!(embed.author.as_ref().map(|a| a.name.as_str()), Some("The Author"));
    let reference = embed.find_field("2024-03-01 12:30:00 UTC").unwrap();
    assert_eq!(
        reference.value,
        format!("[Server Rust \\*Fans\\*, channel #general]({})", message.jump_url)
    );
    assert_eq!(embed.find_field("Files").unwrap().value, "Total 2");
    assert!(embed.find_field("Embeds").is_none());
}

#[tokio::test]
async fn test_bookmark_content_is_truncated() {
    let bot = TestBot::with_max_message_length(6);
    bot.set_bookmarks(None, true).await;
    let message = bot.post();

    bot.react(&message, BOOKMARK, users(1)[0]).await.unwrap();

    let dms = bot.platform.direct_messages();
    assert_eq!(dms[0].1.embeds[0].description.as_deref(), Some("Ferris"));
}

#[tokio::test]
async fn test_bookmark_disabled_by_channel_override() {
    let bot = TestBot::new();
    bot.set_bookmarks(None, true).await;
    bot.set_bookmarks(Some(CHANNEL), false).await;
    let message = bot.post();

    let outcome = bot.react_all(&message, BOOKMARK, &users(20)).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::NotApplicable);
    assert!(bot.platform.direct_messages().is_empty());
    assert_eq!(bot.platform.reactors(message.id, BOOKMARK).len(), 20);
}

#[tokio::test]
async fn test_bookmark_unconfigured_is_off() {
    let bot = TestBot::new();
    let message = bot.post();

    let outcome = bot.react(&message, BOOKMARK, users(1)[0]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::NotApplicable);
    assert!(bot.platform.direct_messages().is_empty());
}

// ============================================================================
// Threads
// ============================================================================

#[tokio::test]
async fn test_thread_created_at_limit() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Thread, 4).await;
    let message = bot.post();
    let voters = users(4);

    let outcome = bot.react_all(&message, THREAD, &voters[..3]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Waiting { reactors: 3, limit: 4 });
    assert!(bot.platform.thread(message.id).is_none());

    let outcome = bot.react(&message, THREAD, voters[3]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::ThreadCreated { thread_id: message.id });

    let thread = bot.platform.thread(message.id).unwrap();
    assert_eq!(thread.name, "Thread by author");
    assert!(!thread.archived);
    assert!(bot.platform.reactors(message.id, THREAD).is_empty());
    assert!(bot.platform.calls().contains(&PlatformCall::CreateThread {
        message: message.id,
        name: "Thread by author".to_string(),
        duration: None,
    }));
}

#[tokio::test]
async fn test_open_thread_only_clears_marker() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Thread, 1).await;
    let message = bot.post();
    bot.react(&message, THREAD, users(1)[0]).await.unwrap();

    let outcome = bot.react(&message, THREAD, users(2)[1]).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::ThreadAlreadyOpen);
    assert!(bot.platform.reactors(message.id, THREAD).is_empty());
    let creates = bot
        .platform
        .calls()
        .iter()
        .filter(|c| matches!(c, PlatformCall::CreateThread { .. }))
        .count();
    assert_eq!(creates, 1);
}

#[tokio::test]
async fn test_archived_thread_reopens_at_reduced_limit() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Thread, 4).await;
    let message = bot.post();
    bot.platform.add_thread(archived_thread(message.id), 5);
    let voters = users(3);

    let outcome = bot.react_all(&message, THREAD, &voters[..2]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::Waiting { reactors: 2, limit: 3 });

    let outcome = bot.react(&message, THREAD, voters[2]).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::ThreadReopened { thread_id: message.id });
    assert!(!bot.platform.thread(message.id).unwrap().archived);
    assert!(bot.platform.reactors(message.id, THREAD).is_empty());
}

#[tokio::test]
async fn test_flagged_but_unlisted_thread_holds() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Thread, 1).await;
    let mut message = text_message(unique_message_id(), CHANNEL);
    message.flags = MessageFlags::HAS_THREAD;
    bot.platform.add_message(message.clone());

    let outcome = bot.react_all(&message, THREAD, &users(5)).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::ThreadStateUnknown);
    assert!(bot.platform.calls().is_empty());
}

#[tokio::test]
async fn test_thread_marker_inside_thread_is_cleared() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Thread, 1).await;
    let thread_id = Snowflake::new(300);
    bot.platform.add_channel(thread_channel(thread_id, CHANNEL));
    let message = text_message(unique_message_id(), thread_id);
    bot.platform.add_message(message.clone());
    let (audit, _guard) = AuditLog::capture();

    let outcome = bot.react(&message, THREAD, users(1)[0]).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::Ignored(IgnoreReason::ThreadContext));
    assert!(bot.platform.reactors(message.id, THREAD).is_empty());
    let records = audit.matching(Level::DEBUG, "Threads cannot be nested");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].actor, users(1)[0].to_string());
}

#[tokio::test]
async fn test_thread_disabled_is_not_applicable() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Thread, 0).await;
    let message = bot.post();

    let outcome = bot.react_all(&message, THREAD, &users(3)).await.unwrap();
    assert_eq!(outcome, ReactionOutcome::NotApplicable);
    assert!(bot.platform.calls().is_empty());
}

#[tokio::test]
async fn test_open_thread_marker_cleared_when_threads_disabled() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Thread, 0).await;
    let message = bot.post();
    let mut thread = archived_thread(message.id);
    thread.archived = false;
    bot.platform.add_thread(thread, 3);
    let (audit, _guard) = AuditLog::capture();

    let outcome = bot.react(&message, THREAD, users(1)[0]).await.unwrap();

    assert_eq!(outcome, ReactionOutcome::ThreadAlreadyOpen);
    assert_eq!(
        audit
            .matching(Level::DEBUG, "Message already has an open thread")
            .len(),
        1
    );
    assert!(bot.platform.reactors(message.id, THREAD).is_empty());
    assert_eq!(
        bot.platform.calls(),
        vec![PlatformCall::ClearReaction {
            message: message.id,
            emoji: THREAD.to_string()
        }]
    );
}

#[tokio::test]
async fn test_failed_thread_creation_keeps_votes() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Thread, 1).await;
    bot.platform.fail(
        "create_thread",
        PlatformError::Forbidden("Missing Permissions".to_string()),
    );
    let message = bot.post();

    let result = bot.react(&message, THREAD, users(1)[0]).await;

    assert!(matches!(
        result,
        Err(EngineError::Platform(PlatformError::Forbidden(_)))
    ));
    assert!(bot.platform.thread(message.id).is_none());
    assert_eq!(bot.platform.reactors(message.id, THREAD).len(), 1);
}

// ============================================================================
// Orphan threads
// ============================================================================

#[tokio::test]
async fn test_deleted_root_with_empty_thread_deletes_it() {
    let bot = TestBot::new();
    let message = bot.post();
    let mut thread = archived_thread(message.id);
    thread.archived = false;
    bot.platform.add_thread(thread, 1);

    let outcome = bot
        .engine
        .process_message_delete(&message_deleted(CHANNEL, message.id))
        .await
        .unwrap();

    assert_eq!(outcome, CleanupOutcome::Deleted(message.id));
    assert!(bot.platform.thread(message.id).is_none());
}

#[tokio::test]
async fn test_deleted_root_with_replies_archives_thread() {
    let bot = TestBot::new();
    let message = bot.post();
    let mut thread = archived_thread(message.id);
    thread.archived = false;
    bot.platform.add_thread(thread, 7);

    let outcome = bot
        .engine
        .process_message_delete(&message_deleted(CHANNEL, message.id))
        .await
        .unwrap();

    assert_eq!(outcome, CleanupOutcome::Archived(message.id));
    assert!(bot.platform.thread(message.id).unwrap().archived);
}

#[tokio::test]
async fn test_deleted_message_without_thread() {
    let bot = TestBot::new();
    let message = bot.post();
    let other = bot.post();
    bot.platform.add_thread(archived_thread(other.id), 3);

    let outcome = bot
        .engine
        .process_message_delete(&message_deleted(CHANNEL, message.id))
        .await
        .unwrap();

    assert_eq!(outcome, CleanupOutcome::NoThread);
    assert!(bot.platform.calls().is_empty());
}

// ============================================================================
// Auto-threads
// ============================================================================

async fn auto_thread_duration(tier: u8, requested: &str) -> CreateOutcome {
    let bot = TestBot::new();
    bot.platform.add_guild(guild(tier));
    bot.service()
        .set_autothread(ADMIN, GUILD, CHANNEL, requested)
        .await
        .unwrap();

    bot.engine
        .process_message_create(&message_created(CHANNEL, Snowflake::new(42), false))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_auto_thread_duration_clamped_by_tier() {
    let thread_id = Snowflake::new(42);
    let expect = |duration| CreateOutcome::ThreadCreated { thread_id, duration };

    assert_eq!(auto_thread_duration(0, "7d").await, expect(AutoArchiveDuration::OneDay));
    assert_eq!(auto_thread_duration(1, "3d").await, expect(AutoArchiveDuration::OneDay));
    assert_eq!(auto_thread_duration(2, "7d").await, expect(AutoArchiveDuration::ThreeDays));
    assert_eq!(auto_thread_duration(3, "7d").await, expect(AutoArchiveDuration::OneWeek));
    assert_eq!(auto_thread_duration(0, "1h").await, expect(AutoArchiveDuration::OneHour));
}

#[tokio::test]
async fn test_auto_thread_is_named_and_timed() {
    let bot = TestBot::new();
    bot.service()
        .set_autothread(ADMIN, GUILD, CHANNEL, "1d")
        .await
        .unwrap();
    let message = bot.post();

    bot.engine
        .on_message_create(&message_created(CHANNEL, message.id, false))
        .await;

    assert_eq!(
        bot.platform.calls(),
        vec![PlatformCall::CreateThread {
            message: message.id,
            name: "Automatic thread".to_string(),
            duration: Some(AutoArchiveDuration::OneDay),
        }]
    );
}

#[tokio::test]
async fn test_auto_thread_skips() {
    let bot = TestBot::new();
    let message = bot.post();

    // Not an auto-thread channel
    let outcome = bot
        .engine
        .process_message_create(&message_created(CHANNEL, message.id, false))
        .await
        .unwrap();
    assert_eq!(outcome, CreateOutcome::Skipped);

    // Bot authors never get a thread
    bot.service()
        .set_autothread(ADMIN, GUILD, CHANNEL, "1h")
        .await
        .unwrap();
    let outcome = bot
        .engine
        .process_message_create(&message_created(CHANNEL, message.id, true))
        .await
        .unwrap();
    assert_eq!(outcome, CreateOutcome::Skipped);

    // Private channels
    let mut private = message_created(OTHER_CHANNEL, message.id, false);
    bot.platform.add_channel(dm_channel(OTHER_CHANNEL));
    bot.service()
        .set_autothread(ADMIN, GUILD, OTHER_CHANNEL, "1h")
        .await
        .unwrap();
    let outcome = bot.engine.process_message_create(&private).await.unwrap();
    assert_eq!(outcome, CreateOutcome::Skipped);

    private.guild_id = None;
    let outcome = bot.engine.process_message_create(&private).await.unwrap();
    assert_eq!(outcome, CreateOutcome::Skipped);

    assert!(bot.platform.calls().is_empty());
}

// ============================================================================
// Inbound envelopes
// ============================================================================

#[tokio::test]
async fn test_envelope_drives_engine() {
    let bot = TestBot::new();
    bot.set_limit(None, PreferenceKind::Pin, 1).await;
    let message = bot.post();
    let voter = users(1)[0];
    bot.platform.react(message.id, PIN, voter);

    let envelope: EventEnvelope = serde_json::from_value(json!({
        "event_type": "MESSAGE_REACTION_ADD",
        "data": {
            "user_id": voter.to_string(),
            "channel_id": CHANNEL.to_string(),
            "message_id": message.id.to_string(),
            "guild_id": GUILD.to_string(),
            "member": { "user": { "id": voter.to_string(), "username": "voter" } },
            "emoji": { "id": null, "name": PIN }
        }
    }))
    .unwrap();

    let event = envelope.into_inbound().unwrap().unwrap();
    bot.engine.handle(event).await;

    assert!(bot.platform.message(message.id).unwrap().pinned);
}
