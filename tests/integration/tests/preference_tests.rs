//! Configuration command tests
//!
//! Run with: cargo test -p integration-tests --test preference_tests

use integration_tests::*;
use pinbot_core::entities::{AutoArchiveDuration, PreferenceKind};
use pinbot_core::traits::{AutoThreadRepository, PreferenceRepository};
use pinbot_core::DomainError;
use pinbot_engine::{EngineError, PreferenceChange, ReactionOutcome};

#[tokio::test]
async fn test_set_limit_reports_change() {
    let bot = TestBot::new();
    let service = bot.service();

    let change = service
        .set_limit(ADMIN, GUILD, None, PreferenceKind::Pin, 3)
        .await
        .unwrap();
    assert_eq!(change, PreferenceChange::Updated { limit: 3 });

    let change = service
        .set_limit(ADMIN, GUILD, Some(CHANNEL), PreferenceKind::Pin, 0)
        .await
        .unwrap();
    assert_eq!(change, PreferenceChange::Disabled);

    let stored = bot
        .preferences
        .get(GUILD, Some(CHANNEL), PreferenceKind::Pin)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.value, 0);
}

#[tokio::test]
async fn test_command_limits_drive_engine() {
    let bot = TestBot::new();
    bot.service()
        .set_limit(ADMIN, GUILD, Some(CHANNEL), PreferenceKind::Pin, 2)
        .await
        .unwrap();
    let message = bot.post();

    let outcome = bot.react_all(&message, "📌", &users(2)).await.unwrap();
    assert!(matches!(outcome, ReactionOutcome::Pinned { .. }));
}

#[tokio::test]
async fn test_negative_limit_is_rejected() {
    let bot = TestBot::new();

    let err = bot
        .service()
        .set_limit(ADMIN, GUILD, None, PreferenceKind::Thread, -1)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Domain(DomainError::InvalidLimit(-1))));
    assert_eq!(err.error_code(), "INVALID_LIMIT");
    assert!(bot
        .preferences
        .get(GUILD, None, PreferenceKind::Thread)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_limit_above_storage_range_is_rejected() {
    let bot = TestBot::new();
    let service = bot.service();

    let change = service
        .set_limit(ADMIN, GUILD, None, PreferenceKind::Pin, 2_147_483_647)
        .await
        .unwrap();
    assert_eq!(change, PreferenceChange::Updated { limit: 2_147_483_647 });

    let err = service
        .set_limit(ADMIN, GUILD, Some(CHANNEL), PreferenceKind::Pin, 3_000_000_000)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Domain(DomainError::InvalidLimit(3_000_000_000))
    ));
    assert!(bot
        .preferences
        .get(GUILD, Some(CHANNEL), PreferenceKind::Pin)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_bookmark_is_not_a_limit() {
    let bot = TestBot::new();

    let err = bot
        .service()
        .set_limit(ADMIN, GUILD, None, PreferenceKind::Bookmark, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Domain(DomainError::NotALimit(_))));
}

#[tokio::test]
async fn test_bookmarks_toggle_and_unset() {
    let bot = TestBot::new();
    let service = bot.service();

    service.set_bookmarks(ADMIN, GUILD, None, true).await.unwrap();
    let stored = bot
        .preferences
        .get(GUILD, None, PreferenceKind::Bookmark)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_enabled());

    assert!(service
        .unset(ADMIN, GUILD, None, PreferenceKind::Bookmark)
        .await
        .unwrap());
    assert!(!service
        .unset(ADMIN, GUILD, None, PreferenceKind::Bookmark)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_list_labels_scopes() {
    let bot = TestBot::new();
    let service = bot.service();
    service
        .set_limit(ADMIN, GUILD, None, PreferenceKind::Pin, 3)
        .await
        .unwrap();
    service
        .set_limit(ADMIN, GUILD, Some(CHANNEL), PreferenceKind::Pin, 0)
        .await
        .unwrap();
    // Channel unknown to the platform
    service
        .set_limit(ADMIN, GUILD, Some(OTHER_CHANNEL), PreferenceKind::Pin, 5)
        .await
        .unwrap();
    service
        .set_limit(ADMIN, GUILD, None, PreferenceKind::Thread, 9)
        .await
        .unwrap();

    let entries = service.list(GUILD, PreferenceKind::Pin).await.unwrap();

    let scopes: Vec<(&str, u32)> = entries
        .iter()
        .map(|e| (e.scope.as_str(), e.value))
        .collect();
    assert_eq!(scopes, vec![("(server)", 3), ("general", 0), ("200", 5)]);
}

#[tokio::test]
async fn test_thread_settings() {
    let bot = TestBot::new();
    let service = bot.service();

    let settings = service.get_thread_settings(GUILD, CHANNEL).await.unwrap();
    assert_eq!(settings.guild_label(), "disabled");
    assert_eq!(settings.channel_limit, None);

    service
        .set_limit(ADMIN, GUILD, None, PreferenceKind::Thread, 5)
        .await
        .unwrap();
    service
        .set_limit(ADMIN, GUILD, Some(CHANNEL), PreferenceKind::Thread, 2)
        .await
        .unwrap();

    let settings = service.get_thread_settings(GUILD, CHANNEL).await.unwrap();
    assert_eq!(settings.guild_label(), "5");
    assert_eq!(settings.channel_limit, Some(2));
    assert_eq!(settings.effective(), 2);
}

#[tokio::test]
async fn test_autothread_commands() {
    let bot = TestBot::new();
    let service = bot.service();

    let err = service
        .set_autothread(ADMIN, GUILD, CHANNEL, "2d")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Domain(DomainError::InvalidDuration(_))));

    let duration = service
        .set_autothread(ADMIN, GUILD, CHANNEL, "7d")
        .await
        .unwrap();
    assert_eq!(duration, AutoArchiveDuration::OneWeek);

    assert!(service.unset_autothread(ADMIN, GUILD, CHANNEL).await.unwrap());
    assert!(!service.unset_autothread(ADMIN, GUILD, CHANNEL).await.unwrap());
}

#[tokio::test]
async fn test_list_autothreads_prunes_deleted_channels() {
    let bot = TestBot::new();
    let service = bot.service();
    service
        .set_autothread(ADMIN, GUILD, CHANNEL, "3d")
        .await
        .unwrap();
    service
        .set_autothread(ADMIN, GUILD, OTHER_CHANNEL, "1h")
        .await
        .unwrap();

    let entries = service.list_autothreads(GUILD).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].channel_name, "general");
    assert_eq!(entries[0].duration.label(), "3d");
    assert!(bot
        .auto_threads
        .get(GUILD, OTHER_CHANNEL)
        .await
        .unwrap()
        .is_none());
}
