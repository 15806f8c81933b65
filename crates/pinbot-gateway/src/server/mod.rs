//! Gateway wiring
//!
//! Builds the engine from configuration, subscribes to the event channel
//! and hands every decoded event to the engine as its own task.

use std::sync::Arc;

use pinbot_cache::{EventChannel, ReceivedMessage, Subscriber, SubscriberBuilder};
use pinbot_common::{AppConfig, AppError, StorageBackend};
use pinbot_core::traits::{AutoThreadRepository, ChatPlatform, PreferenceRepository};
use pinbot_core::Snowflake;
use pinbot_db::{
    create_pool, run_migrations, DatabaseConfig, MemoryAutoThreadRepository,
    MemoryPreferenceRepository, PgAutoThreadRepository, PgPreferenceRepository,
};
use pinbot_engine::{Engine, EngineContextBuilder, EngineSettings};
use tokio::sync::broadcast;

use crate::platform::RestPlatform;

type Repositories = (Arc<dyn PreferenceRepository>, Arc<dyn AutoThreadRepository>);

/// Create the preference stores for the configured backend
pub async fn create_repositories(config: &AppConfig) -> Result<Repositories, AppError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory preference storage; settings are lost on restart");
            Ok((
                Arc::new(MemoryPreferenceRepository::new()),
                Arc::new(MemoryAutoThreadRepository::new()),
            ))
        }
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .clone()
                .ok_or_else(|| AppError::Database("DATABASE_URL is not set".to_string()))?;

            tracing::info!("Connecting to PostgreSQL...");
            let db_config = DatabaseConfig::new(url)
                .with_connections(config.storage.min_connections, config.storage.max_connections);
            let pool = create_pool(&db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            tracing::info!("PostgreSQL connection established");

            Ok((
                Arc::new(PgPreferenceRepository::new(pool.clone())),
                Arc::new(PgAutoThreadRepository::new(pool)),
            ))
        }
    }
}

/// Build the engine and its dependencies
pub async fn create_engine(config: &AppConfig) -> Result<Engine, AppError> {
    let (preference_repo, auto_thread_repo) = create_repositories(config).await?;

    let platform: Arc<dyn ChatPlatform> = Arc::new(RestPlatform::new(&config.platform)?);

    let settings = EngineSettings::new(Snowflake::new(config.bot.user_id))
        .with_max_message_length(config.bot.max_message_length);

    let ctx = EngineContextBuilder::new()
        .preference_repo(preference_repo)
        .auto_thread_repo(auto_thread_repo)
        .platform(platform)
        .settings(settings)
        .build()
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Engine::new(ctx))
}

/// Subscribe to the configured event channel
pub fn create_subscriber(config: &AppConfig) -> Result<Subscriber, AppError> {
    tracing::info!(channel = %config.redis.events_channel, "Subscribing to event channel...");
    SubscriberBuilder::new()
        .redis_url(&config.redis.url)
        .reconnect_delay_ms(config.redis.reconnect_delay_ms)
        .subscribe(EventChannel::parse(&config.redis.events_channel))
        .build()
        .map_err(|e| AppError::Cache(e.to_string()))
}

/// Decode one pub/sub message and spawn its handler
pub fn dispatch(engine: &Engine, message: ReceivedMessage) {
    let Some(envelope) = message.envelope else {
        tracing::warn!(
            channel = ?message.channel,
            payload_len = message.payload.len(),
            "Dropping malformed event payload"
        );
        return;
    };

    let event_type = envelope.event_type.clone();
    match envelope.into_inbound() {
        Ok(Some(event)) => {
            let engine = engine.clone();
            tokio::spawn(async move { engine.handle(event).await });
        }
        Ok(None) => {
            tracing::trace!(event_type = %event_type, "Ignoring unhandled event type");
        }
        Err(e) => {
            tracing::warn!(event_type = %event_type, error = %e, "Dropping malformed event");
        }
    }
}

/// Receive events until the subscriber closes or the process is interrupted
pub async fn run_event_loop(engine: Engine, subscriber: Subscriber) {
    let mut receiver = subscriber.receiver();

    loop {
        tokio::select! {
            received = receiver.recv() => match received {
                Ok(message) => dispatch(&engine, message),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "Event loop lagged behind; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::warn!("Event channel closed");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    if let Err(e) = subscriber.shutdown() {
        tracing::debug!(error = %e, "Subscriber already stopped");
    }
    tracing::info!("Event loop ended");
}

/// Run the gateway with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let engine = create_engine(&config).await?;
    let subscriber = create_subscriber(&config)?;

    tracing::info!(bot_user_id = config.bot.user_id, "Engine ready");
    run_event_loop(engine, subscriber).await;
    Ok(())
}
