//! Redis Pub/Sub subscriber.
//!
//! Listens on a fixed set of event channels chosen at build time and fans
//! payloads out over a broadcast channel. A dropped connection is retried
//! after a fixed delay until the subscriber is shut down.

use crate::pubsub::{EventChannel, EventEnvelope};
use futures_util::StreamExt;
use redis::Client;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// Capacity of the fan-out channel
const EVENT_BUFFER: usize = 1024;

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("No event channels configured")]
    NoChannels,

    #[error("Subscriber already stopped")]
    Stopped,
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// Received message from Pub/Sub
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Channel the message was received on
    pub channel: EventChannel,
    /// Parsed envelope (if the payload is a valid envelope)
    pub envelope: Option<EventEnvelope>,
    /// Raw payload
    pub payload: String,
}

impl ReceivedMessage {
    /// Create from raw Redis message
    pub fn from_redis(channel_name: &str, payload: String) -> Self {
        Self {
            channel: EventChannel::parse(channel_name),
            envelope: serde_json::from_str(&payload).ok(),
            payload,
        }
    }
}

/// Handle to the background listener
pub struct Subscriber {
    events_tx: broadcast::Sender<ReceivedMessage>,
    shutdown_tx: watch::Sender<bool>,
}

impl Subscriber {
    /// Get a receiver for incoming messages
    #[must_use]
    pub fn receiver(&self) -> broadcast::Receiver<ReceivedMessage> {
        self.events_tx.subscribe()
    }

    /// Stop the listener; it exits at its next await point
    pub fn shutdown(&self) -> SubscriberResult<()> {
        self.shutdown_tx.send(true).map_err(|_| SubscriberError::Stopped)
    }

    /// Reconnect loop, one pass per Redis connection
    async fn listen(
        client: Client,
        channels: Vec<String>,
        reconnect_delay: Duration,
        events_tx: broadcast::Sender<ReceivedMessage>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                result = Self::pump(&client, &channels, &events_tx) => match result {
                    Ok(()) => tracing::warn!("Pub/Sub stream ended, reconnecting"),
                    Err(e) => tracing::error!(error = %e, "Subscriber error, reconnecting"),
                },
                _ = shutdown_rx.changed() => break,
            }

            tokio::select! {
                () = tokio::time::sleep(reconnect_delay) => {}
                _ = shutdown_rx.changed() => break,
            }
        }

        tracing::info!("Subscriber stopped");
    }

    /// Forward messages from one connection until its stream ends
    async fn pump(
        client: &Client,
        channels: &[String],
        events_tx: &broadcast::Sender<ReceivedMessage>,
    ) -> SubscriberResult<()> {
        let mut pubsub = client.get_async_pubsub().await?;
        for channel in channels {
            pubsub.subscribe(channel).await?;
        }
        tracing::info!(?channels, "Subscriber connected to Redis");

        let mut stream = pubsub.on_message();
        while let Some(msg) = stream.next().await {
            let channel = msg.get_channel_name().to_string();
            let payload: String = match msg.get_payload() {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(channel = %channel, error = %e, "Skipping non-text payload");
                    continue;
                }
            };

            tracing::trace!(channel = %channel, "Received Pub/Sub message");
            // No receivers is fine
            let _ = events_tx.send(ReceivedMessage::from_redis(&channel, payload));
        }

        Ok(())
    }
}

/// Builder for subscriber
pub struct SubscriberBuilder {
    redis_url: String,
    reconnect_delay_ms: u64,
    channels: Vec<EventChannel>,
}

impl SubscriberBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            reconnect_delay_ms: 1000,
            channels: Vec::new(),
        }
    }

    /// Set Redis URL
    #[must_use]
    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = url.into();
        self
    }

    /// Set reconnection delay
    #[must_use]
    pub fn reconnect_delay_ms(mut self, delay: u64) -> Self {
        self.reconnect_delay_ms = delay;
        self
    }

    /// Add a channel to listen on
    #[must_use]
    pub fn subscribe(mut self, channel: EventChannel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Validate the settings and spawn the listener
    ///
    /// Must be called inside a Tokio runtime.
    pub fn build(self) -> SubscriberResult<Subscriber> {
        if self.channels.is_empty() {
            return Err(SubscriberError::NoChannels);
        }
        let client = Client::open(self.redis_url.as_str())?;
        let channels = self.channels.iter().map(EventChannel::name).collect();

        let (events_tx, _) = broadcast::channel(EVENT_BUFFER);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(Subscriber::listen(
            client,
            channels,
            Duration::from_millis(self.reconnect_delay_ms),
            events_tx.clone(),
            shutdown_rx,
        ));

        Ok(Subscriber {
            events_tx,
            shutdown_tx,
        })
    }
}

impl Default for SubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}
