//! # pinbot-cache
//!
//! Redis pub/sub plumbing that feeds platform events to the engine.
//!
//! ## Example
//!
//! ```ignore
//! use pinbot_cache::{EventChannel, SubscriberBuilder};
//!
//! let subscriber = SubscriberBuilder::new()
//!     .redis_url("redis://127.0.0.1:6379")
//!     .subscribe(EventChannel::parse("broadcast"))
//!     .build()?;
//!
//! let mut rx = subscriber.receiver();
//! while let Ok(message) = rx.recv().await {
//!     if let Some(Ok(Some(event))) = message.envelope.map(|e| e.into_inbound()) {
//!         // dispatch event
//!     }
//! }
//! ```

pub mod pubsub;

pub use pubsub::{
    EventChannel, EventEnvelope, ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberError,
    SubscriberResult,
};
