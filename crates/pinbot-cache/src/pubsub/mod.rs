//! Redis Pub/Sub module.
//!
//! Receives platform events published by the upstream gateway connection.

mod channels;
mod envelope;
mod subscriber;

pub use channels::EventChannel;
pub use envelope::EventEnvelope;
pub use subscriber::{
    ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberError, SubscriberResult,
};
