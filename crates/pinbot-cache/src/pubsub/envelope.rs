//! Wire envelope for events published on the event channel.

use pinbot_core::InboundEvent;
use serde::{Deserialize, Serialize};

/// `{"event_type": "...", "data": {...}}` as published upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl EventEnvelope {
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Decode into a domain event.
    ///
    /// `Ok(None)` means the event type is not one the bot handles.
    pub fn into_inbound(self) -> Result<Option<InboundEvent>, serde_json::Error> {
        InboundEvent::decode(&self.event_type, self.data)
    }
}
