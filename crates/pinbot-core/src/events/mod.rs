//! Inbound events delivered by the platform

mod inbound_event;

pub use inbound_event::{
    EventEmoji, EventMember, EventUser, InboundEvent, MessageCreatedEvent, MessageDeletedEvent,
    ReactionEvent,
};
