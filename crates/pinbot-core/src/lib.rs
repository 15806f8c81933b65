//! # pinbot-core
//!
//! Domain layer containing entities, value objects, inbound events, and the
//! persistence and platform port traits.
//! This crate has zero dependencies on infrastructure (database, HTTP, Redis).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AutoArchiveDuration, AutoThreadConfig, ChannelInfo, ChannelPreference, ChannelType, Embed,
    EmbedAuthor, EmbedField, GuildInfo, Marker, MessageAuthor, MessageKind, MessageSnapshot,
    NewThread, OutgoingMessage, PreferenceKind, ReactionSummary, ThreadInfo,
};
pub use error::{DomainError, PlatformError, PlatformResult};
pub use events::{
    EventEmoji, EventMember, EventUser, InboundEvent, MessageCreatedEvent, MessageDeletedEvent,
    ReactionEvent,
};
pub use traits::{AutoThreadRepository, ChatPlatform, PreferenceRepository, RepoResult};
pub use value_objects::{MessageFlags, Snowflake, SnowflakeParseError};
