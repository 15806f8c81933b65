//! Domain entities - core business objects

mod auto_thread;
mod channel;
mod guild;
mod message;
mod outgoing;
mod preference;
mod reaction;
mod thread;

pub use auto_thread::{AutoArchiveDuration, AutoThreadConfig};
pub use channel::{ChannelInfo, ChannelType};
pub use guild::GuildInfo;
pub use message::{MessageAuthor, MessageKind, MessageSnapshot};
pub use outgoing::{Embed, EmbedAuthor, EmbedField, OutgoingMessage};
pub use preference::{ChannelPreference, PreferenceKind};
pub use reaction::{Marker, ReactionSummary};
pub use thread::{NewThread, ThreadInfo};
