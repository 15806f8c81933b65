//! ReactionClassifier - maps a reaction event to an intent or a reason to ignore it

use pinbot_core::entities::{Marker, MessageSnapshot, PreferenceKind};
use pinbot_core::{ReactionEvent, Snowflake};

/// Automation a reaction asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Pin,
    Bookmark,
    Thread,
}

impl Intent {
    /// Marker whose reactions count towards this intent
    pub const fn marker(self) -> Marker {
        match self {
            Self::Pin => Marker::Pin,
            Self::Bookmark => Marker::Bookmark,
            Self::Thread => Marker::Thread,
        }
    }

    /// Preference kind that configures this intent
    pub const fn kind(self) -> PreferenceKind {
        match self {
            Self::Pin => PreferenceKind::Pin,
            Self::Bookmark => PreferenceKind::Bookmark,
            Self::Thread => PreferenceKind::Thread,
        }
    }
}

/// Why an event was dropped without action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Outside a guild, or the reactor could not be resolved as a member
    NoGuildContext,
    UnrecognisedEmoji,
    /// The message was deleted or could not be fetched
    MessageUnavailable,
    /// Boost announcements, join notices and other system posts
    SystemMessage,
    /// The bot placing its own "pinned" marker
    BotMarker,
    /// Pinning is not offered inside threads
    ThreadContext,
}

/// Result of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Act(Intent),
    /// A user reacted with the "pinned" marker; strip it and tell them to use 📌
    WrongPinMarker,
    Ignore(IgnoreReason),
}

#[derive(Debug, Clone, Copy)]
pub struct ReactionClassifier {
    bot_user_id: Snowflake,
}

impl ReactionClassifier {
    pub fn new(bot_user_id: Snowflake) -> Self {
        Self { bot_user_id }
    }

    /// Rules that only need the event; run before the message is fetched.
    pub fn precheck(&self, event: &ReactionEvent) -> Result<Marker, IgnoreReason> {
        if event.guild_id.is_none() || !event.actor_is_member() {
            return Err(IgnoreReason::NoGuildContext);
        }

        event
            .emoji_name()
            .and_then(Marker::from_emoji)
            .ok_or(IgnoreReason::UnrecognisedEmoji)
    }

    /// Full classification. `message` is `None` when the fetch failed.
    pub fn classify(
        &self,
        event: &ReactionEvent,
        message: Option<&MessageSnapshot>,
    ) -> Classification {
        let marker = match self.precheck(event) {
            Ok(marker) => marker,
            Err(reason) => return Classification::Ignore(reason),
        };

        let Some(message) = message else {
            return Classification::Ignore(IgnoreReason::MessageUnavailable);
        };

        if !message.kind.is_user_content() {
            return Classification::Ignore(IgnoreReason::SystemMessage);
        }

        match marker {
            Marker::Pinned if self.is_bot(event) => Classification::Ignore(IgnoreReason::BotMarker),
            Marker::Pinned => Classification::WrongPinMarker,
            Marker::Pin => Classification::Act(Intent::Pin),
            Marker::Bookmark => Classification::Act(Intent::Bookmark),
            Marker::Thread => Classification::Act(Intent::Thread),
        }
    }

    fn is_bot(&self, event: &ReactionEvent) -> bool {
        event.user_id == self.bot_user_id || event.actor_is_bot()
    }
}
