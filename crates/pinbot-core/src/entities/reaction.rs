//! Reaction types - recognised markers and live reaction aggregates

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Emoji markers the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// 📌 - vote to pin
    Pin,
    /// 📍 - the bot's "already pinned" confirmation
    Pinned,
    /// 🔖 - bookmark for yourself
    Bookmark,
    /// 🧵 - vote to open a thread
    Thread,
}

impl Marker {
    /// Emoji for this marker
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Pin => "📌",
            Self::Pinned => "📍",
            Self::Bookmark => "🔖",
            Self::Thread => "🧵",
        }
    }

    /// Recognise an emoji name, `None` for anything else
    #[must_use]
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        match emoji {
            "📌" => Some(Self::Pin),
            "📍" => Some(Self::Pinned),
            "🔖" => Some(Self::Bookmark),
            "🧵" => Some(Self::Thread),
            _ => None,
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.emoji())
    }
}

/// Live aggregate for one emoji on one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub emoji: String,
    /// Raw count as reported by the platform
    pub count: u32,
    /// Users who currently hold this reaction
    #[serde(default)]
    pub reactor_ids: Vec<Snowflake>,
}

impl ReactionSummary {
    /// Create a new ReactionSummary
    pub fn new(emoji: impl Into<String>, reactor_ids: Vec<Snowflake>) -> Self {
        Self {
            emoji: emoji.into(),
            count: reactor_ids.len() as u32,
            reactor_ids,
        }
    }

    /// Check if reaction uses a specific emoji
    #[inline]
    pub fn is_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }

    /// Number of unique users holding the reaction
    pub fn distinct_count(&self) -> u32 {
        self.distinct_reactors().len() as u32
    }

    /// Unique reactor ids, in first-seen order
    pub fn distinct_reactors(&self) -> Vec<Snowflake> {
        let mut seen = HashSet::with_capacity(self.reactor_ids.len());
        self.reactor_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }
}
