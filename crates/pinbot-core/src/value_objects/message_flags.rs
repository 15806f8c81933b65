//! Message flags bitfield
//!
//! Only the bits the engine reads are named; unknown bits are preserved.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Platform message flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageFlags: u64 {
        /// Message was crossposted to following channels
        const CROSSPOSTED = 1 << 0;
        /// Message is a crosspost from another channel
        const IS_CROSSPOST = 1 << 1;
        /// Embeds are suppressed
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Message has a thread started from it
        const HAS_THREAD = 1 << 5;
        /// Only visible to the user who invoked an interaction
        const EPHEMERAL = 1 << 6;
    }
}

impl MessageFlags {
    /// Check whether a thread was started from the message
    #[inline]
    pub fn has_thread(&self) -> bool {
        self.contains(Self::HAS_THREAD)
    }
}

impl Serialize for MessageFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u64::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}
