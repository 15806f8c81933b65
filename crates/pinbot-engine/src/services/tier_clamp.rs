//! GuildTierClamp - caps auto-archive durations by guild service tier

use pinbot_core::entities::AutoArchiveDuration;

pub struct GuildTierClamp;

impl GuildTierClamp {
    /// Longest auto-archive duration a guild of `tier` may use
    pub const fn max_duration(tier: u8) -> AutoArchiveDuration {
        match tier {
            0 | 1 => AutoArchiveDuration::OneDay,
            2 => AutoArchiveDuration::ThreeDays,
            _ => AutoArchiveDuration::OneWeek,
        }
    }

    /// Clamp `requested` down to what `tier` allows
    pub fn clamp(requested: AutoArchiveDuration, tier: u8) -> AutoArchiveDuration {
        requested.min(Self::max_duration(tier))
    }
}
