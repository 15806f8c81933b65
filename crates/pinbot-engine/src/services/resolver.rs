//! ConfigResolver - channel override, else guild default, else nothing
//!
//! Fallback is keyed on record presence: a channel record with value 0
//! wins over any guild default.

use pinbot_core::entities::{ChannelPreference, PreferenceKind};
use pinbot_core::Snowflake;
use tracing::instrument;

use super::context::EngineContext;
use super::error::EngineResult;

/// Pick the effective value from the two scopes.
///
/// `None` means no record exists at either scope.
pub fn resolve_scopes(
    channel: Option<&ChannelPreference>,
    guild: Option<&ChannelPreference>,
) -> Option<u32> {
    channel.or(guild).map(|pref| pref.value)
}

/// Reads effective settings from the preference store
pub struct ConfigResolver<'a> {
    ctx: &'a EngineContext,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Resolve the effective value for a channel
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        kind: PreferenceKind,
    ) -> EngineResult<Option<u32>> {
        let repo = self.ctx.preference_repo();

        let channel = repo.get(guild_id, Some(channel_id), kind).await?;
        if channel.is_some() {
            return Ok(resolve_scopes(channel.as_ref(), None));
        }

        let guild = repo.get(guild_id, None, kind).await?;
        Ok(resolve_scopes(None, guild.as_ref()))
    }

    /// Resolve a limit, treating "no record" as disabled (0)
    pub async fn limit(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        kind: PreferenceKind,
    ) -> EngineResult<u32> {
        Ok(self.resolve(guild_id, channel_id, kind).await?.unwrap_or(0))
    }

    /// Resolve an on/off switch; "no record" is off
    pub async fn is_enabled(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        kind: PreferenceKind,
    ) -> EngineResult<bool> {
        Ok(self.limit(guild_id, channel_id, kind).await? > 0)
    }
}
