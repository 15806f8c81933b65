//! Preference service
//!
//! The configuration command surface: set, unset and list reaction limits,
//! bookmark switches and auto-thread channels. Called directly by the
//! administrative layer; the engine only ever reads what this writes.

use pinbot_core::entities::{AutoArchiveDuration, AutoThreadConfig, ChannelPreference, PreferenceKind};
use pinbot_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    AutoThreadEntry, PreferenceChange, PreferenceEntry, SetLimitRequest, ThreadSettings,
    GUILD_SCOPE_LABEL,
};

use super::audit::AUDIT_TARGET;
use super::context::EngineContext;
use super::error::EngineResult;

/// Preference service
pub struct PreferenceService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> PreferenceService<'a> {
    /// Create a new PreferenceService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Reaction limits
    // ========================================================================

    /// Set the pin or thread limit for a channel, or the guild default when
    /// `channel_id` is `None`. A limit of 0 disables the feature at that scope.
    #[instrument(skip(self))]
    pub async fn set_limit(
        &self,
        actor: Snowflake,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
        limit: i64,
    ) -> EngineResult<PreferenceChange> {
        if !kind.is_limit() {
            return Err(DomainError::NotALimit(kind.to_string()).into());
        }

        let request = SetLimitRequest::new(limit);
        request
            .validate()
            .map_err(|_| DomainError::InvalidLimit(limit))?;
        let limit = u32::try_from(request.limit).map_err(|_| DomainError::InvalidLimit(limit))?;

        let preference = ChannelPreference::limit(guild_id, channel_id, kind, limit);
        self.ctx.preference_repo().put(&preference).await?;

        info!(
            target: AUDIT_TARGET,
            actor = %actor,
            channel = ?channel_id,
            guild = %guild_id,
            "Set {} limit to {} for {}",
            kind,
            limit,
            scope_of(channel_id)
        );

        Ok(if limit == 0 {
            PreferenceChange::Disabled
        } else {
            PreferenceChange::Updated { limit }
        })
    }

    /// Switch bookmarks on or off for a channel or the guild default
    #[instrument(skip(self))]
    pub async fn set_bookmarks(
        &self,
        actor: Snowflake,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        enabled: bool,
    ) -> EngineResult<()> {
        let preference = ChannelPreference::bookmark(guild_id, channel_id, enabled);
        self.ctx.preference_repo().put(&preference).await?;

        info!(
            target: AUDIT_TARGET,
            actor = %actor,
            channel = ?channel_id,
            guild = %guild_id,
            "{} bookmarks for {}",
            if enabled { "Enabled" } else { "Disabled" },
            scope_of(channel_id)
        );
        Ok(())
    }

    /// Remove the record at exactly this scope
    ///
    /// Returns `false` when there was nothing to remove.
    #[instrument(skip(self))]
    pub async fn unset(
        &self,
        actor: Snowflake,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
    ) -> EngineResult<bool> {
        let removed = self
            .ctx
            .preference_repo()
            .delete(guild_id, channel_id, kind)
            .await?;

        if removed {
            info!(
                target: AUDIT_TARGET,
                actor = %actor,
                channel = ?channel_id,
                guild = %guild_id,
                "Removed {} setting for {}",
                kind,
                scope_of(channel_id)
            );
        }
        Ok(removed)
    }

    /// All records of a kind in the guild, guild default first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        guild_id: Snowflake,
        kind: PreferenceKind,
    ) -> EngineResult<Vec<PreferenceEntry>> {
        let records = self.ctx.preference_repo().get_all(guild_id, kind).await?;

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let scope = match record.channel_id {
                None => GUILD_SCOPE_LABEL.to_string(),
                Some(channel_id) => match self.ctx.platform().fetch_channel(channel_id).await {
                    Ok(channel) => channel.display_name(),
                    Err(_) => channel_id.to_string(),
                },
            };
            entries.push(PreferenceEntry {
                scope,
                channel_id: record.channel_id,
                value: record.value,
            });
        }
        Ok(entries)
    }

    /// Guild-wide thread limit plus the channel's own override, if any
    #[instrument(skip(self))]
    pub async fn get_thread_settings(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> EngineResult<ThreadSettings> {
        let repo = self.ctx.preference_repo();
        let guild = repo.get(guild_id, None, PreferenceKind::Thread).await?;
        let channel = repo
            .get(guild_id, Some(channel_id), PreferenceKind::Thread)
            .await?;

        Ok(ThreadSettings {
            guild_limit: guild.map(|p| p.value),
            channel_limit: channel.map(|p| p.value),
        })
    }

    // ========================================================================
    // Auto-threads
    // ========================================================================

    /// Open a thread on every new post in the channel, archived after `duration`
    /// (`1h`, `1d`, `3d` or `7d`)
    #[instrument(skip(self))]
    pub async fn set_autothread(
        &self,
        actor: Snowflake,
        guild_id: Snowflake,
        channel_id: Snowflake,
        duration: &str,
    ) -> EngineResult<AutoArchiveDuration> {
        let duration = AutoArchiveDuration::from_label(duration)
            .ok_or_else(|| DomainError::InvalidDuration(duration.to_string()))?;

        let config = AutoThreadConfig::new(guild_id, channel_id, duration);
        self.ctx.auto_thread_repo().put(&config).await?;

        info!(
            target: AUDIT_TARGET,
            actor = %actor,
            channel = %channel_id,
            guild = %guild_id,
            "Enabled automatic threads with {} archive duration",
            duration.label()
        );
        Ok(duration)
    }

    /// Stop automatic threads in a channel; `false` when none were configured
    #[instrument(skip(self))]
    pub async fn unset_autothread(
        &self,
        actor: Snowflake,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> EngineResult<bool> {
        let removed = self
            .ctx
            .auto_thread_repo()
            .delete(guild_id, channel_id)
            .await?;

        if removed {
            info!(
                target: AUDIT_TARGET,
                actor = %actor,
                channel = %channel_id,
                guild = %guild_id,
                "Disabled automatic threads"
            );
        }
        Ok(removed)
    }

    /// Auto-thread channels in the guild. Records for deleted channels are
    /// removed along the way.
    #[instrument(skip(self))]
    pub async fn list_autothreads(&self, guild_id: Snowflake) -> EngineResult<Vec<AutoThreadEntry>> {
        let repo = self.ctx.auto_thread_repo();
        let configs = repo.get_all(guild_id).await?;

        let mut entries = Vec::with_capacity(configs.len());
        for config in configs {
            match self.ctx.platform().fetch_channel(config.channel_id).await {
                Ok(channel) => entries.push(AutoThreadEntry {
                    channel_id: config.channel_id,
                    channel_name: channel.display_name(),
                    duration: config.duration,
                }),
                Err(e) if e.is_not_found() => {
                    repo.delete(guild_id, config.channel_id).await?;
                    info!(
                        target: AUDIT_TARGET,
                        actor = "-",
                        channel = %config.channel_id,
                        guild = %guild_id,
                        "Removed automatic thread setting for deleted channel"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(entries)
    }
}

fn scope_of(channel_id: Option<Snowflake>) -> String {
    channel_id.map_or_else(|| GUILD_SCOPE_LABEL.to_string(), |c| format!("channel {c}"))
}
