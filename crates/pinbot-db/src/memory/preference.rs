//! In-memory PreferenceRepository

use async_trait::async_trait;
use dashmap::DashMap;

use pinbot_core::entities::{ChannelPreference, PreferenceKind};
use pinbot_core::traits::{PreferenceRepository, RepoResult};
use pinbot_core::value_objects::Snowflake;

type ScopeKey = (Snowflake, Option<Snowflake>, PreferenceKind);

/// `DashMap`-backed preference store keyed by scope
#[derive(Debug, Default)]
pub struct MemoryPreferenceRepository {
    records: DashMap<ScopeKey, u32>,
}

impl MemoryPreferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceRepository for MemoryPreferenceRepository {
    async fn get(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
    ) -> RepoResult<Option<ChannelPreference>> {
        Ok(self
            .records
            .get(&(guild_id, channel_id, kind))
            .map(|value| ChannelPreference {
                guild_id,
                channel_id,
                kind,
                value: *value,
            }))
    }

    async fn put(&self, preference: &ChannelPreference) -> RepoResult<()> {
        self.records.insert(
            (preference.guild_id, preference.channel_id, preference.kind),
            preference.value,
        );
        Ok(())
    }

    async fn delete(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
    ) -> RepoResult<bool> {
        Ok(self.records.remove(&(guild_id, channel_id, kind)).is_some())
    }

    async fn get_all(
        &self,
        guild_id: Snowflake,
        kind: PreferenceKind,
    ) -> RepoResult<Vec<ChannelPreference>> {
        let mut all: Vec<ChannelPreference> = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == guild_id && entry.key().2 == kind)
            .map(|entry| ChannelPreference {
                guild_id,
                channel_id: entry.key().1,
                kind,
                value: *entry.value(),
            })
            .collect();

        // None sorts before Some, so the guild default comes first
        all.sort_by_key(|pref| pref.channel_id);
        Ok(all)
    }
}
