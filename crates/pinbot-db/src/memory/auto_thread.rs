//! In-memory AutoThreadRepository

use async_trait::async_trait;
use dashmap::DashMap;

use pinbot_core::entities::AutoThreadConfig;
use pinbot_core::traits::{AutoThreadRepository, RepoResult};
use pinbot_core::value_objects::Snowflake;

/// `DashMap`-backed auto-thread store keyed by channel
#[derive(Debug, Default)]
pub struct MemoryAutoThreadRepository {
    records: DashMap<Snowflake, AutoThreadConfig>,
}

impl MemoryAutoThreadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AutoThreadRepository for MemoryAutoThreadRepository {
    async fn get(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<Option<AutoThreadConfig>> {
        Ok(self
            .records
            .get(&channel_id)
            .filter(|config| config.guild_id == guild_id)
            .map(|config| config.clone()))
    }

    async fn put(&self, config: &AutoThreadConfig) -> RepoResult<()> {
        self.records.insert(config.channel_id, config.clone());
        Ok(())
    }

    async fn delete(&self, guild_id: Snowflake, channel_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .records
            .remove_if(&channel_id, |_, config| config.guild_id == guild_id)
            .is_some())
    }

    async fn get_all(&self, guild_id: Snowflake) -> RepoResult<Vec<AutoThreadConfig>> {
        let mut all: Vec<AutoThreadConfig> = self
            .records
            .iter()
            .filter(|entry| entry.guild_id == guild_id)
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|config| config.channel_id);
        Ok(all)
    }
}
