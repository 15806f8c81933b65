//! PostgreSQL implementation of PreferenceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pinbot_core::entities::{ChannelPreference, PreferenceKind};
use pinbot_core::traits::{PreferenceRepository, RepoResult};
use pinbot_core::value_objects::Snowflake;

use crate::mappers::PreferenceInsert;
use crate::models::PreferenceModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PreferenceRepository
#[derive(Clone)]
pub struct PgPreferenceRepository {
    pool: PgPool,
}

impl PgPreferenceRepository {
    /// Create a new PgPreferenceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    #[instrument(skip(self))]
    async fn get(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
    ) -> RepoResult<Option<ChannelPreference>> {
        let result = sqlx::query_as::<_, PreferenceModel>(
            r#"
            SELECT guild_id, channel_id, kind, value
            FROM channel_preferences
            WHERE guild_id = $1 AND channel_id IS NOT DISTINCT FROM $2 AND kind = $3
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(channel_id.map(Snowflake::into_inner))
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ChannelPreference::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn put(&self, preference: &ChannelPreference) -> RepoResult<()> {
        let insert = PreferenceInsert::try_from(preference)?;

        sqlx::query(
            r#"
            INSERT INTO channel_preferences (guild_id, channel_id, kind, value)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (guild_id, (COALESCE(channel_id, 0)), kind)
            DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(insert.guild_id)
        .bind(insert.channel_id)
        .bind(insert.kind)
        .bind(insert.value)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM channel_preferences
            WHERE guild_id = $1 AND channel_id IS NOT DISTINCT FROM $2 AND kind = $3
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(channel_id.map(Snowflake::into_inner))
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn get_all(
        &self,
        guild_id: Snowflake,
        kind: PreferenceKind,
    ) -> RepoResult<Vec<ChannelPreference>> {
        let results = sqlx::query_as::<_, PreferenceModel>(
            r#"
            SELECT guild_id, channel_id, kind, value
            FROM channel_preferences
            WHERE guild_id = $1 AND kind = $2
            ORDER BY channel_id NULLS FIRST
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ChannelPreference::try_from).collect()
    }
}
