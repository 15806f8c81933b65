//! PostgreSQL implementation of AutoThreadRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pinbot_core::entities::AutoThreadConfig;
use pinbot_core::traits::{AutoThreadRepository, RepoResult};
use pinbot_core::value_objects::Snowflake;

use crate::models::AutoThreadModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AutoThreadRepository
#[derive(Clone)]
pub struct PgAutoThreadRepository {
    pool: PgPool,
}

impl PgAutoThreadRepository {
    /// Create a new PgAutoThreadRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AutoThreadRepository for PgAutoThreadRepository {
    #[instrument(skip(self))]
    async fn get(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<Option<AutoThreadConfig>> {
        let result = sqlx::query_as::<_, AutoThreadModel>(
            r#"
            SELECT guild_id, channel_id, duration_minutes
            FROM auto_threads
            WHERE guild_id = $1 AND channel_id = $2
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(channel_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AutoThreadConfig::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn put(&self, config: &AutoThreadConfig) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auto_threads (guild_id, channel_id, duration_minutes)
            VALUES ($1, $2, $3)
            ON CONFLICT (channel_id)
            DO UPDATE SET guild_id = EXCLUDED.guild_id, duration_minutes = EXCLUDED.duration_minutes
            "#,
        )
        .bind(config.guild_id.into_inner())
        .bind(config.channel_id.into_inner())
        .bind(i32::try_from(config.duration.minutes()).unwrap_or(i32::MAX))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, guild_id: Snowflake, channel_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM auto_threads WHERE guild_id = $1 AND channel_id = $2
            "#,
        )
        .bind(guild_id.into_inner())
        .bind(channel_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn get_all(&self, guild_id: Snowflake) -> RepoResult<Vec<AutoThreadConfig>> {
        let results = sqlx::query_as::<_, AutoThreadModel>(
            r#"
            SELECT guild_id, channel_id, duration_minutes
            FROM auto_threads
            WHERE guild_id = $1
            ORDER BY channel_id
            "#,
        )
        .bind(guild_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(AutoThreadConfig::try_from).collect()
    }
}
