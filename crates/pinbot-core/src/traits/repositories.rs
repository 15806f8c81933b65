//! Repository traits (ports) - the persistence contract
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. A `None` channel id always means the
//! guild-wide default scope.

use async_trait::async_trait;

use crate::entities::{AutoThreadConfig, ChannelPreference, PreferenceKind};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Preference Repository
// ============================================================================

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Find the record for exactly this scope (no fallback)
    async fn get(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
    ) -> RepoResult<Option<ChannelPreference>>;

    /// Insert or replace the record for the preference's scope
    async fn put(&self, preference: &ChannelPreference) -> RepoResult<()>;

    /// Remove the record for exactly this scope, returning whether one existed
    async fn delete(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
        kind: PreferenceKind,
    ) -> RepoResult<bool>;

    /// All records of a kind in a guild, guild default first
    async fn get_all(
        &self,
        guild_id: Snowflake,
        kind: PreferenceKind,
    ) -> RepoResult<Vec<ChannelPreference>>;
}

// ============================================================================
// Auto-thread Repository
// ============================================================================

#[async_trait]
pub trait AutoThreadRepository: Send + Sync {
    /// Find the auto-thread record for a channel
    async fn get(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<Option<AutoThreadConfig>>;

    /// Insert or replace the record for the channel
    async fn put(&self, config: &AutoThreadConfig) -> RepoResult<()>;

    /// Remove the record, returning whether one existed
    async fn delete(&self, guild_id: Snowflake, channel_id: Snowflake) -> RepoResult<bool>;

    /// All auto-thread channels in a guild
    async fn get_all(&self, guild_id: Snowflake) -> RepoResult<Vec<AutoThreadConfig>>;
}
