//! Auto-thread database model

use sqlx::FromRow;

/// Database model for auto_threads table
#[derive(Debug, Clone, FromRow)]
pub struct AutoThreadModel {
    pub guild_id: i64,
    pub channel_id: i64,
    pub duration_minutes: i32,
}
