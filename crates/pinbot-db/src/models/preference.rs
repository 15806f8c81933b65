//! Channel preference database model

use sqlx::FromRow;

/// Database model for channel_preferences table
#[derive(Debug, Clone, FromRow)]
pub struct PreferenceModel {
    pub guild_id: i64,
    pub channel_id: Option<i64>,
    pub kind: String,
    pub value: i32,
}
