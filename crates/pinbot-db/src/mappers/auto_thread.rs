//! AutoThreadConfig entity <-> model mapper

use pinbot_core::entities::{AutoArchiveDuration, AutoThreadConfig};
use pinbot_core::error::DomainError;
use pinbot_core::value_objects::Snowflake;

use crate::models::AutoThreadModel;

impl TryFrom<AutoThreadModel> for AutoThreadConfig {
    type Error = DomainError;

    fn try_from(model: AutoThreadModel) -> Result<Self, Self::Error> {
        let duration = u32::try_from(model.duration_minutes)
            .ok()
            .and_then(AutoArchiveDuration::from_minutes)
            .ok_or_else(|| {
                DomainError::DatabaseError(format!(
                    "unsupported archive duration: {}",
                    model.duration_minutes
                ))
            })?;

        Ok(AutoThreadConfig::new(
            Snowflake::new(model.guild_id),
            Snowflake::new(model.channel_id),
            duration,
        ))
    }
}
