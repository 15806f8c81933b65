//! ChannelPreference entity <-> model mapper

use pinbot_core::entities::{ChannelPreference, PreferenceKind};
use pinbot_core::error::DomainError;
use pinbot_core::value_objects::Snowflake;

use crate::models::PreferenceModel;

impl TryFrom<PreferenceModel> for ChannelPreference {
    type Error = DomainError;

    fn try_from(model: PreferenceModel) -> Result<Self, Self::Error> {
        let kind = PreferenceKind::from_str(&model.kind).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown preference kind: {}", model.kind))
        })?;
        let value = u32::try_from(model.value).map_err(|_| {
            DomainError::DatabaseError(format!("negative preference value: {}", model.value))
        })?;

        Ok(ChannelPreference {
            guild_id: Snowflake::new(model.guild_id),
            channel_id: model.channel_id.map(Snowflake::new),
            kind,
            value,
        })
    }
}

/// Column values for inserting a preference
pub struct PreferenceInsert {
    pub guild_id: i64,
    pub channel_id: Option<i64>,
    pub kind: &'static str,
    pub value: i32,
}

impl TryFrom<&ChannelPreference> for PreferenceInsert {
    type Error = DomainError;

    /// Values beyond the `INTEGER` column are rejected rather than clamped
    fn try_from(preference: &ChannelPreference) -> Result<Self, Self::Error> {
        let value = i32::try_from(preference.value)
            .map_err(|_| DomainError::InvalidLimit(i64::from(preference.value)))?;

        Ok(Self {
            guild_id: preference.guild_id.into_inner(),
            channel_id: preference.channel_id.map(Snowflake::into_inner),
            kind: preference.kind.as_str(),
            value,
        })
    }
}
