//! Guild info - the hosting server and its service tier

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Guild (server) info
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildInfo {
    pub id: Snowflake,
    pub name: String,
    /// Service (boost) tier, 0-3
    #[serde(default)]
    pub premium_tier: u8,
}

impl GuildInfo {
    /// Create a new GuildInfo
    pub fn new(id: Snowflake, name: impl Into<String>, premium_tier: u8) -> Self {
        Self {
            id,
            name: name.into(),
            premium_tier,
        }
    }
}
