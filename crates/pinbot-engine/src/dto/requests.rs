//! Request DTOs for configuration commands

use serde::Deserialize;
use validator::Validate;

/// Reaction limit as typed by an administrator
///
/// The upper bound is the largest value the `INTEGER` storage column holds.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct SetLimitRequest {
    #[validate(range(min = 0, max = 2_147_483_647_i64, message = "Limit must be between 0 and 2147483647"))]
    pub limit: i64,
}

impl SetLimitRequest {
    pub fn new(limit: i64) -> Self {
        Self { limit }
    }
}
