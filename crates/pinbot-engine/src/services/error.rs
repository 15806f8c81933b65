//! Engine error types

use pinbot_core::{DomainError, PlatformError};

/// Engine error type
///
/// Handlers never let one of these escape; they are logged at the event
/// boundary and the event is dropped.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Domain rule violation or storage failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Chat platform call failed
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Missing dependency or malformed input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl EngineError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Check if the failure means the target no longer exists
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_not_found(),
            Self::Platform(e) => e.is_not_found(),
            Self::Validation(_) => false,
        }
    }

    /// Check if a later attempt could succeed (rate limit, outage)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Platform(e) => e.is_transient(),
            Self::Domain(_) | Self::Validation(_) => false,
        }
    }

    /// Get the error code for logs and command replies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Platform(PlatformError::NotFound(_)) => "PLATFORM_NOT_FOUND",
            Self::Platform(PlatformError::Forbidden(_)) => "PLATFORM_FORBIDDEN",
            Self::Platform(PlatformError::RateLimited { .. }) => "PLATFORM_RATE_LIMITED",
            Self::Platform(_) => "PLATFORM_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
