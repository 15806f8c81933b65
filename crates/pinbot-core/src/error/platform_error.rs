//! Platform errors - failures reported by the chat-platform client

use thiserror::Error;

/// Errors from calls against the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode platform response: {0}")]
    Decode(String),
}

impl PlatformError {
    /// Check if the target no longer exists (deleted message, missing channel)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if a later attempt could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Transport(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::NotFound(_) | Self::Forbidden(_) | Self::Decode(_) => false,
        }
    }
}

/// Result type for platform calls
pub type PlatformResult<T> = Result<T, PlatformError>;
