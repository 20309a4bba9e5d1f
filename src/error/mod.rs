//! Error types for grounded.

use thiserror::Error;

/// Primary error type for all grounded operations.
///
/// An empty-but-valid response is not an error; see
/// [`Generation::NoAnswer`](crate::types::Generation::NoAnswer).
#[derive(Error, Debug)]
pub enum GroundedError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Server,
    Api,
    Serialization,
    Cancelled,
}

impl GroundedError {
    /// Create an API error from a status code and raw response body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::ClientBuild(_) => ErrorCategory::Configuration,
            Self::Transport(_) => ErrorCategory::Network,
            Self::Api { status, .. } if is_retryable_status(*status) => ErrorCategory::Server,
            Self::Api { .. } => ErrorCategory::Api,
            Self::Parse(_) => ErrorCategory::Serialization,
            Self::Cancelled => ErrorCategory::Cancelled,
        }
    }

    /// Whether another attempt could plausibly succeed.
    ///
    /// Matches the retry policy: transport failures and 500/503 responses.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Server
        )
    }

    /// HTTP status carried by an [`GroundedError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Statuses the generation endpoint uses for transient overload.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 500 | 503)
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GroundedError>;
