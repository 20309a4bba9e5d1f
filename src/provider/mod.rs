//! Transport seam and the Gemini provider.

pub mod google;
pub mod http;

use async_trait::async_trait;

use crate::error::GroundedError;

/// Status and raw body of one HTTP round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON POST.
///
/// Implementations report connection-level failures (refused, reset,
/// timeout, unreadable body) as [`GroundedError::Transport`]; any HTTP status,
/// successful or not, is returned as a [`TransportResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &str) -> Result<TransportResponse, GroundedError>;
}
