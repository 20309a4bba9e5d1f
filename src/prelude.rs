//! Convenience re-exports for common use.

pub use crate::config::ClientConfig;
pub use crate::error::{GroundedError, Result};
pub use crate::provider::google::GoogleSearchClient;
pub use crate::provider::{Transport, TransportResponse};
pub use crate::types::{Citation, GeneratedAnswer, Generation};
pub use crate::util::retry::RetryPolicy;
