//! Convenience functions for one-off grounded questions.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::provider::google::GoogleSearchClient;
use crate::types::Generation;

/// Prompt + credential → grounded answer, using default settings.
///
/// A missing or blank credential fails with a configuration error before
/// any request is made.
pub async fn generate(prompt: &str, credential: Option<&str>) -> Result<Generation> {
    let config = ClientConfig::builder().maybe_api_key(credential).build();
    generate_with(config, prompt).await
}

/// Prompt → grounded answer with explicit settings.
pub async fn generate_with(config: ClientConfig, prompt: &str) -> Result<Generation> {
    let client = GoogleSearchClient::new(config)?;
    client.generate(prompt).await
}
