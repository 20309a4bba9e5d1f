//! Google Gemini `generateContent` client with search grounding.

use std::sync::Arc;

use reqwest::Url;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::http::{redact_key, status_to_error, ReqwestTransport};
use super::Transport;
use crate::config::ClientConfig;
use crate::error::{is_retryable_status, GroundedError, Result};
use crate::generation::{extract_answer, parse_response};
use crate::types::{Generation, GenerationRequest, GenerationResponse};

/// Resilient client for search-grounded generation.
///
/// Holds no per-call state; clones share the transport.
///
/// ```no_run
/// use grounded::config::ClientConfig;
/// use grounded::provider::google::GoogleSearchClient;
///
/// # async fn example() -> grounded::error::Result<()> {
/// let client = GoogleSearchClient::new(ClientConfig::from_env())?;
/// if let Some(answer) = client.generate("What is the weather in Singapore?").await?.answer() {
///     println!("{answer}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GoogleSearchClient {
    config: ClientConfig,
    endpoint: Url,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for GoogleSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSearchClient")
            .field("config", &self.config)
            .field("endpoint", &redact_key(self.endpoint.as_str()))
            .finish()
    }
}

impl GoogleSearchClient {
    /// Create a client over reqwest.
    ///
    /// Fails with [`GroundedError::Configuration`] when no API key is set.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.require_api_key()?;
        let transport = ReqwestTransport::from_config(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let endpoint = endpoint_url(&config)?;
        Ok(Self {
            config,
            endpoint,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Ask `prompt` with search grounding enabled.
    pub async fn generate(&self, prompt: &str) -> Result<Generation> {
        self.generate_with_cancel(prompt, &CancellationToken::new())
            .await
    }

    /// Like [`generate`](Self::generate), aborting with
    /// [`GroundedError::Cancelled`] once `cancel` fires.
    pub async fn generate_with_cancel(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<Generation> {
        let request = GenerationRequest::grounded(prompt);
        let response = self.send(&request, cancel).await?;
        let generation = extract_answer(response);
        if !generation.is_answer() {
            debug!(model = %self.config.model, "Gemini response contained no usable candidate");
        }
        Ok(generation)
    }

    /// Send an arbitrary request and return the decoded response.
    pub async fn send(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResponse> {
        let body = serde_json::to_string(request)?;
        let url = self.endpoint.as_str();

        let text = self
            .config
            .retry_policy
            .run(cancel, |attempt| self.attempt(url, &body, attempt))
            .await?;

        parse_response(&text)
    }

    async fn attempt(&self, url: &str, body: &str, attempt: u32) -> Result<String> {
        debug!(
            model = %self.config.model,
            attempt,
            url = %redact_key(url),
            "Gemini generateContent"
        );

        let response = self.transport.post_json(url, body).await?;
        if response.is_success() {
            return Ok(response.body);
        }

        if is_retryable_status(response.status) {
            debug!(status = response.status, "Gemini returned transient status");
        }
        Err(status_to_error(response.status, &response.body))
    }
}

/// `{base_url}/{model}:generateContent?key={api_key}`
pub fn endpoint_url(config: &ClientConfig) -> Result<Url> {
    let api_key = config.require_api_key()?;
    let raw = format!(
        "{}/{}:generateContent",
        config.base_url.trim_end_matches('/'),
        config.model
    );
    let mut url = Url::parse(&raw).map_err(|e| {
        GroundedError::Configuration(format!("Invalid endpoint URL '{raw}': {e}"))
    })?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}
