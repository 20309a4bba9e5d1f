//! reqwest-backed transport and HTTP helpers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use super::{Transport, TransportResponse};
use crate::config::ClientConfig;
use crate::error::GroundedError;

fn build_client(timeout: Duration, connect_timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(10)
        .build()
}

/// Default headers for a JSON API.
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Map a non-success status to an API error.
pub fn status_to_error(status: u16, body: &str) -> GroundedError {
    GroundedError::api(status, body)
}

/// Replace the value of a `key=` query parameter so URLs can be logged.
pub fn redact_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("key", _)) => "key=<redacted>".to_string(),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}

/// [`Transport`] over a `reqwest::Client`.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Transport with the timeouts from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, GroundedError> {
        let client = build_client(config.timeout, config.connect_timeout)
            .map_err(|e| GroundedError::ClientBuild(e.to_string()))?;
        Ok(Self::new(client))
    }
}

fn transport_error(e: reqwest::Error) -> GroundedError {
    // reqwest embeds the full URL (and with it the key) in its messages.
    GroundedError::Transport(e.without_url().to_string())
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &str) -> Result<TransportResponse, GroundedError> {
        let response = self
            .client
            .post(url)
            .headers(json_headers())
            .body(body.to_string())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(TransportResponse { status, body })
    }
}
