//! Client configuration (code > env > `.env` file).

use std::fmt;
use std::path::Path;
use std::time::Duration;

use bon::Builder;

use crate::error::{GroundedError, Result};
use crate::util::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variables holding the API key, lowest precedence first.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];
pub const BASE_URL_ENV_VAR: &str = "GEMINI_BASE_URL";
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";

/// Settings for [`GoogleSearchClient`](crate::provider::google::GoogleSearchClient).
///
/// ```
/// use grounded::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .api_key("my-key")
///     .model("gemini-2.5-flash")
///     .build();
/// assert_eq!(config.require_api_key().unwrap(), "my-key");
/// ```
#[derive(Clone, Builder)]
pub struct ClientConfig {
    #[builder(into)]
    pub api_key: Option<String>,
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    #[builder(into, default = DEFAULT_MODEL.to_string())]
    pub model: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    #[builder(default = DEFAULT_CONNECT_TIMEOUT)]
    pub connect_timeout: Duration,
    #[builder(default)]
    pub retry_policy: RetryPolicy,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientConfig {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from a specific env file. Process environment wins over the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let entries = dotenvy::from_path_iter(path)
            .map_err(|e| {
                GroundedError::Configuration(format!("Cannot read {}: {e}", path.display()))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                GroundedError::Configuration(format!("Invalid entry in {}: {e}", path.display()))
            })?;

        Ok(Self::from_vars(|key| {
            std::env::var(key).ok().or_else(|| {
                entries
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
            })
        }))
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        for var in API_KEY_ENV_VARS {
            if let Some(key) = lookup(var).filter(|k| !k.trim().is_empty()) {
                config.api_key = Some(key);
            }
        }
        if let Some(url) = lookup(BASE_URL_ENV_VAR) {
            config.base_url = url;
        }
        if let Some(model) = lookup(MODEL_ENV_VAR) {
            config.model = model;
        }

        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// The credential, or a configuration error if it is missing or blank.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(GroundedError::Configuration(
                "GEMINI_API_KEY environment variable not set".to_string(),
            )),
        }
    }
}
