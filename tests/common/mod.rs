//! Shared test helpers and scripted transport.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;

use grounded::config::ClientConfig;
use grounded::error::GroundedError;
use grounded::provider::google::GoogleSearchClient;
use grounded::provider::{Transport, TransportResponse};

pub const TEST_KEY: &str = "test-key";
pub const TEST_MODEL: &str = "gemini-test";

/// One recorded call.
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub body: String,
    pub at: Instant,
}

/// A transport that replays queued outcomes in order.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<TransportResponse, GroundedError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.respond(status, &body.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(GroundedError::Transport(message.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &str) -> Result<TransportResponse, GroundedError> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            body: body.to_string(),
            at: Instant::now(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GroundedError::Transport("script exhausted".to_string())))
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::default()
        .with_api_key(TEST_KEY)
        .with_base_url("https://gemini.test/v1beta/models")
        .with_model(TEST_MODEL)
}

pub fn scripted_client(transport: &Arc<ScriptedTransport>) -> GoogleSearchClient {
    GoogleSearchClient::with_transport(test_config(), transport.clone()).expect("client")
}

pub fn answer_body(text: &str) -> Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}
