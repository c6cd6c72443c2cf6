//! HTTP transport for the chat-completions endpoint.
//!
//! [`CompletionTransport`] is the seam between orchestration and the
//! network: the engine hands it a request body and gets back a byte stream.
//! Tests script it; production uses [`HttpTransport`] over reqwest.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use futures_util::stream::StreamExt;
use std::pin::Pin;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EaselError, Result};

/// Raw response bytes, chunked however the network delivers them.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Opens one streaming completion request.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn open_stream(&self, body: &serde_json::Value) -> Result<ByteStream>;
}

/// Production transport over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.trimmed_base_url()),
        }
    }

    /// Use an existing reqwest client (shared pools, custom timeouts).
    pub fn with_client(client: reqwest::Client, config: &EngineConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.trimmed_base_url()),
        }
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn open_stream(&self, body: &serde_json::Value) -> Result<ByteStream> {
        debug!(endpoint = %self.endpoint, "opening completion stream");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| EaselError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EaselError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| EaselError::Stream(e.to_string())));
        Ok(Box::pin(stream))
    }
}
