//! Document-understanding service client.

use async_trait::async_trait;
use ledgerlens_core::{Error, Result};
use serde::Deserialize;

/// Capability for turning raw document bytes into plain text.
///
/// The production implementation calls an external OCR/understanding service;
/// tests substitute a stub so pipeline logic never needs the network.
#[async_trait]
pub trait DocumentTextProvider: Send + Sync {
    async fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    text: String,
}

/// HTTP client for the document-understanding service.
///
/// POSTs the PDF bytes to the configured processor endpoint and reads back
/// `{ "text": "..." }`.
pub struct DocAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl DocAiClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[async_trait]
impl DocumentTextProvider for DocAiClient {
    async fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/pdf")
            .body(bytes.to_vec());

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::DocAi(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::DocAi(format!("processor returned {status}")));
        }

        let body: ProcessResponse = response
            .json()
            .await
            .map_err(|e| Error::DocAi(format!("invalid processor response: {e}")))?;

        tracing::debug!(chars = body.text.len(), "document text received");
        Ok(body.text)
    }
}
