//! Configuration from environment variables with defaults.

use std::time::Duration;

/// Top-level LedgerLens configuration.
#[derive(Debug, Clone)]
pub struct LedgerLensConfig {
    /// HTTP server port.
    pub port: u16,
    /// Maximum number of cached document sessions.
    pub session_capacity: usize,
    /// Time-to-live for a cached document session.
    pub session_ttl: Duration,
    /// Document-understanding service endpoint. None disables the ML pipeline.
    pub docai_url: Option<String>,
    /// API key sent as a bearer token to the document-understanding service.
    pub docai_api_key: Option<String>,
}

impl LedgerLensConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3003);

        let session_capacity = std::env::var("SESSION_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(256);

        let session_ttl_secs = std::env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let docai_url = std::env::var("DOCAI_URL").ok().filter(|s| !s.is_empty());
        let docai_api_key = std::env::var("DOCAI_API_KEY").ok().filter(|s| !s.is_empty());

        Self {
            port,
            session_capacity,
            session_ttl: Duration::from_secs(session_ttl_secs),
            docai_url,
            docai_api_key,
        }
    }
}
