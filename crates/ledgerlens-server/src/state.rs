//! Shared application state.

use std::sync::Arc;

use ledgerlens_core::LedgerLensConfig;
use ledgerlens_docai::{DocAiClient, DocumentTextProvider};

use crate::session::SessionCache;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: LedgerLensConfig,
    pub sessions: SessionCache,
    /// Document-understanding service, when configured.
    pub docai: Option<Arc<dyn DocumentTextProvider>>,
}

impl AppState {
    pub fn new(config: LedgerLensConfig) -> Self {
        let docai: Option<Arc<dyn DocumentTextProvider>> = config.docai_url.as_ref().map(|url| {
            Arc::new(DocAiClient::new(url.clone(), config.docai_api_key.clone()))
                as Arc<dyn DocumentTextProvider>
        });

        Self {
            sessions: SessionCache::new(config.session_capacity, config.session_ttl),
            docai,
            config,
        }
    }

    /// Build state with an explicit text provider (tests use a stub).
    #[cfg(test)]
    pub fn with_provider(config: LedgerLensConfig, provider: Arc<dyn DocumentTextProvider>) -> Self {
        Self {
            sessions: SessionCache::new(config.session_capacity, config.session_ttl),
            docai: Some(provider),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::Result;
    use std::time::Duration;

    fn config() -> LedgerLensConfig {
        LedgerLensConfig {
            port: 0,
            session_capacity: 4,
            session_ttl: Duration::from_secs(60),
            docai_url: None,
            docai_api_key: None,
        }
    }

    struct FixedText;

    #[async_trait::async_trait]
    impl DocumentTextProvider for FixedText {
        async fn extract_text(&self, _bytes: &[u8]) -> Result<String> {
            Ok("HDFC Bank".to_string())
        }
    }

    #[tokio::test]
    async fn test_provider_follows_configuration() {
        // No DOCAI_URL means the ML pipeline stays disabled.
        assert!(AppState::new(config()).docai.is_none());

        let state = AppState::with_provider(config(), Arc::new(FixedText));
        let text = state.docai.as_ref().unwrap().extract_text(b"%PDF").await.unwrap();
        assert_eq!(text, "HDFC Bank");
    }
}
