//! ML-assisted statement parsing.
//!
//! Text acquisition is delegated to an external document-understanding service
//! behind the [`DocumentTextProvider`] capability; the pattern logic itself is
//! pure and testable without network access. The patterns here are generic
//! (not issuer-specific): OCR output loses the layout cues the rule tables
//! anchor on, so this pipeline leans on proximity search instead.

pub mod client;
pub mod parse;

pub use client::{DocAiClient, DocumentTextProvider};
pub use parse::parse_ocr_text;

use ledgerlens_core::{ParsedStatement, Result};

/// Full ML-assisted pipeline: service OCR, then generic-pattern extraction.
///
/// Returns the OCR text alongside the record so callers can cache it for
/// follow-up queries. A service failure short-circuits into an error result.
pub async fn parse_with_docai(
    provider: &dyn DocumentTextProvider,
    bytes: &[u8],
) -> Result<(String, ParsedStatement)> {
    let text = provider.extract_text(bytes).await?;
    let record = parse_ocr_text(&text);
    Ok((text, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::Error;

    struct FixedText(&'static str);

    #[async_trait::async_trait]
    impl DocumentTextProvider for FixedText {
        async fn extract_text(&self, _bytes: &[u8]) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingService;

    #[async_trait::async_trait]
    impl DocumentTextProvider for FailingService {
        async fn extract_text(&self, _bytes: &[u8]) -> Result<String> {
            Err(Error::DocAi("processor unavailable".into()))
        }
    }

    #[tokio::test]
    async fn test_pipeline_with_stub_provider() {
        let provider = FixedText("SBI Card statement Name : PRIYA NAIR\n9876");
        let (text, record) = parse_with_docai(&provider, b"%PDF").await.unwrap();
        assert!(text.contains("SBI Card"));
        assert_eq!(record.issuer, "SBI");
        assert_eq!(record.cardholder_name, "PRIYA NAIR");
    }

    #[tokio::test]
    async fn test_service_failure_short_circuits() {
        let err = parse_with_docai(&FailingService, b"%PDF").await.unwrap_err();
        assert!(matches!(err, Error::DocAi(_)));
    }
}
