//! PDF text acquisition for statement parsing.
//!
//! Pass-through by design: pages are concatenated with newline separators and
//! nothing else is transformed. All field normalization happens downstream in
//! the extraction rules.

use ledgerlens_core::{Error, Result};

/// Extract the full plain text of a statement PDF.
///
/// `pdf-extract` returns the whole document as one string with form feeds
/// between pages; those become newlines so rule patterns can anchor on line
/// boundaries. Unreadable bytes and empty documents are ingestion failures.
pub fn extract_statement_text(bytes: &[u8]) -> Result<String> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| Error::Ingest(e.to_string()))?;

    if raw.trim().is_empty() {
        return Err(Error::Ingest("document contains no extractable text".into()));
    }

    let text = raw.replace('\x0C', "\n");
    tracing::debug!(chars = text.len(), "extracted statement text");
    Ok(text)
}
