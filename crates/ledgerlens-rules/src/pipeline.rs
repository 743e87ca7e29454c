//! Rule-based parsing pipeline: bytes -> text -> issuer -> field record.

use ledgerlens_core::{Error, ParsedStatement, Result};
use tracing::{debug, info};

use crate::extract::extract_direct;
use crate::registry::{detect_issuer, issuer_profile};

/// Parse a statement PDF with the issuer rule tables.
///
/// Returns the extracted text together with the record so callers can cache
/// the text for follow-up queries without a second PDF pass. Text acquisition
/// and issuer detection failures abort the pipeline; individual field misses
/// do not.
pub fn parse_statement(bytes: &[u8]) -> Result<(String, ParsedStatement)> {
    let text = ledgerlens_ingest::extract_statement_text(bytes)?;
    let record = parse_statement_text(&text)?;
    Ok((text, record))
}

/// Rule-based extraction over already-acquired statement text.
pub fn parse_statement_text(text: &str) -> Result<ParsedStatement> {
    let issuer = detect_issuer(text).ok_or(Error::IssuerDetection)?;
    info!(issuer, "issuer detected");

    let mut record = ParsedStatement::unmatched(issuer);

    // The registry always knows a detected issuer; `unmatched` already filled
    // every canonical field with the sentinel, so undefined rules need no
    // backfill pass.
    if let Some(profile) = issuer_profile(issuer) {
        for rule in &profile.rules {
            match extract_direct(text, &rule.patterns, rule.post) {
                Some(value) => record.set(rule.key, value),
                None => debug!(field = rule.key.as_str(), "no pattern matched"),
            }
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::{FieldKey, NOT_FOUND};

    // Digits after the name line stop the greedy `[A-Z\s]+` capture, as the
    // card number does on real statements.
    const HDFC_TEXT: &str = "HDFC Bank Credit Card Statement\n\
        Name : RAHUL SHARMA\n\
        4321 56XX XXXX 9876\n\
        Payment Due Date : 15/08/2026\n\
        Total Amount Due Rs. 45,231.78\n\
        GSTIN: 29ABCDE1234F1Z5\n";

    #[test]
    fn test_hdfc_full_extraction() {
        let record = parse_statement_text(HDFC_TEXT).unwrap();
        assert_eq!(record.issuer, "HDFC");
        assert_eq!(record.cardholder_name, "RAHUL SHARMA");
        assert_eq!(record.payment_due_date, "15/08/2026");
        assert_eq!(record.total_due, "45231.78");
        assert_eq!(record.gstin, "29ABCDE1234F1Z5");
    }

    #[test]
    fn test_all_fields_present_on_partial_match() {
        // KOTAK only configures the GSTIN rule; the other three fields must
        // still be present at the sentinel.
        let record = parse_statement_text("Kotak Mahindra statement, no fields here").unwrap();
        assert_eq!(record.issuer, "KOTAK");
        for key in FieldKey::ALL {
            if key != FieldKey::Gstin {
                assert_eq!(record.get(key), NOT_FOUND);
            }
        }
        assert_eq!(record.gstin, NOT_FOUND);
    }

    #[test]
    fn test_undetected_issuer_is_an_error() {
        let err = parse_statement_text("An electricity bill").unwrap_err();
        assert!(matches!(err, Error::IssuerDetection));
    }

    #[test]
    fn test_axis_patterns() {
        let text = "AXIS BANK\nPREPARED FOR JOHN DOE\n4321 0000 1111 2222\n\
            PAYMENT DUE DATE 02-Sep-2026\nTOTAL AMOUNT DUE ₹ 9,999.00\n";
        let record = parse_statement_text(text).unwrap();
        assert_eq!(record.issuer, "AXIS");
        assert_eq!(record.cardholder_name, "JOHN DOE");
        assert_eq!(record.payment_due_date, "02-Sep-2026");
        assert_eq!(record.total_due, "9999.00");
    }

    #[test]
    fn test_icici_multiline_patterns() {
        let text = "ICICI Bank statement\nMR Anil Kumar, Card 4321\n\
            PAYMENT DUE DATE\n  August 5, 2026\nTotal Amount due\n 12,000.50\n";
        let record = parse_statement_text(text).unwrap();
        assert_eq!(record.issuer, "ICICI");
        assert_eq!(record.cardholder_name, "Anil Kumar");
        assert_eq!(record.payment_due_date, "August 5, 2026");
        assert_eq!(record.total_due, "12000.50");
    }

    #[test]
    fn test_malformed_pdf_bytes_error_not_panic() {
        let result = parse_statement(b"definitely not a pdf");
        assert!(matches!(result, Err(Error::Ingest(_))));
    }
}
