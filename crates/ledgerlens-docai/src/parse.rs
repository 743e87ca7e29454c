//! Generic-pattern extraction over OCR text.
//!
//! Independent of the issuer rule tables on purpose: OCR text quality differs
//! from locally extracted text, so these patterns are kept as their own set.
//! Only the issuer keyword table is shared with the rule-based pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

use ledgerlens_core::{ParsedStatement, FieldKey, UNKNOWN_ISSUER};
use ledgerlens_rules::{
    detect_issuer, extract_by_proximity, extract_direct, PostProcess, GSTIN_PATTERN,
    PROXIMITY_WINDOW,
};

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"Name\s*:\s*([A-Z\s]+)",
        r"(?i)Dear\s+([A-Z\s]+),",
        r"MR\s+([A-Za-z\s]+)",
        r"PREPARED\s*FOR\s+([A-Z\s]+)",
        // Axis bank-account layout: name sandwiched between the bank header
        // and the joint-holder line.
        r"(?i)AXIS BANK\n([A-Z\s]+)\nJoint Holder",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Dates in `dd/mm/yyyy`, `Month d, yyyy`, and `dd-MMM-yy` shapes.
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\w+\s\d{1,2},\s*\d{4}|\d{1,2}[- ]\w{3}[- ]\d{2,4})\b")
        .unwrap()
});

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)([\d,]+\.\d{2})").unwrap());

const DUE_DATE_KEYWORDS: &[&str] = &["due date", "payment due"];

/// Credit-card terminology first; bank-statement terminology as the fallback
/// tier.
const TOTAL_DUE_KEYWORDS: &[&str] =
    &["total amount due", "total dues", "new balance", "amount payable"];
const CLOSING_BALANCE_KEYWORDS: &[&str] = &["closing balance"];

/// Extract a statement record from OCR text with the generic pattern set.
///
/// Unlike the rule-based pipeline, an undetected issuer is not an error here:
/// the generic patterns do not depend on knowing the issuer, so extraction
/// proceeds and the record carries the `Unknown` sentinel.
pub fn parse_ocr_text(text: &str) -> ParsedStatement {
    let issuer = detect_issuer(text).unwrap_or(UNKNOWN_ISSUER);
    let mut record = ParsedStatement::unmatched(issuer);

    if let Some(caps) = GSTIN_PATTERN.captures(text) {
        if let Some(m) = caps.get(1) {
            record.set(FieldKey::Gstin, m.as_str().to_string());
        }
    }

    if let Some(name) = extract_direct(text, &NAME_PATTERNS, None) {
        record.set(FieldKey::CardholderName, name);
    }

    if let Some(date) =
        extract_by_proximity(text, DUE_DATE_KEYWORDS, &DATE_PATTERN, PROXIMITY_WINDOW)
    {
        record.set(FieldKey::PaymentDueDate, date);
    }

    let total = extract_by_proximity(text, TOTAL_DUE_KEYWORDS, &MONEY_PATTERN, PROXIMITY_WINDOW)
        .or_else(|| {
            extract_by_proximity(text, CLOSING_BALANCE_KEYWORDS, &MONEY_PATTERN, PROXIMITY_WINDOW)
        });
    if let Some(normalized) = total.and_then(|v| PostProcess::Amount.apply(&v)) {
        record.set(FieldKey::TotalDue, normalized);
    }

    record
}
