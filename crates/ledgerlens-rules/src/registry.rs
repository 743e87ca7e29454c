//! Issuer registry: the declarative rule tables driving the rule-based parser.
//!
//! Registry order is significant: issuer detection walks the table top to
//! bottom and the first issuer with a matching keyword wins. Statements that
//! mention several banks (payment instructions often do) resolve to the
//! earliest registered issuer, so entries are ordered by how distinctive their
//! keywords are in practice.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::PostProcess;
use ledgerlens_core::FieldKey;

/// One field's extraction rule: ordered patterns, each with a single capture
/// group, most specific first.
pub struct FieldRule {
    pub key: FieldKey,
    pub patterns: Vec<Regex>,
    pub post: Option<PostProcess>,
}

/// Detection keywords and field rules for one issuer.
pub struct IssuerProfile {
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    pub rules: Vec<FieldRule>,
}

/// GSTIN: 2 digits, 5 letters, 4 digits, letter, alphanumeric, literal Z,
/// alphanumeric. Identical across issuers.
pub static GSTIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{2}[A-Z]{5}[0-9]{4}[A-Z]{1}[1-9A-Z]{1}Z[0-9A-Z]{1})\b").unwrap()
});

fn rule(key: FieldKey, patterns: &[&str], post: Option<PostProcess>) -> FieldRule {
    FieldRule {
        key,
        patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
        post,
    }
}

fn gstin_rule() -> FieldRule {
    FieldRule {
        key: FieldKey::Gstin,
        patterns: vec![GSTIN_PATTERN.clone()],
        post: None,
    }
}

static REGISTRY: Lazy<Vec<IssuerProfile>> = Lazy::new(|| {
    vec![
        IssuerProfile {
            id: "HDFC",
            keywords: &["HDFC Bank"],
            rules: vec![
                rule(
                    FieldKey::CardholderName,
                    &[r"Name\s*:\s*([A-Z\s]+)", r"Dear\s+([A-Z\s]+),"],
                    Some(PostProcess::Name),
                ),
                rule(
                    FieldKey::PaymentDueDate,
                    &[
                        // Tabular layout: the value sits quoted on the line below the label.
                        r#"Payment\s*Due\s*Date[^\n]+\n"(\d{2}/\d{2}/\d{4})"#,
                        r"Payment\s*Due\s*Date\s*:\s*(\d{2}/\d{2}/\d{4})",
                    ],
                    Some(PostProcess::Date),
                ),
                rule(
                    FieldKey::TotalDue,
                    &[
                        r#"Total\s*Dues[^\n]+\n"[^"]+"\s*,\s*"([\d,]+\.\d{2})"#,
                        r"Total\s*Amount\s*Due\s*Rs\.?\s*([\d,]+\.\d{2})",
                    ],
                    Some(PostProcess::Amount),
                ),
                gstin_rule(),
            ],
        },
        IssuerProfile {
            id: "ICICI",
            keywords: &["ICICI Bank"],
            rules: vec![
                rule(
                    FieldKey::CardholderName,
                    &[r"MR\s+([A-Za-z\s]+)"],
                    Some(PostProcess::Name),
                ),
                rule(
                    FieldKey::PaymentDueDate,
                    &[r"(?i)PAYMENT\s*DUE\s*DATE\s*\n\s*(\w+\s*\d{1,2},\s*\d{4})"],
                    Some(PostProcess::Date),
                ),
                rule(
                    FieldKey::TotalDue,
                    &[r"(?i)Total\s*Amount\s*due\s*\n\s*([\d,]+\.\d{2})"],
                    Some(PostProcess::Amount),
                ),
                gstin_rule(),
            ],
        },
        IssuerProfile {
            id: "SBI",
            keywords: &["SBI Card"],
            rules: vec![
                rule(
                    FieldKey::CardholderName,
                    &[r"Name\s*:\s*([A-Z\s]+)"],
                    Some(PostProcess::Name),
                ),
                rule(
                    FieldKey::PaymentDueDate,
                    &[r"Payment\s*due\s*by\s*([\d]{2}-[\w]{3}-[\d]{2})"],
                    Some(PostProcess::Date),
                ),
                rule(
                    FieldKey::TotalDue,
                    &[r"Total\s*Payment\s*Due\s*Rs\.\s*([\d,]+\.\d{2})"],
                    Some(PostProcess::Amount),
                ),
                gstin_rule(),
            ],
        },
        IssuerProfile {
            id: "AXIS",
            keywords: &["AXIS BANK"],
            rules: vec![
                rule(
                    FieldKey::CardholderName,
                    &[r"PREPARED\s*FOR\s+([A-Z\s]+)"],
                    Some(PostProcess::Name),
                ),
                rule(
                    FieldKey::PaymentDueDate,
                    &[r"PAYMENT\s*DUE\s*DATE\s*([\d]{2}-[\w]{3}-[\d]{4})"],
                    Some(PostProcess::Date),
                ),
                rule(
                    FieldKey::TotalDue,
                    &[r"TOTAL\s*AMOUNT\s*DUE\s*₹\s*([\d,]+\.\d{2})"],
                    Some(PostProcess::Amount),
                ),
                gstin_rule(),
            ],
        },
        // Issuers below only carry the universal GSTIN rule so far; layouts
        // vary too much between statement vintages for stable field patterns.
        IssuerProfile { id: "KOTAK", keywords: &["Kotak"], rules: vec![gstin_rule()] },
        IssuerProfile { id: "AMEX", keywords: &["AMERICAN EXPRESS"], rules: vec![gstin_rule()] },
        IssuerProfile { id: "CITI", keywords: &["citibank"], rules: vec![gstin_rule()] },
        IssuerProfile { id: "RBL", keywords: &["RBL Bank"], rules: vec![gstin_rule()] },
        IssuerProfile { id: "SC", keywords: &["Standard Chartered"], rules: vec![gstin_rule()] },
        IssuerProfile { id: "BOB", keywords: &["Bank of Baroda"], rules: vec![gstin_rule()] },
        IssuerProfile { id: "IDFC", keywords: &["IDFC FIRST Bank", "IDFC"], rules: vec![gstin_rule()] },
    ]
});

/// Detect the issuer from statement text.
///
/// First issuer in registry order with any keyword occurring case-insensitively
/// anywhere in the text wins; no scoring, no tie-break. Shared by both the
/// rule-based and ML-assisted pipelines.
pub fn detect_issuer(text: &str) -> Option<&'static str> {
    let text_lower = text.to_lowercase();
    for profile in REGISTRY.iter() {
        for keyword in profile.keywords {
            if text_lower.contains(&keyword.to_lowercase()) {
                return Some(profile.id);
            }
        }
    }
    None
}

/// Look up the rule set for a detected issuer.
pub fn issuer_profile(id: &str) -> Option<&'static IssuerProfile> {
    REGISTRY.iter().find(|p| p.id == id)
}
