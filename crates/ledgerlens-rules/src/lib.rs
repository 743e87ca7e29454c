//! Rule-based statement field extraction.
//!
//! The issuer registry is configuration-as-data: an ordered table of per-issuer
//! detection keywords and field rules, evaluated by keyword match plus direct
//! and proximity extraction.

pub mod extract;
pub mod pipeline;
pub mod registry;

pub use extract::{extract_by_proximity, extract_direct, PostProcess, PROXIMITY_WINDOW};
pub use pipeline::{parse_statement, parse_statement_text};
pub use registry::{detect_issuer, issuer_profile, FieldRule, IssuerProfile, GSTIN_PATTERN};
