//! LedgerLens core: error type, configuration, statement data model.

pub mod config;
pub mod error;
pub mod statement;

pub use config::LedgerLensConfig;
pub use error::{Error, Result};
pub use statement::{FieldKey, ParsedStatement, NOT_FOUND, UNKNOWN_ISSUER};
