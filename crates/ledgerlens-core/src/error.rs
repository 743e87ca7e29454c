//! Error types for LedgerLens.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read PDF: {0}")]
    Ingest(String),

    #[error("Could not identify the issuing bank from the statement")]
    IssuerDetection,

    #[error("Document AI service error: {0}")]
    DocAi(String),

    #[error("Search error: {0}")]
    Search(String),
}

pub type Result<T> = std::result::Result<T, Error>;
