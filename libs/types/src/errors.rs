//! Error types for the desk pipeline
//!
//! Single error taxonomy using thiserror. Every failure propagates
//! synchronously to the ingestion caller; nothing is retried.

use thiserror::Error;

/// Top-level desk error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeskError {
    #[error("Unknown product: {id}")]
    UnknownProduct { id: String },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid side: {0}")]
    InvalidSide(String),

    #[error("Invalid inquiry state: {0}")]
    InvalidState(String),

    #[error("Unknown inquiry: {id}")]
    UnknownInquiry { id: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
