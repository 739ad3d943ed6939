//! Unified error type for roster-prep operations.
//!
//! Packaging errors from [`crate::opc`] are wrapped so that spreadsheet,
//! roster, and configuration code can all return the same `Result`.
use thiserror::Error;

/// Main error type for roster-prep operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaged document error
    #[error("Package error: {0}")]
    Opc(#[from] crate::opc::OpcError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file or directory is missing
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type for roster-prep operations.
pub type Result<T> = std::result::Result<T, Error>;
