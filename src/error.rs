//! Error types for LineKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LineKvError
pub type Result<T> = std::result::Result<T, LineKvError>;

/// Unified error type for LineKV operations
#[derive(Debug, Error)]
pub enum LineKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Key not found")]
    KeyNotFound,

    #[error("Malformed record at line {line}")]
    MalformedRecord { line: usize },

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Store handle is closed")]
    ClosedHandle,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LineKvError {
    /// True for the expected "absent key" outcome of a lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, LineKvError::KeyNotFound)
    }
}
