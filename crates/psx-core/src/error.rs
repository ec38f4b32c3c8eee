//! Error types for psx-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Malformed number: {0:?}")]
    NumberFormat(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
