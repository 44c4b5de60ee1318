//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Numeric parameter outside its accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operands (mask, combine inputs) have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Operation not supported for this buffer layout.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Buffer construction failed.
    #[error(transparent)]
    Core(#[from] pixmill_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
