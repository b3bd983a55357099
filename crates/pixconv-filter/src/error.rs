//! Error types for pixconv-filter
//!
//! Configuration mistakes (bad kernel shapes, bad radii) are reported as
//! typed errors. Misuse of the convolution engine itself (buffers of the
//! wrong length) is a programming error and panics instead.

use thiserror::Error;

/// Errors that can occur while configuring filters
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixconv_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
