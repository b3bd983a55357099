//! Error types for pixconv-core
//!
//! Provides a unified error type for the image container. Each variant
//! carries enough context for diagnostics without exposing the layout of
//! the backing buffer.

use thiserror::Error;

/// pixconv-core error type
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel buffer length does not match the image dimensions
    #[error("dimension mismatch: expected {expected} pixels, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for pixconv-core operations
pub type Result<T> = std::result::Result<T, Error>;
