//! pixconv - Separable convolution filters for packed ARGB images
//!
//! # Overview
//!
//! - [`ArgbImage`]: in-memory `0xAARRGGBB` pixel buffer
//! - [`filter`]: Gaussian kernels, the convolve-and-transpose engine,
//!   Gaussian blur and unsharp mask
//!
//! # Example
//!
//! ```
//! use pixconv::{ArgbImage, Filter};
//! use pixconv::filter::GaussianBlur;
//!
//! let mut img = ArgbImage::filled(8, 8, 0xff80_8080).unwrap();
//! img.apply_filter(&GaussianBlur::new(1.0).unwrap());
//! assert_eq!(img.width(), 8);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixconv_core::*;

// Re-export the filter crate as a module to avoid name conflicts
pub use pixconv_filter as filter;
