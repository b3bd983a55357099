//! pixconv-filter - Convolution filters for ARGB images
//!
//! This crate provides:
//!
//! - [`Kernel`] and the Gaussian kernel factory
//! - [`EdgeMode`] policies for taps outside the image
//! - [`convolve_and_transpose`], the single pass both axes of a separable
//!   filter are built from, configured by [`ConvolveOptions`]
//! - [`GaussianBlur`] and [`UnsharpMask`], which implement [`Filter`]

pub mod convolve;
pub mod edge;
mod error;
pub mod gaussian;
pub mod kernel;
pub mod unsharp;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, MAX_GAUSSIAN_RADIUS, make_gaussian_kernel};

// Re-export commonly used items
pub use convolve::{
    ConvolveOptions, ExecutionStrategy, convolve_and_transpose, convolve_separable,
    convolve_transpose_image,
};
pub use edge::EdgeMode;
pub use gaussian::{GaussianBlur, RADIUS_SCALE, gaussian_blur};
pub use pixconv_core::Filter;
pub use unsharp::UnsharpMask;
