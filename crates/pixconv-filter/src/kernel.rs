//! Convolution kernels
//!
//! Defines the kernel value type and the Gaussian kernel factory used by
//! the blur filters.
//!
//! A kernel is immutable once built. Filters that need a different kernel
//! build a new one from their parameters instead of editing weights.

use crate::{FilterError, FilterResult};

/// Largest radius [`Kernel::gaussian`] accepts (at most `2_000_001` taps).
pub const MAX_GAUSSIAN_RADIUS: f32 = 1_000_000.0;

/// A convolution kernel: dimensions plus a row-major weight matrix.
///
/// The convolve-and-transpose engine reads only the first row, so the
/// kernels it is fed have `height == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// Kernel data (row-major order), at least `width * height` long
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel that takes ownership of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is zero
    /// or `data` holds fewer than `width * height` weights.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let needed = width as usize * height as usize;
        if data.len() < needed {
            return Err(FilterError::InvalidKernel(format!(
                "{width}x{height} kernel needs {needed} weights, got {}",
                data.len()
            )));
        }
        Ok(Kernel {
            width,
            height,
            data,
        })
    }

    /// Create a kernel from a slice of values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        Self::new(width, height, data.to_vec())
    }

    /// Create a normalized one-dimensional Gaussian kernel.
    ///
    /// The kernel is `2 * ceil(radius) + 1` taps wide with
    /// `sigma = radius / 3`. Taps further than `radius` from the center are
    /// zero, and the remaining weights are divided by their sum.
    ///
    /// When `sigma` is too small for the weights to be computed (a zero
    /// radius, or one so small that `2 * sigma^2` underflows) the result
    /// is an impulse: the same width, with a single `1.0` at the center.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not finite or lies outside
    /// `[0, MAX_GAUSSIAN_RADIUS]`.
    pub fn gaussian(radius: f32) -> Self {
        assert!(
            radius.is_finite() && (0.0..=MAX_GAUSSIAN_RADIUS).contains(&radius),
            "gaussian radius must be finite and within [0, {MAX_GAUSSIAN_RADIUS}], got {radius}"
        );

        let r = radius.ceil() as i32;
        let width = (2 * r + 1) as u32;
        let sigma = radius / 3.0;
        let sigma22 = 2.0 * sigma * sigma;
        let sigma_pi2 = (2.0 * std::f64::consts::PI * sigma as f64) as f32;
        let sqrt_sigma_pi2 = (sigma_pi2 as f64).sqrt() as f32;
        let radius2 = radius * radius;

        let mut data: Vec<f32> = (-r..=r)
            .map(|row| {
                let distance = row as f32 * row as f32;
                if distance > radius2 {
                    0.0
                } else {
                    ((-distance / sigma22) as f64).exp() as f32 / sqrt_sigma_pi2
                }
            })
            .collect();

        let total: f32 = data.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            log::debug!("gaussian kernel: radius={radius} too narrow, using impulse of width {width}");
            return Self::impulse(width);
        }
        data.iter_mut().for_each(|w| *w /= total);

        log::debug!("gaussian kernel: radius={radius} width={width} sigma={sigma}");

        Kernel {
            width,
            height: 1,
            data,
        }
    }

    /// One-row kernel of odd `width` that passes its center tap through.
    fn impulse(width: u32) -> Self {
        let mut data = vec![0.0; width as usize];
        data[(width as usize - 1) / 2] = 1.0;
        Kernel {
            width,
            height: 1,
            data,
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of taps on each side of the center of the first row.
    #[inline]
    pub fn half_width(&self) -> u32 {
        (self.width - 1) / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get an owned copy of the weights.
    pub fn weights(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Get the sum of the `width * height` kernel values.
    pub fn sum(&self) -> f32 {
        self.data[..self.width as usize * self.height as usize]
            .iter()
            .sum()
    }
}

/// Build the Gaussian kernel for `radius`.
///
/// Free-function form of [`Kernel::gaussian`], for composing with other
/// convolution-based effects.
pub fn make_gaussian_kernel(radius: f32) -> Kernel {
    Kernel::gaussian(radius)
}
