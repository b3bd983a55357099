//! ArgbImage - The pixel container filters operate on
//!
//! # Pixel layout
//!
//! - One packed `u32` per pixel, `0xAARRGGBB`
//! - Rows are stored top to bottom with no padding, so the buffer length
//!   is always exactly `width * height`
//!
//! # Ownership model
//!
//! The image owns its buffer. Filters either build a fresh buffer and swap
//! it in with [`ArgbImage::replace_pixels`], or rewrite pixels in place
//! through [`ArgbImage::pixels_mut`] once every value they read is copied.

mod access;

use crate::color;
use crate::error::{Error, Result};

/// Filter capability.
///
/// Anything that rewrites the pixels of an [`ArgbImage`] in place. Failures
/// are contract violations and panic; a filter that returns has left the
/// image in a valid state.
pub trait Filter {
    /// Run the filter over `image`, replacing its pixel storage.
    fn apply(&self, image: &mut ArgbImage);
}

/// A width x height image of packed 32-bit ARGB pixels.
///
/// # Examples
///
/// ```
/// use pixconv_core::ArgbImage;
///
/// let img = ArgbImage::filled(4, 3, 0xffff_0000).unwrap();
/// assert_eq!(img.width(), 4);
/// assert_eq!(img.height(), 3);
/// assert_eq!(img.pixels().len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgbImage {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Packed pixels, row-major
    data: Vec<u32>,
}

impl ArgbImage {
    /// Create a new image with every pixel transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, color::TRANSPARENT)
    }

    /// Create a new image with every pixel set to `argb`.
    pub fn filled(width: u32, height: u32, argb: u32) -> Result<Self> {
        let len = Self::pixel_count(width, height)?;
        Ok(ArgbImage {
            width,
            height,
            data: vec![argb; len],
        })
    }

    /// Wrap an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::DimensionMismatch`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        let expected = Self::pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(ArgbImage {
            width,
            height,
            data: pixels,
        })
    }

    /// Build an image from a little-endian BGRA byte buffer, the layout a
    /// 32bpp platform bitmap exposes (blue byte first).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `bytes.len() != 4 * width * height`.
    pub fn from_bgra_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = Self::pixel_count(width, height)?;
        if bytes.len() != expected * 4 {
            return Err(Error::DimensionMismatch {
                expected: expected * 4,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(4)
            .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
            .collect();
        Ok(ArgbImage {
            width,
            height,
            data,
        })
    }

    /// Number of pixels for the given dimensions.
    ///
    /// Uses `usize` multiplication checked for overflow.
    fn pixel_count(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the packed pixel buffer, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    /// Get mutable access to the pixel buffer.
    ///
    /// The slice cannot change length, so the size invariant holds.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Replace the backing storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the new buffer is not
    /// exactly `width * height` long; the image is left unchanged.
    pub fn set_pixels(&mut self, pixels: Vec<u32>) -> Result<()> {
        if pixels.len() != self.data.len() {
            return Err(Error::DimensionMismatch {
                expected: self.data.len(),
                actual: pixels.len(),
            });
        }
        self.data = pixels;
        Ok(())
    }

    /// Swap in a buffer produced by a filter pass and return the old one.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length differs from `width * height`. Filters
    /// only ever hand back buffers sized from the image itself.
    pub fn replace_pixels(&mut self, pixels: Vec<u32>) -> Vec<u32> {
        assert_eq!(
            pixels.len(),
            self.data.len(),
            "replacement buffer for {}x{} image has wrong length",
            self.width,
            self.height
        );
        std::mem::replace(&mut self.data, pixels)
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<u32> {
        self.data
    }

    /// Little-endian BGRA byte view of the pixels.
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|p| p.to_le_bytes()).collect()
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &ArgbImage) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Run `filter` over this image.
    pub fn apply_filter<F: Filter + ?Sized>(&mut self, filter: &F) {
        filter.apply(self);
    }
}
