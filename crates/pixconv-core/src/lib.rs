//! pixconv core - Pixel storage for the convolution engine
//!
//! This crate provides the data structures the filters operate on:
//!
//! - [`ArgbImage`] - A width x height buffer of packed 32-bit ARGB pixels
//! - [`Filter`] - The capability every image filter implements
//! - [`color`] - Packing and unpacking of the four 8-bit channels
//! - [`Error`] / [`Result`] - Errors raised by the container
//!
//! No file or stream I/O lives here; images are built from in-memory
//! pixel buffers and handed back the same way.

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{ArgbImage, Filter};

/// Channel helpers for 32-bit ARGB pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xAARRGGBB` (alpha in MSB, blue in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const ALPHA_SHIFT: u32 = 24;
    pub const RED_SHIFT: u32 = 16;
    pub const GREEN_SHIFT: u32 = 8;
    pub const BLUE_SHIFT: u32 = 0;

    /// Fully opaque alpha value.
    pub const OPAQUE: u8 = 0xff;

    /// Opaque white.
    pub const WHITE: u32 = 0xffff_ffff;
    /// Opaque black.
    pub const BLACK: u32 = 0xff00_0000;
    /// Fully transparent black.
    pub const TRANSPARENT: u32 = 0x0000_0000;

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit ARGB pixel.
    #[inline]
    pub fn compose_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
        ((a as u32) << ALPHA_SHIFT)
            | ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
    }

    /// Compose an opaque 32-bit pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_argb(OPAQUE, r, g, b)
    }

    /// Extract ARGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_argb(pixel: u32) -> (u8, u8, u8, u8) {
        (alpha(pixel), red(pixel), green(pixel), blue(pixel))
    }

    /// Clamp an integer channel value into `[0, 255]`.
    #[inline]
    pub fn clamp_channel(value: i32) -> u8 {
        value.clamp(0, 255) as u8
    }

    /// Integer luma approximation (`(r + g + b) / 3`), used to judge
    /// brightness of gray pixels.
    #[inline]
    pub fn brightness(pixel: u32) -> u8 {
        let (_, r, g, b) = extract_argb(pixel);
        ((r as u32 + g as u32 + b as u32) / 3) as u8
    }

}
