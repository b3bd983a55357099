//! pixconv-test - Regression test support for pixconv
//!
//! Provides a small regression harness in the style of C-era `regutils`:
//! every check bumps an index, failures are collected, and
//! [`RegParams::cleanup`] reports the outcome at the end of the test.
//!
//! # Usage
//!
//! ```ignore
//! use pixconv_test::{RegParams, uniform_image};
//!
//! let mut rp = RegParams::new("gaussian");
//! let img = uniform_image(5, 5, 0xffffffff).unwrap();
//! rp.compare_values(5.0, img.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"
//! - `RUST_LOG`: Log filter for the `env_logger` installed by [`RegParams::new`]

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use pixconv_core::{ArgbImage, color};

/// Image with every pixel set to `argb`.
pub fn uniform_image(width: u32, height: u32, argb: u32) -> TestResult<ArgbImage> {
    ArgbImage::filled(width, height, argb).map_err(|source| TestError::Fixture {
        name: "uniform",
        source,
    })
}

/// Image filled with `background` and a one-pixel-wide vertical line of
/// `line` at column `x`.
pub fn vertical_line_image(
    width: u32,
    height: u32,
    x: u32,
    line: u32,
    background: u32,
) -> TestResult<ArgbImage> {
    let mut img = uniform_image(width, height, background)?;
    for y in 0..height {
        img.set_pixel(x, y, line)
            .map_err(|source| TestError::Fixture {
                name: "vertical_line",
                source,
            })?;
    }
    Ok(img)
}

/// Opaque horizontal gray ramp from black at the left edge to white at the
/// right edge.
pub fn gradient_image(width: u32, height: u32) -> TestResult<ArgbImage> {
    let span = (width.max(2) - 1) as f32;
    let pixels = (0..height)
        .flat_map(|_| {
            (0..width).map(move |x| {
                let v = (x as f32 * 255.0 / span).round() as u8;
                color::compose_rgb(v, v, v)
            })
        })
        .collect();
    ArgbImage::from_pixels(width, height, pixels).map_err(|source| TestError::Fixture {
        name: "gradient",
        source,
    })
}

/// Image of random pixels. With `opaque` set every alpha is 255.
pub fn random_image(width: u32, height: u32, opaque: bool) -> TestResult<ArgbImage> {
    let len = width as usize * height as usize;
    let pixels = (0..len)
        .map(|_| {
            let v: u32 = rand::random();
            if opaque { v | 0xff00_0000 } else { v }
        })
        .collect();
    ArgbImage::from_pixels(width, height, pixels).map_err(|source| TestError::Fixture {
        name: "random",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_line_image() {
        let img = vertical_line_image(5, 2, 2, color::BLACK, color::WHITE).unwrap();
        assert_eq!(img.row(0), &[color::WHITE, color::WHITE, color::BLACK, color::WHITE, color::WHITE]);
        assert_eq!(img.row(1), img.row(0));
    }

    #[test]
    fn test_gradient_image_endpoints() {
        let img = gradient_image(4, 1).unwrap();
        assert_eq!(img.get_pixel(0, 0), Some(color::BLACK));
        assert_eq!(img.get_pixel(3, 0), Some(color::WHITE));
    }

    #[test]
    fn test_random_image_opaque() {
        let img = random_image(8, 8, true).unwrap();
        assert!(img.pixels().iter().all(|&p| color::alpha(p) == 255));
    }

    #[test]
    fn test_fixture_rejects_zero_size() {
        assert!(matches!(
            uniform_image(0, 3, 0),
            Err(TestError::Fixture { name: "uniform", .. })
        ));
    }
}
