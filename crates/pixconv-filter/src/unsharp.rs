//! Unsharp mask
//!
//! Sharpens by pushing each color channel away from its Gaussian-blurred
//! value. The blur is exactly the one [`GaussianBlur`] performs, so the
//! same radius scaling and alpha handling apply.

use crate::convolve::ExecutionStrategy;
use crate::gaussian::{GaussianBlur, check_radius};
use crate::{FilterError, FilterResult};
use pixconv_core::{ArgbImage, Filter, color};

/// Unsharp mask filter.
#[derive(Debug, Clone)]
pub struct UnsharpMask {
    blur: GaussianBlur,
    amount: f32,
    threshold: u8,
}

impl Default for UnsharpMask {
    fn default() -> Self {
        UnsharpMask {
            blur: GaussianBlur::default(),
            amount: 0.5,
            threshold: 1,
        }
    }
}

impl UnsharpMask {
    /// Create an unsharp mask.
    ///
    /// # Arguments
    ///
    /// * `radius` - Blur radius, scaled like [`GaussianBlur`]'s
    /// * `amount` - Sharpening strength; a channel moves by
    ///   `4 * amount` times its difference from the blurred value
    /// * `threshold` - Minimum difference from the blurred value before a
    ///   channel is touched
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] for a negative or
    /// non-finite amount, or a radius [`GaussianBlur::new`] rejects.
    pub fn new(radius: f32, amount: f32, threshold: u8) -> FilterResult<Self> {
        check_radius(radius)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "amount must be finite and >= 0, got {amount}"
            )));
        }
        Ok(UnsharpMask {
            blur: GaussianBlur::new(radius)?,
            amount,
            threshold,
        })
    }

    /// Choose serial or parallel execution of the blur.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.blur = self.blur.with_strategy(strategy);
        self
    }

    pub fn radius(&self) -> f32 {
        self.blur.radius()
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    #[inline]
    fn sharpen_channel(&self, original: u8, blurred: u8) -> u8 {
        let o = original as i32;
        let b = blurred as i32;
        if (o - b).abs() < self.threshold as i32 {
            return original;
        }
        let gain = 4.0 * self.amount + 1.0;
        color::clamp_channel((gain * (o - b) as f32 + b as f32) as i32)
    }
}

impl Filter for UnsharpMask {
    fn apply(&self, image: &mut ArgbImage) {
        log::debug!(
            "unsharp mask: {}x{} radius={} amount={} threshold={}",
            image.width(),
            image.height(),
            self.blur.radius(),
            self.amount,
            self.threshold
        );
        let Some(blurred) = self
            .blur
            .blur_pixels(image.pixels(), image.width(), image.height())
        else {
            return;
        };

        for (pixel, &soft) in image.pixels_mut().iter_mut().zip(&blurred) {
            let (a, r1, g1, b1) = color::extract_argb(*pixel);
            let (_, r2, g2, b2) = color::extract_argb(soft);
            *pixel = color::compose_argb(
                a,
                self.sharpen_channel(r1, r2),
                self.sharpen_channel(g1, g2),
                self.sharpen_channel(b1, b2),
            );
        }
    }
}
