//! Gaussian blur filter
//!
//! The user-facing radius is a "blur amount"; the kernel is built from
//! `radius * RADIUS_SCALE`. Keeping the scale fixed keeps output identical
//! across versions for the same radius.

use crate::convolve::{ConvolveOptions, ExecutionStrategy, convolve_separable};
use crate::kernel::MAX_GAUSSIAN_RADIUS;
use crate::{EdgeMode, FilterError, FilterResult, Kernel};
use pixconv_core::{ArgbImage, Filter};

/// Factor applied to the user radius before kernel synthesis.
pub const RADIUS_SCALE: f32 = std::f32::consts::PI;

/// Radius used by [`GaussianBlur::default`].
pub const DEFAULT_RADIUS: f32 = 2.0;

/// Separable Gaussian blur over ARGB images.
///
/// # Examples
///
/// ```
/// use pixconv_core::{ArgbImage, Filter};
/// use pixconv_filter::GaussianBlur;
///
/// let mut img = ArgbImage::filled(5, 5, 0xffff_ffff).unwrap();
/// GaussianBlur::new(2.0).unwrap().apply(&mut img);
/// assert!(img.pixels().iter().all(|&p| p == 0xffff_ffff));
/// ```
#[derive(Debug, Clone)]
pub struct GaussianBlur {
    radius: f32,
    kernel: Kernel,
    use_alpha: bool,
    premultiply_alpha: bool,
    strategy: ExecutionStrategy,
}

impl Default for GaussianBlur {
    fn default() -> Self {
        Self::from_valid_radius(DEFAULT_RADIUS)
    }
}

impl GaussianBlur {
    /// Create a blur of the given strength.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `radius` is negative
    /// or not finite, or if `radius * RADIUS_SCALE` exceeds
    /// [`MAX_GAUSSIAN_RADIUS`].
    pub fn new(radius: f32) -> FilterResult<Self> {
        check_radius(radius)?;
        Ok(Self::from_valid_radius(radius))
    }

    fn from_valid_radius(radius: f32) -> Self {
        GaussianBlur {
            radius,
            kernel: Kernel::gaussian(radius * RADIUS_SCALE),
            use_alpha: true,
            premultiply_alpha: true,
            strategy: ExecutionStrategy::Serial,
        }
    }

    /// Change the blur strength and rebuild the kernel.
    ///
    /// On error the filter keeps its previous radius and kernel.
    pub fn set_radius(&mut self, radius: f32) -> FilterResult<()> {
        check_radius(radius)?;
        self.radius = radius;
        self.kernel = Kernel::gaussian(self.effective_radius());
        Ok(())
    }

    /// Enable or disable alpha computation (disabled: output is opaque).
    pub fn with_alpha(mut self, use_alpha: bool) -> Self {
        self.use_alpha = use_alpha;
        self
    }

    /// Enable or disable premultiplied-alpha blending.
    pub fn with_premultiply_alpha(mut self, premultiply_alpha: bool) -> Self {
        self.premultiply_alpha = premultiply_alpha;
        self
    }

    /// Choose serial or parallel execution of the passes.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The radius as supplied by the caller.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The radius the kernel is built from (`radius * RADIUS_SCALE`).
    pub fn effective_radius(&self) -> f32 {
        self.radius * RADIUS_SCALE
    }

    /// The Gaussian kernel built from the effective radius.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Whether the alpha channel is blurred (otherwise output is opaque).
    pub fn use_alpha(&self) -> bool {
        self.use_alpha
    }

    /// Whether color is premultiplied by alpha for the blur.
    pub fn premultiply_alpha(&self) -> bool {
        self.premultiply_alpha
    }

    /// Serial or parallel execution of both passes.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Options for the first (horizontal) pass.
    pub fn pass_options(&self) -> ConvolveOptions {
        let premultiply = self.use_alpha && self.premultiply_alpha;
        ConvolveOptions::new()
            .with_alpha(self.use_alpha)
            .with_premultiply(premultiply)
            .with_unpremultiply(false)
            .with_edge_mode(EdgeMode::Clamp)
            .with_strategy(self.strategy)
    }

    /// Blur `pixels` (`width x height`) into a new buffer.
    ///
    /// Returns `None` when the effective radius is zero and there is
    /// nothing to do.
    pub(crate) fn blur_pixels(&self, pixels: &[u32], width: u32, height: u32) -> Option<Vec<u32>> {
        if self.effective_radius() <= 0.0 {
            return None;
        }
        Some(convolve_separable(
            &self.kernel,
            pixels,
            width,
            height,
            &self.pass_options(),
        ))
    }
}

impl Filter for GaussianBlur {
    fn apply(&self, image: &mut ArgbImage) {
        log::debug!(
            "gaussian blur: {}x{} radius={} effective={} strategy={:?}",
            image.width(),
            image.height(),
            self.radius,
            self.effective_radius(),
            self.strategy
        );
        if let Some(out) = self.blur_pixels(image.pixels(), image.width(), image.height()) {
            image.replace_pixels(out);
        }
    }
}

/// Blur a copy of `image`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for a radius
/// [`GaussianBlur::new`] rejects.
pub fn gaussian_blur(image: &ArgbImage, radius: f32) -> FilterResult<ArgbImage> {
    let filter = GaussianBlur::new(radius)?;
    let mut out = image.clone();
    filter.apply(&mut out);
    Ok(out)
}

pub(crate) fn check_radius(radius: f32) -> FilterResult<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "radius must be finite and >= 0, got {radius}"
        )));
    }
    let effective = radius * RADIUS_SCALE;
    if effective > MAX_GAUSSIAN_RADIUS {
        return Err(FilterError::InvalidParameters(format!(
            "radius {radius} scales to {effective}, above the kernel limit {MAX_GAUSSIAN_RADIUS}"
        )));
    }
    Ok(())
}
