//! Convolve-and-transpose
//!
//! One routine serves both axes of a separable filter: it convolves the
//! rows of a `width x height` buffer with a one-dimensional kernel and
//! writes the result transposed, as a `height x width` buffer. Running it a
//! second time on its own output convolves the original columns and
//! restores the original orientation.
//!
//! Alpha handling is configured per call through [`ConvolveOptions`]:
//! premultiplying color by alpha before the weighted sum and dividing it
//! back out afterwards keeps opaque color from bleeding into transparent
//! neighbours.

use crate::{EdgeMode, FilterResult, Kernel};
use pixconv_core::{ArgbImage, color};
use rayon::prelude::*;

/// Controls how a convolution pass is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,
    /// Split the output into columns and run them on the global rayon
    /// thread pool. Output is identical to [`ExecutionStrategy::Serial`].
    Parallel,
}

/// Per-pass configuration of [`convolve_and_transpose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveOptions {
    /// Compute the alpha channel; when false every output alpha is 255
    pub use_alpha: bool,
    /// Scale sampled color by alpha before accumulating
    pub premultiply: bool,
    /// Divide accumulated color by accumulated alpha afterwards
    pub unpremultiply: bool,
    /// Policy for taps outside the row
    pub edge_mode: EdgeMode,
    /// Serial or rayon-parallel execution
    pub strategy: ExecutionStrategy,
}

impl Default for ConvolveOptions {
    fn default() -> Self {
        ConvolveOptions {
            use_alpha: true,
            premultiply: false,
            unpremultiply: false,
            edge_mode: EdgeMode::Clamp,
            strategy: ExecutionStrategy::Serial,
        }
    }
}

impl ConvolveOptions {
    /// Options with alpha enabled, no premultiplication, clamped edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute alpha, or force every output alpha to 255.
    pub fn with_alpha(mut self, use_alpha: bool) -> Self {
        self.use_alpha = use_alpha;
        self
    }

    /// Premultiply sampled color by alpha.
    pub fn with_premultiply(mut self, premultiply: bool) -> Self {
        self.premultiply = premultiply;
        self
    }

    /// Divide accumulated color by accumulated alpha.
    pub fn with_unpremultiply(mut self, unpremultiply: bool) -> Self {
        self.unpremultiply = unpremultiply;
        self
    }

    /// Set the policy for taps outside the row.
    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    /// Run serially or on the rayon pool.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Options for the second pass of a separable filter: premultiply and
    /// unpremultiply swapped.
    pub fn second_pass(self) -> Self {
        ConvolveOptions {
            premultiply: self.unpremultiply,
            unpremultiply: self.premultiply,
            ..self
        }
    }
}

/// Convolve the rows of `src` with `kernel` and write the result transposed
/// into `dst`.
///
/// `src` is `width x height`; `dst` receives `height x width`, with the
/// output for source pixel `(x, y)` stored at `dst[y + x * height]`. Only
/// the first row of the kernel is used, centered on its middle tap.
///
/// # Panics
///
/// Panics if either dimension is zero, if `src.len() != width * height`,
/// or if `dst.len() != src.len()`.
pub fn convolve_and_transpose(
    kernel: &Kernel,
    src: &[u32],
    dst: &mut [u32],
    width: u32,
    height: u32,
    options: &ConvolveOptions,
) {
    let w = width as usize;
    let h = height as usize;
    assert!(w > 0 && h > 0, "cannot convolve a {width}x{height} buffer");
    assert_eq!(
        src.len(),
        w * h,
        "source buffer does not hold {width}x{height} pixels"
    );
    assert_eq!(dst.len(), src.len(), "destination buffer length differs from source");

    let taps = kernel_taps(kernel);
    log::trace!(
        "convolve_and_transpose: {}x{} taps={} {:?}",
        width,
        height,
        taps.len(),
        options
    );

    // Output row `x` of the transposed buffer holds source column `x`.
    match options.strategy {
        ExecutionStrategy::Serial => dst
            .chunks_mut(h)
            .enumerate()
            .for_each(|(x, column)| convolve_column(&taps, src, column, x, w, options)),
        ExecutionStrategy::Parallel => dst
            .par_chunks_mut(h)
            .enumerate()
            .for_each(|(x, column)| convolve_column(&taps, src, column, x, w, options)),
    }
}

/// Run both passes of a separable convolution and return the result in the
/// original orientation.
///
/// The first pass uses `options` as given, the second uses
/// [`ConvolveOptions::second_pass`].
pub fn convolve_separable(
    kernel: &Kernel,
    src: &[u32],
    width: u32,
    height: u32,
    options: &ConvolveOptions,
) -> Vec<u32> {
    let mut transposed = vec![0u32; src.len()];
    convolve_and_transpose(kernel, src, &mut transposed, width, height, options);

    let mut out = vec![0u32; src.len()];
    convolve_and_transpose(
        kernel,
        &transposed,
        &mut out,
        height,
        width,
        &options.second_pass(),
    );
    out
}

/// Single convolve-and-transpose pass over an image.
///
/// Returns a new `height x width` image; `image` is not modified.
pub fn convolve_transpose_image(
    image: &ArgbImage,
    kernel: &Kernel,
    options: &ConvolveOptions,
) -> FilterResult<ArgbImage> {
    let mut out = vec![0u32; image.pixels().len()];
    convolve_and_transpose(
        kernel,
        image.pixels(),
        &mut out,
        image.width(),
        image.height(),
        options,
    );
    Ok(ArgbImage::from_pixels(image.height(), image.width(), out)?)
}

/// Nonzero taps of the kernel's first row as `(offset, weight)` pairs.
fn kernel_taps(kernel: &Kernel) -> Vec<(isize, f32)> {
    let half = kernel.half_width() as isize;
    let row = &kernel.data()[..kernel.width() as usize];
    (-half..=half)
        .filter_map(|col| {
            let f = row[(half + col) as usize];
            (f != 0.0).then_some((col, f))
        })
        .collect()
}

/// Fill one output row (source column `x`) of the transposed buffer.
fn convolve_column(
    taps: &[(isize, f32)],
    src: &[u32],
    column: &mut [u32],
    x: usize,
    width: usize,
    options: &ConvolveOptions,
) {
    for (y, out) in column.iter_mut().enumerate() {
        let row = &src[y * width..(y + 1) * width];
        *out = convolve_pixel(taps, row, x, options);
    }
}

fn convolve_pixel(taps: &[(isize, f32)], row: &[u32], x: usize, options: &ConvolveOptions) -> u32 {
    let (mut a, mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);

    for &(col, f) in taps {
        let Some(ix) = options.edge_mode.resolve(x as isize + col, row.len()) else {
            continue;
        };

        let (pa, pr, pg, pb) = color::extract_argb(row[ix]);
        let (mut pr, mut pg, mut pb) = (pr as i32, pg as i32, pb as i32);
        if options.premultiply {
            let a255 = pa as f32 * (1.0 / 255.0);
            pr = (pr as f32 * a255) as i32;
            pg = (pg as f32 * a255) as i32;
            pb = (pb as f32 * a255) as i32;
        }

        a += f * pa as f32;
        r += f * pr as f32;
        g += f * pg as f32;
        b += f * pb as f32;
    }

    if options.unpremultiply && a != 0.0 && a != 255.0 {
        let f = 255.0 / a;
        r *= f;
        g *= f;
        b *= f;
    }

    let ia = if options.use_alpha {
        color::clamp_channel((a + 0.5) as i32)
    } else {
        color::OPAQUE
    };
    let ir = color::clamp_channel((r + 0.5) as i32);
    let ig = color::clamp_channel((g + 0.5) as i32);
    let ib = color::clamp_channel((b + 0.5) as i32);
    color::compose_argb(ia, ir, ig, ib)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> u32 {
        color::compose_rgb(v, v, v)
    }

    fn identity() -> Kernel {
        Kernel::from_slice(1, 1, &[1.0]).unwrap()
    }

    #[test]
    fn test_identity_pass_transposes() {
        // 3x2 source:  1 2 3
        //              4 5 6
        let src = [1, 2, 3, 4, 5, 6].map(gray);
        let mut dst = [0u32; 6];
        convolve_and_transpose(&identity(), &src, &mut dst, 3, 2, &ConvolveOptions::new());
        // 2x3 output:  1 4
        //              2 5
        //              3 6
        assert_eq!(dst, [1, 4, 2, 5, 3, 6].map(gray));
    }

    #[test]
    fn test_two_identity_passes_restore_orientation() {
        let src: Vec<u32> = (0..12).map(|v| gray(v * 20)).collect();
        let out = convolve_separable(&identity(), &src, 4, 3, &ConvolveOptions::new());
        assert_eq!(out, src);
    }

    #[test]
    fn test_clamp_edges_single_row() {
        let kernel = Kernel::from_slice(3, 1, &[0.25, 0.5, 0.25]).unwrap();
        let src = [0, 40, 80, 120, 200].map(gray);
        let mut dst = [0u32; 5];
        convolve_and_transpose(&kernel, &src, &mut dst, 5, 1, &ConvolveOptions::new());

        // x=0: 0.25*0 + 0.5*0 + 0.25*40 = 10
        // x=1: 0.25*0 + 0.5*40 + 0.25*80 = 40
        // x=2: 0.25*40 + 0.5*80 + 0.25*120 = 80
        // x=3: 0.25*80 + 0.5*120 + 0.25*200 = 130
        // x=4: 0.25*120 + 0.5*200 + 0.25*200 = 180
        assert_eq!(dst, [10, 40, 80, 130, 180].map(gray));
    }

    #[test]
    fn test_wrap_edges_single_row() {
        let kernel = Kernel::from_slice(3, 1, &[0.25, 0.5, 0.25]).unwrap();
        let src = [0, 40, 80, 120, 200].map(gray);
        let mut dst = [0u32; 5];
        let options = ConvolveOptions::new().with_edge_mode(EdgeMode::Wrap);
        convolve_and_transpose(&kernel, &src, &mut dst, 5, 1, &options);

        // x=0 samples 200 on the left, x=4 samples 0 on the right
        assert_eq!(color::red(dst[0]), 60);
        assert_eq!(color::red(dst[4]), 130);
        assert_eq!(color::red(dst[2]), 80);
    }

    #[test]
    fn test_zero_edges_drop_taps() {
        let kernel = Kernel::from_slice(3, 1, &[0.25, 0.5, 0.25]).unwrap();
        let src = [200, 200, 200].map(gray);
        let mut dst = [0u32; 3];
        let options = ConvolveOptions::new().with_edge_mode(EdgeMode::Zero);
        convolve_and_transpose(&kernel, &src, &mut dst, 3, 1, &options);

        // Missing taps lose their weight, alpha included
        assert_eq!(dst[0], color::compose_argb(191, 150, 150, 150));
        assert_eq!(dst[1], gray(200));
        assert_eq!(dst[2], dst[0]);
    }

    #[test]
    fn test_alpha_disabled_forces_opaque() {
        let kernel = Kernel::from_slice(3, 1, &[0.25, 0.5, 0.25]).unwrap();
        let src = [0x00102030u32; 4];
        let mut dst = [0u32; 4];
        let options = ConvolveOptions::new().with_alpha(false);
        convolve_and_transpose(&kernel, &src, &mut dst, 4, 1, &options);
        assert!(dst.iter().all(|&p| p == 0xff102030));
    }

    #[test]
    fn test_premultiply_stops_color_bleeding() {
        // Opaque red next to transparent green
        let kernel = Kernel::from_slice(3, 1, &[0.25, 0.5, 0.25]).unwrap();
        let src = [0xffff0000u32, 0x0000ff00];
        let mut dst = [0u32; 2];

        let straight = ConvolveOptions::new();
        convolve_and_transpose(&kernel, &src, &mut dst, 2, 1, &straight);
        // Without premultiplication the invisible green leaks into red
        assert!(color::green(dst[0]) > 0);

        let premul = ConvolveOptions::new()
            .with_premultiply(true)
            .with_unpremultiply(true);
        convolve_and_transpose(&kernel, &src, &mut dst, 2, 1, &premul);
        assert_eq!(color::green(dst[0]), 0);
        assert_eq!(color::green(dst[1]), 0);
        assert_eq!(color::red(dst[1]), 255);
        assert_eq!(color::alpha(dst[1]), 64);
    }

    #[test]
    fn test_unpremultiply_skips_opaque_and_transparent() {
        let kernel = identity();
        let src = [0xff804020u32, 0x00804020];
        let mut dst = [0u32; 2];
        let options = ConvolveOptions::new().with_unpremultiply(true);
        convolve_and_transpose(&kernel, &src, &mut dst, 2, 1, &options);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_second_pass_swaps_flags() {
        let first = ConvolveOptions::new().with_premultiply(true);
        let second = first.second_pass();
        assert!(!second.premultiply);
        assert!(second.unpremultiply);
        assert_eq!(second.edge_mode, first.edge_mode);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let kernel = Kernel::gaussian(3.0);
        let src: Vec<u32> = (0..(17 * 11) as u32)
            .map(|i| i.wrapping_mul(2_654_435_761))
            .collect();
        let serial = ConvolveOptions::new().with_premultiply(true);
        let parallel = serial.with_strategy(ExecutionStrategy::Parallel);

        let out_serial = convolve_separable(&kernel, &src, 17, 11, &serial);
        let out_parallel = convolve_separable(&kernel, &src, 17, 11, &parallel);
        assert_eq!(out_serial, out_parallel);
    }

    #[test]
    fn test_convolve_transpose_image_dimensions() {
        let img = ArgbImage::filled(6, 2, 0xff336699).unwrap();
        let out = convolve_transpose_image(&img, &Kernel::gaussian(1.0), &ConvolveOptions::new())
            .unwrap();
        assert_eq!(out.width(), 2);
        assert_eq!(out.height(), 6);
        assert!(out.pixels().iter().all(|&p| p == 0xff336699));
    }

    #[test]
    #[should_panic(expected = "does not hold")]
    fn test_source_length_mismatch_panics() {
        let mut dst = [0u32; 5];
        convolve_and_transpose(&identity(), &[0u32; 5], &mut dst, 3, 2, &ConvolveOptions::new());
    }

    #[test]
    #[should_panic(expected = "destination")]
    fn test_destination_length_mismatch_panics() {
        let mut dst = [0u32; 5];
        convolve_and_transpose(&identity(), &[0u32; 6], &mut dst, 3, 2, &ConvolveOptions::new());
    }
}
