//! Regression test parameters and operations

use crate::error::TestError;
use pixconv_core::ArgbImage;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Record mismatches as failures (default)
    #[default]
    Compare,
    /// Print mismatches without failing the test
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check, the mode, and the
/// failures recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "gaussian")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters.
    ///
    /// Also installs `env_logger` in test mode so `RUST_LOG=debug` shows
    /// the library's log output; repeated calls are harmless.
    pub fn new(test_name: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record(&mut self, failure: TestError) {
        eprintln!("Failure in {}_reg: {}", self.test_name, failure);
        log::warn!("{}_reg: {}", self.test_name, failure);
        if !self.display() {
            self.failures.push(failure);
        }
    }

    /// Compare two floating-point values.
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        } else {
            true
        }
    }

    /// Compare two packed pixel buffers for exact equality.
    pub fn compare_pixels(&mut self, expected: &[u32], actual: &[u32]) -> bool {
        self.index += 1;

        let first_diff = if expected.len() != actual.len() {
            Some(expected.len().min(actual.len()))
        } else {
            expected.iter().zip(actual).position(|(e, a)| e != a)
        };

        match first_diff {
            None => true,
            Some(pos) => {
                eprintln!(
                    "  pixel buffers differ at {} (lengths {} vs {})",
                    pos,
                    expected.len(),
                    actual.len()
                );
                self.record(TestError::ImageMismatch { index: self.index });
                false
            }
        }
    }

    /// Compare two images for identical size and pixels.
    pub fn compare_images(&mut self, expected: &ArgbImage, actual: &ArgbImage) -> bool {
        if !expected.sizes_equal(actual) {
            self.index += 1;
            eprintln!(
                "  size mismatch: {}x{} vs {}x{}",
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            );
            self.record(TestError::ImageMismatch { index: self.index });
            return false;
        }
        self.compare_pixels(expected.pixels(), actual.pixels())
    }

    /// Clean up and report results.
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.failures.is_empty()
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(mode, RegTestMode::Compare | RegTestMode::Display));
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert_eq!(rp.index(), 2);
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        rp.mode = RegTestMode::Compare;
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert!(matches!(
            rp.failures()[0],
            TestError::ValueMismatch { index: 1, .. }
        ));
    }

    #[test]
    fn test_display_mode_does_not_fail() {
        let mut rp = RegParams::new("test");
        rp.mode = RegTestMode::Display;
        assert!(!rp.compare_values(1.0, 2.0, 0.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_pixels() {
        let mut rp = RegParams::new("test");
        rp.mode = RegTestMode::Compare;
        assert!(rp.compare_pixels(&[1, 2, 3], &[1, 2, 3]));
        assert!(!rp.compare_pixels(&[1, 2, 3], &[1, 9, 3]));
        assert!(!rp.compare_pixels(&[1, 2], &[1, 2, 3]));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_images_size_mismatch() {
        let mut rp = RegParams::new("test");
        rp.mode = RegTestMode::Compare;
        let a = ArgbImage::new(2, 3).unwrap();
        let b = ArgbImage::new(3, 2).unwrap();
        assert!(!rp.compare_images(&a, &b));
        assert!(rp.compare_images(&a, &a.clone()));
    }
}
