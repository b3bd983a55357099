//! Edge handling for kernel taps that fall outside the image

/// Policy for resolving a sample coordinate outside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeMode {
    /// Out-of-range taps contribute nothing
    Zero,
    /// Out-of-range taps reuse the nearest edge pixel
    #[default]
    Clamp,
    /// Out-of-range taps wrap around to the opposite edge
    Wrap,
}

impl EdgeMode {
    /// Resolve `coord` on an axis of length `len`.
    ///
    /// In-range coordinates are returned unchanged. Returns `None` when the
    /// tap should be skipped, which only [`EdgeMode::Zero`] does.
    ///
    /// # Panics
    ///
    /// Panics if `len == 0`.
    #[inline]
    pub fn resolve(self, coord: isize, len: usize) -> Option<usize> {
        assert!(len > 0, "cannot resolve a coordinate on an empty axis");
        let last = len as isize - 1;
        if (0..=last).contains(&coord) {
            return Some(coord as usize);
        }
        match self {
            EdgeMode::Zero => None,
            EdgeMode::Clamp => Some(coord.clamp(0, last) as usize),
            EdgeMode::Wrap => Some(coord.rem_euclid(len as isize) as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_unchanged() {
        for mode in [EdgeMode::Zero, EdgeMode::Clamp, EdgeMode::Wrap] {
            assert_eq!(mode.resolve(0, 5), Some(0));
            assert_eq!(mode.resolve(4, 5), Some(4));
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(EdgeMode::Clamp.resolve(-3, 5), Some(0));
        assert_eq!(EdgeMode::Clamp.resolve(5, 5), Some(4));
        assert_eq!(EdgeMode::Clamp.resolve(100, 5), Some(4));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(EdgeMode::Wrap.resolve(-1, 5), Some(4));
        assert_eq!(EdgeMode::Wrap.resolve(-6, 5), Some(4));
        assert_eq!(EdgeMode::Wrap.resolve(5, 5), Some(0));
        assert_eq!(EdgeMode::Wrap.resolve(12, 5), Some(2));
    }

    #[test]
    fn test_zero() {
        assert_eq!(EdgeMode::Zero.resolve(-1, 5), None);
        assert_eq!(EdgeMode::Zero.resolve(5, 5), None);
    }

    #[test]
    fn test_default_is_clamp() {
        assert_eq!(EdgeMode::default(), EdgeMode::Clamp);
    }
}
