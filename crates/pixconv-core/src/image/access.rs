//! Pixel access functions
//!
//! Coordinate-based getters and setters on top of the flat buffer.

use super::ArgbImage;
use crate::error::{Error, Result};

impl ArgbImage {
    #[inline]
    fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index_of(x, y)])
    }

    /// Get a pixel value without returning `Option`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.data[self.index_of(x, y)]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, argb: u32) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        let idx = self.index_of(x, y);
        self.data[idx] = argb;
        Ok(())
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = self.index_of(0, y);
        &self.data[start..start + self.width as usize]
    }
}

#[cfg(test)]
mod tests {
    use crate::ArgbImage;
    use crate::error::Error;

    #[test]
    fn test_get_set_pixel() {
        let mut img = ArgbImage::new(4, 3).unwrap();
        img.set_pixel(3, 2, 0xff123456).unwrap();
        assert_eq!(img.get_pixel(3, 2), Some(0xff123456));
        assert_eq!(img.pixels()[11], 0xff123456);
        assert_eq!(img.get_pixel(4, 0), None);
        assert_eq!(img.get_pixel(0, 3), None);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut img = ArgbImage::new(4, 3).unwrap();
        assert_eq!(
            img.set_pixel(4, 0, 1),
            Err(Error::IndexOutOfBounds { index: 4, len: 4 })
        );
        assert_eq!(
            img.set_pixel(0, 3, 1),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_row() {
        let img = ArgbImage::from_pixels(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.row(0), &[1, 2, 3]);
        assert_eq!(img.row(1), &[4, 5, 6]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_pixel_unchecked_panics() {
        let img = ArgbImage::new(2, 2).unwrap();
        img.get_pixel_unchecked(2, 0);
    }
}
