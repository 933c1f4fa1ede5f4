//! Binary selection masks.

use crate::error::{MaskError, Result};

use super::morphology;

/// Mask value for selected pixels.
pub const SELECTED: u8 = 255;
/// Mask value for unselected pixels.
pub const UNSELECTED: u8 = 0;

/// A dense row-major byte grid, one byte per pixel.
///
/// Row 0 corresponds to `v = 0` in UV space. Freshly rasterized masks only
/// hold [`SELECTED`] and [`UNSELECTED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Mask {
    /// Create an empty (all unselected) mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![UNSELECTED; width * height],
        }
    }

    /// Wrap existing bytes. Fails if the length is not `width * height`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(MaskError::invalid_param(
                "data",
                data.len(),
                "length must equal width * height",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The raw bytes, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the mask and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.data[y * self.width + x]
    }

    /// Set the byte at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.data[y * self.width + x] = value;
    }

    /// Whether the pixel at `(x, y)` is selected (non-zero).
    #[inline]
    pub fn is_selected(&self, x: usize, y: usize) -> bool {
        self.get(x, y) != UNSELECTED
    }

    /// Number of non-zero pixels.
    pub fn selected_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != UNSELECTED).count()
    }

    /// Flip polarity: every byte `v` becomes `255 - v`.
    pub fn invert(&mut self) {
        for v in &mut self.data {
            *v = SELECTED - *v;
        }
    }

    /// Grow the selected (255) region by `iterations` pixels.
    ///
    /// See [`morphology::dilate_black`].
    pub fn dilate_black(&mut self, iterations: usize) {
        morphology::dilate_black(&mut self.data, self.width, self.height, iterations);
    }

    /// Grow the unselected (0) region by `iterations` pixels.
    ///
    /// See [`morphology::dilate_white`].
    pub fn dilate_white(&mut self, iterations: usize) {
        morphology::dilate_white(&mut self.data, self.width, self.height, iterations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unselected() {
        let mask = Mask::new(3, 2);
        assert_eq!(mask.as_slice().len(), 6);
        assert_eq!(mask.selected_count(), 0);
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(Mask::from_raw(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            Mask::from_raw(2, 2, vec![0; 3]),
            Err(MaskError::InvalidParameter { name: "data", .. })
        ));
    }

    #[test]
    fn test_invert_round_trip() {
        let original = Mask::from_raw(3, 1, vec![0, 255, 17]).unwrap();
        let mut mask = original.clone();

        mask.invert();
        assert_eq!(mask.as_slice(), &[255, 0, 238]);
        mask.invert();
        assert_eq!(mask, original);
    }

    #[test]
    fn test_get_set_row_major() {
        let mut mask = Mask::new(3, 2);
        mask.set(2, 1, SELECTED);
        assert_eq!(mask.as_slice()[5], SELECTED);
        assert!(mask.is_selected(2, 1));
        assert!(!mask.is_selected(1, 1));
    }
}
