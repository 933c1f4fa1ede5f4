//! Color pixel buffers.

use crate::error::{MaskError, Result};
use crate::mesh::Rgba;

/// A dense row-major RGBA8 image.
///
/// Row 0 corresponds to `v = 0` in UV space (bottom-up), matching [`Mask`].
/// Image writers flip rows when encoding to top-down formats.
///
/// [`Mask`]: crate::raster::Mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl ColorBuffer {
    /// Create a buffer filled with one color.
    pub fn new(width: usize, height: usize, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Wrap existing pixels. Fails if the length is not `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(MaskError::invalid_param(
                "pixels",
                pixels.len(),
                "length must equal width * height",
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from interleaved RGBA bytes.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != width * height * 4 {
            return Err(MaskError::invalid_param(
                "bytes",
                bytes.len(),
                "length must equal width * height * 4",
            ));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
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

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// All pixels, mutably.
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Consume the buffer and return its pixels.
    pub fn into_pixels(self) -> Vec<Rgba> {
        self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.pixels[y * self.width + x]
    }

    /// Set the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgba) {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.pixels[y * self.width + x] = color;
    }

    /// Interleaved RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Nearest-neighbour resample to a new size.
    ///
    /// Target pixel `x` samples source column `round(x / width * (src_width - 1))`,
    /// clamped to the source; rows likewise. Returns the buffer unchanged
    /// (cloned) when the size already matches, and opaque white when the source
    /// is empty.
    pub fn resample_nearest(&self, width: usize, height: usize) -> ColorBuffer {
        if width == self.width && height == self.height {
            return self.clone();
        }
        if self.width == 0 || self.height == 0 {
            return ColorBuffer::new(width, height, Rgba::WHITE);
        }

        let columns: Vec<usize> = (0..width)
            .map(|x| nearest_source(x, width, self.width))
            .collect();

        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = nearest_source(y, height, self.height) * self.width;
            pixels.extend(columns.iter().map(|&sx| self.pixels[row + sx]));
        }

        ColorBuffer {
            width,
            height,
            pixels,
        }
    }
}

#[inline]
fn nearest_source(target: usize, target_size: usize, source_size: usize) -> usize {
    let t = target as f64 / target_size as f64;
    let s = (t * (source_size - 1) as f64).round() as usize;
    s.min(source_size - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> Rgba {
        Rgba::new(v, v, v, 255)
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(ColorBuffer::from_pixels(2, 2, vec![Rgba::WHITE; 4]).is_ok());
        assert!(ColorBuffer::from_pixels(2, 2, vec![Rgba::WHITE; 5]).is_err());
    }

    #[test]
    fn test_rgba_bytes_round_trip() {
        let bytes = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let buffer = ColorBuffer::from_rgba_bytes(2, 1, &bytes).unwrap();
        assert_eq!(buffer.get(1, 0), Rgba::new(5, 6, 7, 8));
        assert_eq!(buffer.to_rgba_bytes(), bytes);
    }

    #[test]
    fn test_resample_same_size_is_identity() {
        let buffer = ColorBuffer::from_pixels(2, 1, vec![gray(10), gray(20)]).unwrap();
        assert_eq!(buffer.resample_nearest(2, 1), buffer);
    }

    #[test]
    fn test_resample_upscale() {
        // 2x1 source to 4x1 target: columns round(x/4 * 1) = 0, 0, 1, 1
        let buffer = ColorBuffer::from_pixels(2, 1, vec![gray(10), gray(20)]).unwrap();
        let up = buffer.resample_nearest(4, 1);
        let values: Vec<u8> = up.pixels().iter().map(|p| p.r).collect();
        assert_eq!(values, vec![10, 10, 20, 20]);
    }

    #[test]
    fn test_resample_downscale() {
        // 4 columns to 2: columns round(x/2 * 3) = 0, 2
        let buffer =
            ColorBuffer::from_pixels(4, 1, vec![gray(0), gray(1), gray(2), gray(3)]).unwrap();
        let down = buffer.resample_nearest(2, 1);
        let values: Vec<u8> = down.pixels().iter().map(|p| p.r).collect();
        assert_eq!(values, vec![0, 2]);
    }

    #[test]
    fn test_resample_rows_and_columns_independently() {
        let buffer = ColorBuffer::from_pixels(
            2,
            2,
            vec![gray(1), gray(2), gray(3), gray(4)],
        )
        .unwrap();
        let out = buffer.resample_nearest(4, 4);
        assert_eq!(out.get(0, 0), gray(1));
        assert_eq!(out.get(3, 0), gray(2));
        assert_eq!(out.get(0, 3), gray(3));
        assert_eq!(out.get(3, 3), gray(4));
    }

    #[test]
    fn test_resample_empty_source_is_white() {
        let empty = ColorBuffer::new(0, 0, Rgba::BLACK);
        let out = empty.resample_nearest(2, 2);
        assert!(out.pixels().iter().all(|&p| p == Rgba::WHITE));
    }
}
