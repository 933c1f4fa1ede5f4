//! Morphological dilation of binary masks.
//!
//! Both operations grow one value of a mask into its 8-connected
//! neighbourhood, one pixel per iteration:
//!
//! - [`dilate_black`] grows selected pixels (255), which render black in the
//!   simple composite mode.
//! - [`dilate_white`] grows unselected pixels (0), which render white.
//!
//! Neighbourhoods are clamped at the image border (no wrap-around). Every
//! iteration reads the previous buffer and writes a complete new one; the two
//! buffers are swapped between iterations.
//!
//! # Example
//!
//! ```
//! use uvmask::raster::morphology::dilate_black;
//!
//! let mut mask = vec![
//!     0, 0,
//!     0, 255,
//! ];
//! dilate_black(&mut mask, 2, 2, 1);
//! assert_eq!(mask, vec![255; 4]);
//! ```

use rayon::prelude::*;

use super::mask::{SELECTED, UNSELECTED};

/// Grow the 255 region of a mask by `iterations` pixels.
///
/// A 255 pixel stays 255; any other pixel becomes 255 when one of its up to 8
/// neighbours is 255. Rows are processed in parallel.
///
/// Does nothing when `iterations` is 0, either dimension is 0, or
/// `mask.len() != width * height`.
pub fn dilate_black(mask: &mut [u8], width: usize, height: usize, iterations: usize) {
    dilate_impl(mask, width, height, iterations, SELECTED, true);
}

/// Grow the 0 region of a mask by `iterations` pixels.
///
/// The dual of [`dilate_black`]: used when a mask has been inverted, so that
/// padding still grows the islands the user selected.
pub fn dilate_white(mask: &mut [u8], width: usize, height: usize, iterations: usize) {
    dilate_impl(mask, width, height, iterations, UNSELECTED, true);
}

/// Single-threaded [`dilate_black`].
pub fn dilate_black_sequential(mask: &mut [u8], width: usize, height: usize, iterations: usize) {
    dilate_impl(mask, width, height, iterations, SELECTED, false);
}

/// Single-threaded [`dilate_white`].
pub fn dilate_white_sequential(mask: &mut [u8], width: usize, height: usize, iterations: usize) {
    dilate_impl(mask, width, height, iterations, UNSELECTED, false);
}

pub(crate) fn dilate_impl(
    mask: &mut [u8],
    width: usize,
    height: usize,
    iterations: usize,
    grow: u8,
    parallel: bool,
) {
    if iterations == 0 || width == 0 || height == 0 || mask.len() != width * height {
        return;
    }

    let mut src = mask.to_vec();
    let mut dst = vec![UNSELECTED; src.len()];

    for _ in 0..iterations {
        let changed = if parallel {
            dst.par_chunks_mut(width)
                .enumerate()
                .map(|(y, row)| dilate_row(&src, width, height, y, grow, row))
                .reduce(|| false, |a, b| a || b)
        } else {
            dst.chunks_mut(width)
                .enumerate()
                .fold(false, |acc, (y, row)| dilate_row(&src, width, height, y, grow, row) || acc)
        };

        std::mem::swap(&mut src, &mut dst);

        // Converged: further passes would copy the buffer unchanged.
        if !changed {
            break;
        }
    }

    mask.copy_from_slice(&src);
}

/// Compute one output row. Returns whether any pixel changed.
fn dilate_row(src: &[u8], width: usize, height: usize, y: usize, grow: u8, out: &mut [u8]) -> bool {
    let y0 = y.saturating_sub(1);
    let y1 = (y + 1).min(height - 1);
    let mut changed = false;

    for x in 0..width {
        let value = src[y * width + x];
        if value == grow {
            out[x] = value;
            continue;
        }

        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(width - 1);
        let hit = (y0..=y1).any(|ny| src[ny * width + x0..=ny * width + x1].contains(&grow));

        if hit {
            out[x] = grow;
            changed = true;
        } else {
            out[x] = value;
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(mask: &[u8], value: u8) -> usize {
        mask.iter().filter(|&&v| v == value).count()
    }

    #[test]
    fn test_corner_pixel_fills_2x2() {
        let mut mask = vec![0, 0, 0, 255];
        dilate_black(&mut mask, 2, 2, 1);
        assert_eq!(mask, vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_iterations_is_noop() {
        let original = vec![0, 255, 0, 0, 0, 0, 0, 0, 0];
        let mut mask = original.clone();
        dilate_black(&mut mask, 3, 3, 0);
        dilate_white(&mut mask, 3, 3, 0);
        assert_eq!(mask, original);
    }

    #[test]
    fn test_invalid_dimensions_are_noop() {
        let original = vec![0, 255, 0, 0];
        let mut mask = original.clone();
        dilate_black(&mut mask, 3, 3, 2);
        assert_eq!(mask, original);
        dilate_black(&mut mask, 0, 4, 2);
        assert_eq!(mask, original);

        let mut empty: Vec<u8> = Vec::new();
        dilate_black(&mut empty, 0, 0, 1);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_single_pass_grows_one_ring() {
        // Center pixel of a 5x5 grid grows into its 3x3 neighbourhood.
        let mut mask = vec![0u8; 25];
        mask[12] = 255;
        dilate_black(&mut mask, 5, 5, 1);

        for y in 0..5 {
            for x in 0..5 {
                let expected = if (1..=3).contains(&x) && (1..=3).contains(&y) { 255 } else { 0 };
                assert_eq!(mask[y * 5 + x], expected, "pixel ({}, {})", x, y);
            }
        }

        dilate_black(&mut mask, 5, 5, 1);
        assert_eq!(count(&mask, 255), 25);
    }

    #[test]
    fn test_no_wrap_around() {
        // A pixel on the left edge must not leak to the right edge.
        let mut mask = vec![0u8; 16];
        mask[4] = 255; // (0, 1)
        dilate_black(&mut mask, 4, 4, 1);
        assert_eq!(mask[3], 0); // (3, 0)
        assert_eq!(mask[7], 0); // (3, 1)
        assert_eq!(mask[11], 0); // (3, 2)
    }

    #[test]
    fn test_dilate_white_is_dual() {
        let mut black = vec![0u8; 36];
        black[14] = 255;
        black[21] = 255;
        let mut white: Vec<u8> = black.iter().map(|v| 255 - v).collect();

        dilate_black(&mut black, 6, 6, 2);
        dilate_white(&mut white, 6, 6, 2);

        let flipped: Vec<u8> = white.iter().map(|v| 255 - v).collect();
        assert_eq!(black, flipped);
    }

    #[test]
    fn test_growth_is_monotonic() {
        let mut mask = vec![0u8; 64];
        mask[9] = 255;
        mask[50] = 255;

        let mut previous = mask.clone();
        for _ in 0..5 {
            dilate_black(&mut mask, 8, 8, 1);
            for (before, after) in previous.iter().zip(&mask) {
                assert!(*after >= *before);
            }
            assert!(count(&mask, 255) >= count(&previous, 255));
            previous = mask.clone();
        }
    }

    #[test]
    fn test_iterations_compose() {
        let mut once = vec![0u8; 49];
        once[0] = 255;
        let mut stepwise = once.clone();

        dilate_black(&mut once, 7, 7, 3);
        for _ in 0..3 {
            dilate_black(&mut stepwise, 7, 7, 1);
        }
        assert_eq!(once, stepwise);
        // Chebyshev distance 3 from the corner covers a 4x4 block.
        assert_eq!(count(&once, 255), 16);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut parallel = vec![0u8; 30 * 20];
        for i in (0..parallel.len()).step_by(37) {
            parallel[i] = 255;
        }
        let mut sequential = parallel.clone();

        dilate_white(&mut parallel, 30, 20, 2);
        dilate_white_sequential(&mut sequential, 30, 20, 2);
        assert_eq!(parallel, sequential);

        dilate_black(&mut parallel, 30, 20, 3);
        dilate_black_sequential(&mut sequential, 30, 20, 3);
        assert_eq!(parallel, sequential);
    }
}
