//! Scan conversion of UV triangles into a mask.

use nalgebra::Point2;

use super::mask::{Mask, SELECTED};
use crate::analysis::{IslandSelection, UvAnalysis};

/// Triangles whose doubled pixel-space area is below this are skipped.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-9;

/// Rasterize the union of all selected islands into a `width x height` mask.
///
/// Selected islands that do not exist in `analysis` are skipped. Covered
/// pixels are set to 255 and everything else is left at 0, so the result is
/// binary. A zero dimension yields an empty mask.
///
/// # Example
///
/// ```
/// use uvmask::prelude::*;
/// use nalgebra::{Point2, Point3};
///
/// let mesh = MeshData::from_triangles(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     &[[0, 1, 2], [0, 2, 3]],
/// )
/// .with_uvs(0, vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ]);
/// let analysis = analyze(&mesh, 0).unwrap();
///
/// let mask = build_union_mask(&analysis, &IslandSelection::all(&analysis), 4, 4);
/// assert_eq!(mask.selected_count(), 16);
/// ```
pub fn build_union_mask(
    analysis: &UvAnalysis,
    selection: &IslandSelection,
    width: usize,
    height: usize,
) -> Mask {
    let mut mask = Mask::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    let mut rasterized = 0usize;
    let mut degenerate = 0usize;

    for id in selection.valid_islands(analysis) {
        for tri in analysis.island_triangles(id) {
            if rasterize_triangle(&mut mask, &tri.uvs) {
                rasterized += 1;
            } else {
                degenerate += 1;
            }
        }
    }

    let stale = selection.len() - selection.valid_islands(analysis).count();
    if stale > 0 {
        log::warn!("skipped {} selected islands not present in the analysis", stale);
    }
    if degenerate > 0 {
        log::debug!("skipped {} degenerate triangles", degenerate);
    }
    log::debug!(
        "rasterized {} triangles into {}x{} mask ({} pixels selected)",
        rasterized,
        width,
        height,
        mask.selected_count()
    );

    mask
}

/// Rasterize one triangle given by its UV corners, setting covered pixels to 255.
///
/// UVs are clamped to `[0, 1]` and mapped to pixel space as `uv * (dim - 1)`,
/// so `0` and `1` land on the first and last pixel. A pixel is covered when all
/// three edge functions evaluated at its coordinates share a sign; pixels on
/// an edge count as inside for both neighbouring triangles.
///
/// Returns `false`, leaving the mask untouched, for degenerate triangles.
pub fn rasterize_triangle(mask: &mut Mask, uvs: &[Point2<f64>; 3]) -> bool {
    let (width, height) = (mask.width(), mask.height());
    if width == 0 || height == 0 {
        return false;
    }

    let scale_x = (width - 1) as f64;
    let scale_y = (height - 1) as f64;
    let [a, b, c] = uvs.map(|uv| {
        Point2::new(uv.x.clamp(0.0, 1.0) * scale_x, uv.y.clamp(0.0, 1.0) * scale_y)
    });

    let area = edge_function(&a, &b, &c);
    if area.is_nan() || area.abs() < DEGENERATE_AREA_EPSILON {
        return false;
    }

    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
    let max_x = a.x.max(b.x).max(c.x).ceil().min(scale_x) as usize;
    let max_y = a.y.max(b.y).max(c.y).ceil().min(scale_y) as usize;

    let data = mask.as_mut_slice();
    for y in min_y..=max_y {
        let row = y * width;
        for x in min_x..=max_x {
            let p = Point2::new(x as f64, y as f64);
            let w0 = edge_function(&b, &c, &p);
            let w1 = edge_function(&c, &a, &p);
            let w2 = edge_function(&a, &b, &p);

            let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
            if inside {
                data[row + x] = SELECTED;
            }
        }
    }

    true
}

/// `(p - a) x (b - a)`: which side of the directed line `a -> b` the point `p` is on.
#[inline]
pub fn edge_function(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> f64 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}
