//! Baking a selection into per-vertex colors.

use super::options::VertexBakeOptions;
use super::pixel::{paint_over_base, paint_without_base};
use crate::analysis::{IslandSelection, UvAnalysis};
use crate::mesh::Rgba;
use crate::raster::{SELECTED, UNSELECTED};

/// Flag every vertex referenced by a triangle of a selected island.
///
/// Island ids out of range for `analysis` and vertex indices at or past
/// `vertex_count` are ignored.
pub fn selected_vertices(
    analysis: &UvAnalysis,
    selection: &IslandSelection,
    vertex_count: usize,
) -> Vec<bool> {
    let mut selected = vec![false; vertex_count];
    for id in selection.valid_islands(analysis) {
        for tri in analysis.island_triangles(id) {
            for v in tri.vertices {
                if let Some(flag) = selected.get_mut(v.index()) {
                    *flag = true;
                }
            }
        }
    }
    selected
}

/// Bake a selection into one color per vertex.
///
/// Follows the channel-write rules of
/// [`composite_mask`](super::composite_mask), with vertices in place of
/// pixels:
///
/// - With `base_colors`: selected vertices get enabled R/G/B set to 0 and an
///   enabled A set to 255; unselected vertices keep their base color.
/// - Without: every vertex starts opaque white; enabled R/G/B become
///   `selected ? 0 : 255` and an enabled A becomes `selected ? 255 : 0`.
///
/// A `base_colors` slice whose length differs from `vertex_count` is treated
/// as absent.
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
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(9.0, 9.0, 9.0),
///     ],
///     &[[0, 1, 2]],
/// )
/// .with_uvs(0, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0), Point2::new(0.5, 0.5)]);
/// let analysis = analyze(&mesh, 0).unwrap();
///
/// let colors = composite_vertex_colors(
///     &analysis,
///     &IslandSelection::all(&analysis),
///     mesh.num_vertices(),
///     None,
///     &VertexBakeOptions::default(),
/// );
/// assert_eq!(colors[0], Rgba::BLACK);
/// assert_eq!(colors[3], Rgba::WHITE);
/// ```
pub fn composite_vertex_colors(
    analysis: &UvAnalysis,
    selection: &IslandSelection,
    vertex_count: usize,
    base_colors: Option<&[Rgba]>,
    options: &VertexBakeOptions,
) -> Vec<Rgba> {
    let mut selected = selected_vertices(analysis, selection, vertex_count);
    if options.invert {
        for flag in &mut selected {
            *flag = !*flag;
        }
    }

    let base = match base_colors {
        Some(colors) if colors.len() == vertex_count => Some(colors),
        Some(colors) => {
            log::warn!(
                "ignoring {} base vertex colors for {} vertices",
                colors.len(),
                vertex_count
            );
            None
        }
        None => None,
    };

    match base {
        Some(base) => base
            .iter()
            .zip(&selected)
            .map(|(&color, &sel)| {
                let mut px = color;
                paint_over_base(&mut px, sel, options.channels);
                px
            })
            .collect(),
        None => selected
            .iter()
            .map(|&sel| {
                let mut px = Rgba::WHITE;
                paint_without_base(&mut px, if sel { SELECTED } else { UNSELECTED }, options.channels);
                px
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::composite::ChannelFlags;
    use crate::mesh::{IslandId, MeshData, TriangleId};
    use nalgebra::{Point2, Point3};

    /// Two separate triangles plus one vertex no triangle uses.
    fn two_triangles() -> (MeshData, UvAnalysis) {
        let mesh = MeshData::from_triangles(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(5.0, 0.0, 0.0),
                Point3::new(6.0, 0.0, 0.0),
                Point3::new(5.0, 1.0, 0.0),
                Point3::new(9.0, 9.0, 9.0),
            ],
            &[[0, 1, 2], [3, 4, 5]],
        )
        .with_uvs(
            0,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.4, 0.0),
                Point2::new(0.0, 0.4),
                Point2::new(0.6, 0.6),
                Point2::new(1.0, 0.6),
                Point2::new(0.6, 1.0),
                Point2::new(0.5, 0.5),
            ],
        );
        let analysis = analyze(&mesh, 0).unwrap();
        (mesh, analysis)
    }

    fn first_island(analysis: &UvAnalysis) -> IslandSelection {
        let mut selection = IslandSelection::new();
        selection.insert(analysis.island_of(TriangleId::new(0)));
        selection
    }

    #[test]
    fn test_selected_vertices() {
        let (mesh, analysis) = two_triangles();
        let flags = selected_vertices(&analysis, &first_island(&analysis), mesh.num_vertices());
        assert_eq!(flags, vec![true, true, true, false, false, false, false]);
    }

    #[test]
    fn test_selected_vertices_ignores_stale_islands_and_short_counts() {
        let (_, analysis) = two_triangles();
        let mut selection = IslandSelection::all(&analysis);
        selection.insert(IslandId::new(40));

        let flags = selected_vertices(&analysis, &selection, 2);
        assert_eq!(flags, vec![true, true]);
    }

    #[test]
    fn test_bake_without_base() {
        let (mesh, analysis) = two_triangles();
        let options = VertexBakeOptions::default().with_channels(ChannelFlags::ALL);
        let colors =
            composite_vertex_colors(&analysis, &first_island(&analysis), mesh.num_vertices(), None, &options);

        assert_eq!(colors[0], Rgba::new(0, 0, 0, 255));
        assert_eq!(colors[4], Rgba::new(255, 255, 255, 0));
    }

    #[test]
    fn test_bake_over_base_keeps_unselected() {
        let (mesh, analysis) = two_triangles();
        let base: Vec<Rgba> = (0..mesh.num_vertices())
            .map(|i| Rgba::new(i as u8 * 10, 50, 60, 70))
            .collect();
        let options = VertexBakeOptions::default().with_channels(ChannelFlags::new(false, false, true, true));

        let colors = composite_vertex_colors(
            &analysis,
            &first_island(&analysis),
            mesh.num_vertices(),
            Some(base.as_slice()),
            &options,
        );

        assert_eq!(colors[1], Rgba::new(10, 50, 0, 255));
        assert_eq!(colors[3], base[3]);
        assert_eq!(colors[6], base[6]);
    }

    #[test]
    fn test_mismatched_base_is_treated_as_absent() {
        let (mesh, analysis) = two_triangles();
        let short_base = vec![Rgba::new(1, 2, 3, 4); 3];
        let options = VertexBakeOptions::default();

        let with_bad_base = composite_vertex_colors(
            &analysis,
            &first_island(&analysis),
            mesh.num_vertices(),
            Some(short_base.as_slice()),
            &options,
        );
        let without_base =
            composite_vertex_colors(&analysis, &first_island(&analysis), mesh.num_vertices(), None, &options);

        assert_eq!(with_bad_base, without_base);
    }

    #[test]
    fn test_invert_flips_vertex_selection() {
        let (mesh, analysis) = two_triangles();
        let options = VertexBakeOptions::default().with_invert(true);
        let colors =
            composite_vertex_colors(&analysis, &first_island(&analysis), mesh.num_vertices(), None, &options);

        assert_eq!(colors[0], Rgba::WHITE);
        assert_eq!(colors[3], Rgba::BLACK);
        assert_eq!(colors[6], Rgba::BLACK);
    }
}
