//! Edge classification and island flood fill.

use std::collections::{HashMap, VecDeque};

use nalgebra::{Point2, Point3, Vector3};

use super::key::{PositionKey, UvEdgeKey, UvKey};
use super::{BorderEdge, BorderKind, Island, Triangle, UvAnalysis};
use crate::error::{MaskError, Result};
use crate::mesh::{clamp_channel, IslandId, MeshData, TriangleId, VertexId};

/// One triangle's use of a 3D edge.
#[derive(Debug, Clone, Copy)]
struct EdgeUse {
    triangle: TriangleId,
    /// Local edge index (0..3) within the triangle.
    edge: usize,
    /// Quantized UVs at the edge's low and high canonical vertex.
    uv: [UvKey; 2],
}

/// Analyze one UV channel of a mesh.
///
/// The channel is clamped into `0..MAX_UV_CHANNELS`. The analysis:
///
/// 1. copies positions, normals (zero-filled when absent) and the channel's UVs,
/// 2. builds one [`Triangle`] per three indices,
/// 3. groups triangle edges by their unordered 3D vertex pair, after welding
///    vertices that share a quantized position (coincident faces built from
///    different vertices are never joined),
/// 4. records an edge used by one triangle as a [`BorderKind::Boundary`] and a
///    shared edge whose triangles disagree on its UVs as a [`BorderKind::Seam`],
/// 5. connects triangles across the remaining edges by their quantized UV
///    endpoints, and
/// 6. flood-fills that adjacency into islands.
///
/// # Errors
///
/// * [`MaskError::InvalidMeshState`] if the mesh is not readable, its index
///   list is not a whole number of triangles, an index is out of range, or the
///   UV channel length disagrees with the vertex count.
/// * [`MaskError::MissingUvChannel`] if the channel has no UV data.
///
/// All checks run before any topology is computed.
pub fn analyze(mesh: &MeshData, uv_channel: usize) -> Result<UvAnalysis> {
    let channel = clamp_channel(uv_channel);
    let uvs = validate(mesh, channel)?;

    let num_vertices = mesh.num_vertices();
    let positions = mesh.positions().to_vec();
    let normals = match mesh.normals() {
        Some(normals) if normals.len() == num_vertices => normals.to_vec(),
        Some(normals) => {
            log::warn!(
                "ignoring {} normals for {} vertices",
                normals.len(),
                num_vertices
            );
            vec![Vector3::zeros(); num_vertices]
        }
        None => vec![Vector3::zeros(); num_vertices],
    };
    let uvs = uvs.to_vec();

    let triangles = build_triangles(mesh.indices(), &uvs);
    let (border_edges, border_flags) = classify_edges(&positions, &triangles);
    let (islands, triangle_islands) = flood_fill_islands(&triangles, &border_flags);

    log::debug!(
        "analyzed UV channel {}: {} triangles, {} islands, {} border edges",
        channel,
        triangles.len(),
        islands.len(),
        border_edges.len()
    );

    Ok(UvAnalysis {
        uv_channel: channel,
        positions,
        normals,
        uvs,
        triangles,
        islands,
        border_edges,
        triangle_islands,
    })
}

fn validate(mesh: &MeshData, channel: usize) -> Result<&[Point2<f64>]> {
    if !mesh.is_readable() {
        return Err(MaskError::invalid_mesh("mesh data is not readable"));
    }

    let uvs = match mesh.uvs(channel) {
        Some(uvs) if !uvs.is_empty() => uvs,
        _ => return Err(MaskError::MissingUvChannel { channel }),
    };

    let num_vertices = mesh.num_vertices();
    if uvs.len() != num_vertices {
        return Err(MaskError::invalid_mesh(format!(
            "UV channel {} has {} coordinates for {} vertices",
            channel,
            uvs.len(),
            num_vertices
        )));
    }

    let indices = mesh.indices();
    if indices.len() % 3 != 0 {
        return Err(MaskError::invalid_mesh(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }

    if let Some(pos) = indices.iter().position(|&v| v >= num_vertices) {
        return Err(MaskError::invalid_mesh(format!(
            "triangle {} references vertex {} but the mesh has {} vertices",
            pos / 3,
            indices[pos],
            num_vertices
        )));
    }

    Ok(uvs)
}

fn build_triangles(indices: &[usize], uvs: &[Point2<f64>]) -> Vec<Triangle> {
    indices
        .chunks_exact(3)
        .enumerate()
        .map(|(t, chunk)| Triangle {
            id: TriangleId::new(t),
            vertices: [
                VertexId::new(chunk[0]),
                VertexId::new(chunk[1]),
                VertexId::new(chunk[2]),
            ],
            uvs: [uvs[chunk[0]], uvs[chunk[1]], uvs[chunk[2]]],
        })
        .collect()
}

/// Map every vertex to the first vertex sharing its quantized position.
fn weld_vertices(positions: &[Point3<f64>]) -> Vec<usize> {
    let mut first_at: HashMap<PositionKey, usize> = HashMap::with_capacity(positions.len());
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| *first_at.entry(PositionKey::new(p)).or_insert(i))
        .collect()
}

/// Assign each triangle a layer among the triangles that cover the same
/// welded corners.
///
/// Coincident faces built from different vertices (the two sides of a
/// double-sided card) get different layers, so welding never joins their
/// edges. A face repeated with the same vertex indices keeps its layer.
fn face_layers(weld: &[usize], triangles: &[Triangle]) -> Vec<usize> {
    let mut variants: HashMap<[usize; 3], Vec<[usize; 3]>> = HashMap::new();
    triangles
        .iter()
        .map(|tri| {
            let mut raw = tri.vertices.map(|v| v.index());
            raw.sort_unstable();
            let mut welded = raw.map(|v| weld[v]);
            welded.sort_unstable();

            let seen = variants.entry(welded).or_default();
            match seen.iter().position(|r| *r == raw) {
                Some(layer) => layer,
                None => {
                    seen.push(raw);
                    seen.len() - 1
                }
            }
        })
        .collect()
}

/// Classify every 3D edge and flag the triangle edges that lie on a border.
///
/// Border edges come out in the order their 3D edge was first seen.
fn classify_edges(
    positions: &[Point3<f64>],
    triangles: &[Triangle],
) -> (Vec<BorderEdge>, Vec<[bool; 3]>) {
    let weld = weld_vertices(positions);
    let layers = face_layers(&weld, triangles);

    let mut slots: HashMap<(usize, usize, usize), usize> =
        HashMap::with_capacity(triangles.len() * 2);
    let mut edges: Vec<Vec<EdgeUse>> = Vec::with_capacity(triangles.len() * 2);

    for (tri, &layer) in triangles.iter().zip(&layers) {
        for e in 0..3 {
            let [va, vb] = tri.edge_vertices(e);
            let [uva, uvb] = tri.edge_uvs(e);
            let (a, b) = (weld[va.index()], weld[vb.index()]);
            let (ka, kb) = (UvKey::new(&uva), UvKey::new(&uvb));

            // Orient UVs to the canonical vertex order so reversed traversals compare equal.
            let (key, uv) = if a <= b {
                ((a, b, layer), [ka, kb])
            } else {
                ((b, a, layer), [kb, ka])
            };

            let slot = *slots.entry(key).or_insert_with(|| {
                edges.push(Vec::with_capacity(2));
                edges.len() - 1
            });
            edges[slot].push(EdgeUse {
                triangle: tri.id,
                edge: e,
                uv,
            });
        }
    }

    let mut border_edges = Vec::new();
    let mut border_flags = vec![[false; 3]; triangles.len()];

    for uses in &edges {
        let first = uses[0];
        let kind = if uses.len() == 1 {
            BorderKind::Boundary
        } else if uses[1..].iter().any(|u| u.uv != first.uv) {
            BorderKind::Seam
        } else {
            continue;
        };

        for u in uses {
            border_flags[u.triangle.index()][u.edge] = true;
        }

        let tri = &triangles[first.triangle.index()];
        border_edges.push(BorderEdge {
            vertices: tri.edge_vertices(first.edge),
            uvs: tri.edge_uvs(first.edge),
            kind,
        });
    }

    (border_edges, border_flags)
}

/// Partition triangles into islands over shared non-border UV edges.
fn flood_fill_islands(
    triangles: &[Triangle],
    border_flags: &[[bool; 3]],
) -> (Vec<Island>, Vec<IslandId>) {
    let mut adjacency: HashMap<UvEdgeKey, Vec<TriangleId>> = HashMap::new();
    let mut triangle_edges: Vec<[Option<UvEdgeKey>; 3]> = vec![[None; 3]; triangles.len()];

    for tri in triangles {
        for e in 0..3 {
            if border_flags[tri.id.index()][e] {
                continue;
            }
            let [a, b] = tri.edge_uvs(e);
            let key = UvEdgeKey::from_points(&a, &b);
            adjacency.entry(key).or_default().push(tri.id);
            triangle_edges[tri.id.index()][e] = Some(key);
        }
    }

    let mut visited = vec![false; triangles.len()];
    let mut triangle_islands = vec![IslandId::new(0); triangles.len()];
    let mut islands = Vec::new();
    let mut queue = VecDeque::new();

    for seed in 0..triangles.len() {
        if visited[seed] {
            continue;
        }

        let island_id = IslandId::new(islands.len());
        let mut members = Vec::new();
        visited[seed] = true;
        queue.push_back(TriangleId::new(seed));

        while let Some(t) = queue.pop_front() {
            members.push(t);
            triangle_islands[t.index()] = island_id;

            for key in triangle_edges[t.index()].iter().flatten() {
                for &n in &adjacency[key] {
                    if !visited[n.index()] {
                        visited[n.index()] = true;
                        queue.push_back(n);
                    }
                }
            }
        }

        islands.push(Island::new(members));
    }

    (islands, triangle_islands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MAX_UV_CHANNELS;

    fn p3(x: f64, y: f64) -> Point3<f64> {
        Point3::new(x, y, 0.0)
    }

    fn p2(u: f64, v: f64) -> Point2<f64> {
        Point2::new(u, v)
    }

    /// Unit quad with one shared UV layout.
    fn quad() -> MeshData {
        MeshData::from_triangles(
            vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(1.0, 1.0), p3(0.0, 1.0)],
            &[[0, 1, 2], [0, 2, 3]],
        )
        .with_uvs(0, vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(1.0, 1.0), p2(0.0, 1.0)])
    }

    /// Unit quad whose diagonal is split: the second triangle's copies of the
    /// diagonal vertices are mapped elsewhere in UV space.
    fn seamed_quad() -> MeshData {
        MeshData::from_triangles(
            vec![
                p3(0.0, 0.0),
                p3(1.0, 0.0),
                p3(1.0, 1.0),
                // Split copies of vertices 0 and 2
                p3(0.0, 0.0),
                p3(1.0, 1.0),
                p3(0.0, 1.0),
            ],
            &[[0, 1, 2], [3, 4, 5]],
        )
        .with_uvs(
            0,
            vec![
                p2(0.0, 0.0),
                p2(0.4, 0.0),
                p2(0.4, 0.4),
                p2(0.6, 0.6),
                p2(1.0, 1.0),
                p2(0.6, 1.0),
            ],
        )
    }

    /// A grid of `n x n` quads with shared vertices and planar UVs.
    fn grid(n: usize) -> MeshData {
        let mut positions = Vec::new();
        let mut uvs = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                positions.push(p3(i as f64, j as f64));
                uvs.push(p2(i as f64 / n as f64, j as f64 / n as f64));
            }
        }
        let mut faces = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + (n + 1);
                let v11 = v01 + 1;
                faces.push([v00, v10, v11]);
                faces.push([v00, v11, v01]);
            }
        }
        MeshData::from_triangles(positions, &faces).with_uvs(0, uvs)
    }

    fn assert_partition(analysis: &UvAnalysis) {
        let mut seen = vec![0usize; analysis.num_triangles()];
        for (i, island) in analysis.islands().iter().enumerate() {
            assert!(!island.is_empty());
            for &t in island.triangles() {
                seen[t.index()] += 1;
                assert_eq!(analysis.island_of(t), IslandId::new(i));
            }
        }
        assert!(seen.iter().all(|&c| c == 1), "triangle coverage: {:?}", seen);
    }

    #[test]
    fn test_single_quad_is_one_island() {
        let analysis = analyze(&quad(), 0).unwrap();

        assert_eq!(analysis.num_triangles(), 2);
        assert_eq!(analysis.num_islands(), 1);
        assert_eq!(analysis.border_edges().len(), 4);
        assert!(analysis
            .border_edges()
            .iter()
            .all(|e| e.kind == BorderKind::Boundary));
        assert_partition(&analysis);
    }

    #[test]
    fn test_seam_splits_islands() {
        let analysis = analyze(&seamed_quad(), 0).unwrap();

        assert_eq!(analysis.num_islands(), 2);
        assert_ne!(
            analysis.island_of(TriangleId::new(0)),
            analysis.island_of(TriangleId::new(1))
        );

        let seams: Vec<_> = analysis
            .border_edges()
            .iter()
            .filter(|e| e.kind == BorderKind::Seam)
            .collect();
        assert_eq!(seams.len(), 1);
        // Represented by the first triangle's copy of the diagonal
        assert_eq!(seams[0].vertices, [VertexId::new(2), VertexId::new(0)]);
        assert_eq!(seams[0].uvs, [p2(0.4, 0.4), p2(0.0, 0.0)]);

        let boundaries = analysis
            .border_edges()
            .iter()
            .filter(|e| e.kind == BorderKind::Boundary)
            .count();
        assert_eq!(boundaries, 4);
        assert_partition(&analysis);
    }

    #[test]
    fn test_flipped_uvs_on_shared_edge_is_seam() {
        // Both triangles use the same vertex pair on the diagonal, but the
        // second triangle's split copies swap the diagonal's UV endpoints.
        let mesh = MeshData::from_triangles(
            vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(1.0, 1.0), p3(0.0, 0.0), p3(1.0, 1.0), p3(0.0, 1.0)],
            &[[0, 1, 2], [3, 4, 5]],
        )
        .with_uvs(
            0,
            vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(1.0, 1.0), p2(1.0, 1.0), p2(0.0, 0.0), p2(0.0, 1.0)],
        );

        let analysis = analyze(&mesh, 0).unwrap();
        assert_eq!(analysis.num_islands(), 2);
        assert!(analysis
            .border_edges()
            .iter()
            .any(|e| e.kind == BorderKind::Seam));
    }

    #[test]
    fn test_split_normals_with_matching_uvs_stay_connected() {
        // Hard-edge split: duplicated vertices with identical UVs.
        let mesh = MeshData::from_triangles(
            vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(1.0, 1.0), p3(0.0, 0.0), p3(1.0, 1.0), p3(0.0, 1.0)],
            &[[0, 1, 2], [3, 4, 5]],
        )
        .with_uvs(
            0,
            vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(1.0, 1.0), p2(0.0, 0.0), p2(1.0, 1.0), p2(0.0, 1.0)],
        );

        let analysis = analyze(&mesh, 0).unwrap();
        assert_eq!(analysis.num_islands(), 1);
        assert_eq!(analysis.border_edges().len(), 4);
    }

    #[test]
    fn test_disconnected_triangles_are_separate_islands() {
        let mesh = MeshData::from_triangles(
            vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(0.0, 1.0), p3(5.0, 0.0), p3(6.0, 0.0), p3(5.0, 1.0)],
            &[[0, 1, 2], [3, 4, 5]],
        )
        .with_uvs(
            0,
            vec![p2(0.0, 0.0), p2(0.4, 0.0), p2(0.0, 0.4), p2(0.5, 0.5), p2(0.9, 0.5), p2(0.5, 0.9)],
        );

        let analysis = analyze(&mesh, 0).unwrap();
        assert_eq!(analysis.num_islands(), 2);
        assert_eq!(analysis.border_edges().len(), 6);
        assert_partition(&analysis);
    }

    #[test]
    fn test_every_single_use_edge_is_border() {
        let analysis = analyze(&grid(4), 0).unwrap();

        // A 4x4 grid has 16 boundary edges around its rim.
        let boundaries = analysis
            .border_edges()
            .iter()
            .filter(|e| e.kind == BorderKind::Boundary)
            .count();
        assert_eq!(boundaries, 16);
        assert_eq!(analysis.num_islands(), 1);
        assert_partition(&analysis);
    }

    #[test]
    fn test_double_sided_card_keeps_both_sides_open() {
        // Back face reuses the front's positions and UVs through its own vertices.
        let mesh = MeshData::from_triangles(
            vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(0.0, 1.0), p3(0.0, 0.0), p3(1.0, 0.0), p3(0.0, 1.0)],
            &[[0, 1, 2], [3, 5, 4]],
        )
        .with_uvs(
            0,
            vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0), p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0)],
        );

        let analysis = analyze(&mesh, 0).unwrap();
        assert_eq!(analysis.border_edges().len(), 6);
        assert!(analysis
            .border_edges()
            .iter()
            .all(|e| e.kind == BorderKind::Boundary));
        assert_eq!(analysis.num_islands(), 2);
        assert_partition(&analysis);
    }

    #[test]
    fn test_double_sided_quad_keeps_each_diagonal_interior() {
        let front = [p3(0.0, 0.0), p3(1.0, 0.0), p3(1.0, 1.0), p3(0.0, 1.0)];
        let uvs = [p2(0.0, 0.0), p2(1.0, 0.0), p2(1.0, 1.0), p2(0.0, 1.0)];
        let mesh = MeshData::from_triangles(
            front.iter().chain(&front).copied().collect(),
            &[[0, 1, 2], [0, 2, 3], [4, 6, 5], [4, 7, 6]],
        )
        .with_uvs(0, uvs.iter().chain(&uvs).copied().collect());

        let triangles = build_triangles(mesh.indices(), mesh.uvs(0).unwrap());
        let (border_edges, flags) = classify_edges(mesh.positions(), &triangles);

        assert_eq!(border_edges.len(), 8);
        assert!(border_edges.iter().all(|e| e.kind == BorderKind::Boundary));
        // The diagonal is edge 2, 0, 0 and 2 of the four faces
        assert!(!flags[0][2]);
        assert!(!flags[1][0]);
        assert!(!flags[2][0]);
        assert!(!flags[3][2]);
    }

    #[test]
    fn test_edge_shared_by_three_triangles() {
        // Three triangles fan around the edge (0, 0, 0)-(1, 0, 0). The third
        // uses split copies of its end points mapped elsewhere in UV space.
        let mesh = MeshData::from_triangles(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, -1.0, 0.0),
                Point3::new(0.5, 0.0, 1.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
            ],
            &[[0, 1, 2], [1, 0, 3], [5, 6, 4]],
        )
        .with_uvs(
            0,
            vec![
                p2(0.0, 0.0),
                p2(0.5, 0.0),
                p2(0.25, 0.4),
                p2(0.25, -0.4),
                p2(0.75, 0.9),
                p2(0.6, 0.6),
                p2(0.9, 0.6),
            ],
        );

        let analysis = analyze(&mesh, 0).unwrap();
        let (_, flags) = classify_edges(analysis.positions(), analysis.triangles());
        assert!(flags[0][0] && flags[1][0] && flags[2][0]);

        let seams: Vec<_> = analysis
            .border_edges()
            .iter()
            .filter(|e| e.kind == BorderKind::Seam)
            .collect();
        assert_eq!(seams.len(), 1);
        assert_eq!(seams[0].vertices, [VertexId::new(0), VertexId::new(1)]);
        assert_eq!(seams[0].uvs, [p2(0.0, 0.0), p2(0.5, 0.0)]);

        assert_eq!(analysis.border_edges().len(), 7);
        assert_eq!(analysis.num_islands(), 3);
        assert_partition(&analysis);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let mesh = seamed_quad();
        let a = analyze(&mesh, 0).unwrap();
        let b = analyze(&mesh, 0).unwrap();

        assert_eq!(a.islands(), b.islands());
        assert_eq!(a.border_edges(), b.border_edges());
    }

    #[test]
    fn test_normals_zero_filled_when_absent() {
        let analysis = analyze(&quad(), 0).unwrap();
        assert_eq!(analysis.normals().len(), 4);
        assert!(analysis.normals().iter().all(|n| *n == Vector3::zeros()));
    }

    #[test]
    fn test_channel_is_clamped() {
        let mesh = MeshData::from_triangles(
            vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(0.0, 1.0)],
            &[[0, 1, 2]],
        )
        .with_uvs(MAX_UV_CHANNELS - 1, vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0)]);

        let analysis = analyze(&mesh, 99).unwrap();
        assert_eq!(analysis.uv_channel(), MAX_UV_CHANNELS - 1);
    }

    #[test]
    fn test_missing_uv_channel() {
        let result = analyze(&quad(), 1);
        assert!(matches!(result, Err(MaskError::MissingUvChannel { channel: 1 })));
    }

    #[test]
    fn test_unreadable_mesh() {
        let result = analyze(&quad().with_readable(false), 0);
        assert!(matches!(result, Err(MaskError::InvalidMeshState(_))));
    }

    #[test]
    fn test_out_of_range_index() {
        let mesh = MeshData::new(vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(0.0, 1.0)], vec![0, 1, 7])
            .with_uvs(0, vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0)]);
        assert!(matches!(analyze(&mesh, 0), Err(MaskError::InvalidMeshState(_))));
    }

    #[test]
    fn test_partial_triangle_in_index_list() {
        let mesh = MeshData::new(vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(0.0, 1.0)], vec![0, 1, 2, 0])
            .with_uvs(0, vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0)]);
        assert!(matches!(analyze(&mesh, 0), Err(MaskError::InvalidMeshState(_))));
    }

    #[test]
    fn test_uv_length_mismatch() {
        let mesh = MeshData::from_triangles(
            vec![p3(0.0, 0.0), p3(1.0, 0.0), p3(0.0, 1.0)],
            &[[0, 1, 2]],
        )
        .with_uvs(0, vec![p2(0.0, 0.0)]);
        assert!(matches!(analyze(&mesh, 0), Err(MaskError::InvalidMeshState(_))));
    }

    #[test]
    fn test_empty_index_list_has_no_islands() {
        let mesh = MeshData::new(vec![p3(0.0, 0.0)], vec![]).with_uvs(0, vec![p2(0.0, 0.0)]);
        let analysis = analyze(&mesh, 0).unwrap();
        assert_eq!(analysis.num_islands(), 0);
        assert!(analysis.border_edges().is_empty());
    }

    #[test]
    fn test_island_stats_and_lookup() {
        let analysis = analyze(&seamed_quad(), 0).unwrap();

        let first = analysis.island_of(TriangleId::new(0));
        let stats = analysis.island_stats(first).unwrap();
        assert_eq!(stats.triangle_count, 1);
        assert!((stats.uv_area - 0.08).abs() < 1e-12);
        assert_eq!(stats.uv_min, p2(0.0, 0.0));
        assert_eq!(stats.uv_max, p2(0.4, 0.4));

        assert_eq!(analysis.island_at_uv(&p2(0.3, 0.1)), Some(first));
        assert_eq!(
            analysis.island_at_uv(&p2(0.7, 0.9)),
            Some(analysis.island_of(TriangleId::new(1)))
        );
        assert_eq!(analysis.island_at_uv(&p2(0.1, 0.9)), None);
        assert!(analysis.island_stats(IslandId::new(5)).is_none());
    }
}
