//! UV topology analysis.
//!
//! [`analyze`] turns a [`MeshData`](crate::mesh::MeshData) and a UV channel
//! into a [`UvAnalysis`]: the triangle list with resolved UVs, the border edges
//! (true mesh boundaries and UV seams), and a partition of all triangles into
//! UV islands.
//!
//! # Example
//!
//! ```
//! use uvmask::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! // A unit quad made of two triangles sharing their diagonal.
//! let mesh = MeshData::from_triangles(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     &[[0, 1, 2], [0, 2, 3]],
//! )
//! .with_uvs(0, vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]);
//!
//! let analysis = analyze(&mesh, 0).unwrap();
//! assert_eq!(analysis.num_islands(), 1);
//! assert_eq!(analysis.border_edges().len(), 4);
//! ```

mod key;
mod selection;
mod topology;

use nalgebra::{Point2, Point3, Vector3};

use crate::mesh::{IslandId, TriangleId, VertexId};

pub use key::{UvEdgeKey, UvKey, QUANTIZATION_SCALE};
pub use selection::IslandSelection;
pub use topology::analyze;

/// A triangle with its vertex indices and the UVs of the analyzed channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Position of this triangle in the analysis triangle list.
    pub id: TriangleId,
    /// Vertex indices in winding order.
    pub vertices: [VertexId; 3],
    /// UV coordinates of the three corners.
    pub uvs: [Point2<f64>; 3],
}

impl Triangle {
    /// Vertices of local edge `e` (0, 1 or 2), running from corner `e` to corner `e + 1`.
    #[inline]
    pub fn edge_vertices(&self, e: usize) -> [VertexId; 2] {
        [self.vertices[e], self.vertices[(e + 1) % 3]]
    }

    /// UV endpoints of local edge `e`.
    #[inline]
    pub fn edge_uvs(&self, e: usize) -> [Point2<f64>; 2] {
        [self.uvs[e], self.uvs[(e + 1) % 3]]
    }

    /// Signed area in UV space (positive for counter-clockwise UV winding).
    pub fn uv_signed_area(&self) -> f64 {
        let [a, b, c] = self.uvs;
        0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
    }

    /// Unsigned area in UV space.
    #[inline]
    pub fn uv_area(&self) -> f64 {
        self.uv_signed_area().abs()
    }

    /// Whether a UV point lies inside or on the boundary of this triangle.
    ///
    /// Triangles with zero UV area contain nothing.
    pub fn contains_uv(&self, p: &Point2<f64>) -> bool {
        let [a, b, c] = self.uvs;
        if self.uv_area() < 1e-14 {
            return false;
        }
        let d0 = cross(&a, &b, p);
        let d1 = cross(&b, &c, p);
        let d2 = cross(&c, &a, p);
        (d0 >= 0.0 && d1 >= 0.0 && d2 >= 0.0) || (d0 <= 0.0 && d1 <= 0.0 && d2 <= 0.0)
    }
}

#[inline]
fn cross(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Why an edge was classified as a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderKind {
    /// The edge is referenced by exactly one triangle.
    Boundary,
    /// The edge is shared, but its triangles disagree on its UV coordinates.
    Seam,
}

/// A mesh edge that terminates island growth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderEdge {
    /// Vertex indices of the edge, as seen by its representative triangle.
    pub vertices: [VertexId; 2],
    /// UV endpoints of the edge, as seen by its representative triangle.
    pub uvs: [Point2<f64>; 2],
    /// Boundary or seam.
    pub kind: BorderKind,
}

/// A maximal set of triangles connected through shared non-border UV edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Island {
    triangles: Vec<TriangleId>,
}

impl Island {
    pub(crate) fn new(triangles: Vec<TriangleId>) -> Self {
        Self { triangles }
    }

    /// Triangles of this island in discovery order.
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the island has no triangles. Never true for analysis output.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Summary figures for one island.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IslandStats {
    /// Number of triangles in the island.
    pub triangle_count: usize,
    /// Total UV-space area.
    pub uv_area: f64,
    /// Minimum corner of the UV bounding box.
    pub uv_min: Point2<f64>,
    /// Maximum corner of the UV bounding box.
    pub uv_max: Point2<f64>,
}

/// The result of analyzing one UV channel of a mesh.
///
/// An analysis owns copies of the mesh arrays it was built from and is never
/// updated in place: when the mesh, the channel or the topology changes, run
/// [`analyze`] again and replace the old value.
#[derive(Debug, Clone)]
pub struct UvAnalysis {
    pub(crate) uv_channel: usize,
    pub(crate) positions: Vec<Point3<f64>>,
    pub(crate) normals: Vec<Vector3<f64>>,
    pub(crate) uvs: Vec<Point2<f64>>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) islands: Vec<Island>,
    pub(crate) border_edges: Vec<BorderEdge>,
    pub(crate) triangle_islands: Vec<IslandId>,
}

impl UvAnalysis {
    /// The UV channel that was analyzed (after clamping).
    pub fn uv_channel(&self) -> usize {
        self.uv_channel
    }

    /// Number of vertices in the analyzed mesh.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Vertex normals (zero vectors when the mesh had none).
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// Vertex UVs of the analyzed channel.
    pub fn uvs(&self) -> &[Point2<f64>] {
        &self.uvs
    }

    /// All triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// A single triangle.
    #[inline]
    pub fn triangle(&self, t: TriangleId) -> &Triangle {
        &self.triangles[t.index()]
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// All islands; an island's id is its position in this slice.
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// An island, or `None` if the id is out of range for this analysis.
    pub fn island(&self, id: IslandId) -> Option<&Island> {
        self.islands.get(id.index())
    }

    /// Number of islands.
    #[inline]
    pub fn num_islands(&self) -> usize {
        self.islands.len()
    }

    /// Iterate over all island ids.
    pub fn island_ids(&self) -> impl Iterator<Item = IslandId> {
        (0..self.islands.len()).map(IslandId::new)
    }

    /// Border edges (boundaries and seams) in first-seen order.
    pub fn border_edges(&self) -> &[BorderEdge] {
        &self.border_edges
    }

    /// The island a triangle belongs to.
    #[inline]
    pub fn island_of(&self, t: TriangleId) -> IslandId {
        self.triangle_islands[t.index()]
    }

    /// Iterate over the triangles of an island. Empty for out-of-range ids.
    pub fn island_triangles(&self, id: IslandId) -> impl Iterator<Item = &Triangle> + '_ {
        self.island(id)
            .map(|island| island.triangles())
            .unwrap_or_default()
            .iter()
            .map(move |&t| self.triangle(t))
    }

    /// Compute summary figures for an island.
    pub fn island_stats(&self, id: IslandId) -> Option<IslandStats> {
        let island = self.island(id)?;
        let mut uv_min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut uv_max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut uv_area = 0.0;

        for tri in self.island_triangles(id) {
            uv_area += tri.uv_area();
            for uv in &tri.uvs {
                uv_min.x = uv_min.x.min(uv.x);
                uv_min.y = uv_min.y.min(uv.y);
                uv_max.x = uv_max.x.max(uv.x);
                uv_max.y = uv_max.y.max(uv.y);
            }
        }

        Some(IslandStats {
            triangle_count: island.len(),
            uv_area,
            uv_min,
            uv_max,
        })
    }

    /// Find the island whose triangle contains a UV point.
    ///
    /// When islands overlap in UV space, the island of the lowest-numbered
    /// containing triangle wins.
    pub fn island_at_uv(&self, uv: &Point2<f64>) -> Option<IslandId> {
        self.triangles
            .iter()
            .find(|tri| tri.contains_uv(uv))
            .map(|tri| self.island_of(tri.id))
    }
}
