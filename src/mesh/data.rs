//! Raw indexed mesh arrays as supplied by a host application or file loader.

use nalgebra::{Point2, Point3, Vector3};

use super::index::VertexId;

/// Number of UV channels a mesh can carry.
///
/// Requested channels outside `0..MAX_UV_CHANNELS` are clamped into range.
pub const MAX_UV_CHANNELS: usize = 8;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as an `[r, g, b, a]` array.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Indexed triangle mesh data with up to [`MAX_UV_CHANNELS`] UV sets.
///
/// This is the boundary type between a mesh source and the analysis. It is a
/// plain bundle of arrays; consistency is checked when the mesh is analyzed,
/// not when it is built.
///
/// # Example
///
/// ```
/// use uvmask::mesh::MeshData;
/// use nalgebra::{Point2, Point3};
///
/// let mesh = MeshData::from_triangles(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     &[[0, 1, 2]],
/// )
/// .with_uvs(0, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)]);
///
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_triangles(), 1);
/// assert!(mesh.has_uvs(0));
/// assert!(!mesh.has_uvs(1));
/// ```
#[derive(Debug, Clone)]
pub struct MeshData {
    positions: Vec<Point3<f64>>,
    normals: Option<Vec<Vector3<f64>>>,
    uv_channels: [Option<Vec<Point2<f64>>>; MAX_UV_CHANNELS],
    colors: Option<Vec<Rgba>>,
    indices: Vec<usize>,
    readable: bool,
}

impl MeshData {
    /// Create a mesh from positions and a flat triangle index list.
    pub fn new(positions: Vec<Point3<f64>>, indices: Vec<usize>) -> Self {
        Self {
            positions,
            normals: None,
            uv_channels: Default::default(),
            colors: None,
            indices,
            readable: true,
        }
    }

    /// Create a mesh from positions and `[v0, v1, v2]` triangles.
    pub fn from_triangles(positions: Vec<Point3<f64>>, triangles: &[[usize; 3]]) -> Self {
        let indices = triangles.iter().flat_map(|t| t.iter().copied()).collect();
        Self::new(positions, indices)
    }

    /// Attach per-vertex normals.
    pub fn with_normals(mut self, normals: Vec<Vector3<f64>>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Attach UV coordinates for a channel. Channels past the last are clamped.
    pub fn with_uvs(mut self, channel: usize, uvs: Vec<Point2<f64>>) -> Self {
        self.uv_channels[clamp_channel(channel)] = Some(uvs);
        self
    }

    /// Attach existing per-vertex colors.
    pub fn with_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Mark whether the host can read the mesh arrays back.
    ///
    /// Analysis of a mesh that is not readable fails with
    /// [`MaskError::InvalidMeshState`](crate::error::MaskError::InvalidMeshState).
    pub fn with_readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of complete triangles in the index list.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Position of a single vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// Vertex normals, if present.
    pub fn normals(&self) -> Option<&[Vector3<f64>]> {
        self.normals.as_deref()
    }

    /// UV coordinates of a channel, if present. Channels past the last are clamped.
    pub fn uvs(&self, channel: usize) -> Option<&[Point2<f64>]> {
        self.uv_channels[clamp_channel(channel)].as_deref()
    }

    /// Whether a channel carries any UV coordinates.
    pub fn has_uvs(&self, channel: usize) -> bool {
        self.uvs(channel).is_some_and(|uvs| !uvs.is_empty())
    }

    /// Indices of all channels that carry UV coordinates.
    pub fn uv_channels(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_UV_CHANNELS).filter(|&c| self.has_uvs(c))
    }

    /// Existing vertex colors, if present.
    pub fn colors(&self) -> Option<&[Rgba]> {
        self.colors.as_deref()
    }

    /// Flat triangle index list.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Whether the host can read the mesh arrays.
    pub fn is_readable(&self) -> bool {
        self.readable
    }
}

/// Clamp a UV channel number into `0..MAX_UV_CHANNELS`.
#[inline]
pub fn clamp_channel(channel: usize) -> usize {
    channel.min(MAX_UV_CHANNELS - 1)
}
