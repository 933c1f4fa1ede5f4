//! Mesh input types.
//!
//! A [`MeshData`] is what a mesh source hands to the analysis: positions,
//! optional normals, up to [`MAX_UV_CHANNELS`] UV sets, optional vertex colors,
//! and a flat triangle index list.
//!
//! Elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`TriangleId`] - Identifies a triangle
//! - [`IslandId`] - Identifies a UV island within one analysis
//!
//! ```
//! use uvmask::mesh::MeshData;
//! use nalgebra::Point3;
//!
//! let mesh = MeshData::from_triangles(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.5, 1.0, 0.0),
//!     ],
//!     &[[0, 1, 2]],
//! );
//! assert_eq!(mesh.num_triangles(), 1);
//! ```

mod data;
mod index;

pub use data::{clamp_channel, MeshData, Rgba, MAX_UV_CHANNELS};
pub use index::{IslandId, TriangleId, VertexId};
