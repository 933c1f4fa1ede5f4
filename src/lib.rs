//! # uvmask
//!
//! UV island analysis and selection-mask rendering for triangle meshes.
//!
//! uvmask finds the islands of a mesh's UV layout, lets you pick some of them,
//! and renders that pick as a padded texture mask or as per-vertex colors.
//!
//! ## Features
//!
//! - **UV topology analysis**: triangles flood-filled into islands, with every
//!   open boundary and UV seam reported as a border edge
//! - **Mask rasterization**: scan-converts selected islands into a byte mask
//! - **Seam padding**: morphological dilation in both polarities
//! - **Channel packing**: writes masks into chosen RGBA channels over a base
//!   image
//! - **Vertex baking**: the same selection as per-vertex colors
//! - **File formats**: glTF/GLB and PLY meshes in, PNG and PLY out
//!
//! ## Quick Start
//!
//! ```no_run
//! use uvmask::prelude::*;
//! use uvmask::io::texture;
//!
//! // Load a mesh and analyze its first UV channel
//! let mesh = uvmask::io::load("model.glb").unwrap();
//! let analysis = analyze(&mesh, 0).unwrap();
//! println!("Islands: {}", analysis.num_islands());
//! println!("Border edges: {}", analysis.border_edges().len());
//!
//! // Render the first two islands with 4 pixels of seam padding
//! let selection = IslandSelection::from_indices([0, 1]);
//! let options = ExportOptions::default().with_size(2048).with_margin(4);
//! let image = render_mask(&analysis, &selection, &options);
//!
//! texture::save_png(&image, "mask.png").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use uvmask::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! // A quad whose two triangles are unwrapped to separate UV regions
//! let mesh = MeshData::from_triangles(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!     ],
//!     &[[0, 1, 2], [4, 5, 3]],
//! )
//! .with_uvs(0, vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(0.4, 0.0),
//!     Point2::new(0.4, 0.4),
//!     Point2::new(0.6, 1.0),
//!     Point2::new(0.6, 0.6),
//!     Point2::new(1.0, 1.0),
//! ]);
//!
//! let analysis = analyze(&mesh, 0).unwrap();
//! assert_eq!(analysis.num_islands(), 2);
//! assert!(analysis.border_edges().iter().any(|e| e.kind == BorderKind::Seam));
//! ```
//!
//! ## Channel Packing
//!
//! Several masks can share one texture by writing each into its own channel:
//!
//! ```
//! use uvmask::prelude::*;
//!
//! let mut mask = Mask::new(8, 8);
//! mask.set(1, 1, 255);
//!
//! let base = ColorBuffer::new(8, 8, Rgba::new(255, 255, 255, 255));
//! let options = ExportOptions::default()
//!     .with_channels(ChannelFlags::new(false, true, false, false))
//!     .with_base_image(base);
//!
//! let image = composite_mask(&mask, &options);
//! assert_eq!(image.get(1, 1), Rgba::new(255, 0, 255, 255));
//! assert_eq!(image.get(0, 0), Rgba::WHITE);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod composite;
pub mod error;
pub mod io;
pub mod mesh;
pub mod progress;
pub mod raster;

pub use nalgebra;
pub use progress::Progress;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use uvmask::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analysis::{
        analyze, BorderEdge, BorderKind, Island, IslandSelection, IslandStats, UvAnalysis,
    };
    pub use crate::composite::{
        composite_mask, composite_vertex_colors, render_mask, ChannelFlags, ColorBuffer,
        CompositeMode, ExportOptions, VertexBakeOptions,
    };
    pub use crate::error::{MaskError, Result};
    pub use crate::mesh::{IslandId, MeshData, Rgba, TriangleId, VertexId};
    pub use crate::raster::{build_union_mask, Mask};
    pub use crate::Progress;
}
