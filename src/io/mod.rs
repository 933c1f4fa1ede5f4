//! Mesh and texture file I/O.
//!
//! The analysis and compositing code never touches the filesystem; this
//! module sits around it to feed meshes in and write masks out.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | glTF | `.gltf`, `.glb` | ✓ | ✗ | All `TEXCOORD_n` sets, v flipped to bottom-left origin |
//! | PLY | `.ply` | ✓ | ✓ | UV channel 0, saving writes vertex colors |
//! | PNG | `.png` | ✓ | ✓ | Textures only, see [`texture`] |
//!
//! # Usage
//!
//! ```no_run
//! use uvmask::io::{load, texture};
//! use uvmask::prelude::*;
//!
//! let mesh = load("model.glb").unwrap();
//! let analysis = analyze(&mesh, 0).unwrap();
//! let image = render_mask(&analysis, &IslandSelection::all(&analysis), &ExportOptions::default());
//! texture::save_png(&image, "mask.png").unwrap();
//! ```

pub mod gltf;
pub mod ply;
pub mod texture;

use std::path::Path;

use crate::error::{MaskError, Result};
use crate::mesh::MeshData;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PLY (Stanford polygon) format.
    Ply,
    /// glTF format.
    Gltf,
    /// glTF binary format.
    Glb,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "ply" => Some(Format::Ply),
            "gltf" => Some(Format::Gltf),
            "glb" => Some(Format::Glb),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

/// Load a mesh from a file with automatic format detection.
///
/// The format is determined by the file extension.
///
/// # Example
///
/// ```no_run
/// use uvmask::io::load;
///
/// let mesh = load("model.gltf").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<MeshData> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| MaskError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        Format::Ply => ply::load(path),
        Format::Gltf | Format::Glb => gltf::load(path),
    }
}
