//! glTF format support.
//!
//! Loads every triangle primitive of a glTF or GLB file into a single
//! [`MeshData`], including normals, all `TEXCOORD_n` sets up to
//! [`MAX_UV_CHANNELS`] and `COLOR_0`.
//!
//! glTF places the UV origin at the top-left of the image. Coordinates are
//! converted to a bottom-left origin (`v' = 1 - v`) on load, which is the
//! convention the rest of the crate uses.

use std::path::Path;

use nalgebra::{Point2, Point3, Vector3};

use crate::error::{MaskError, Result};
use crate::mesh::{MeshData, Rgba, MAX_UV_CHANNELS};

/// Load a mesh from a glTF or GLB file.
///
/// # Example
///
/// ```no_run
/// use uvmask::io::gltf;
///
/// let mesh = gltf::load("model.glb").unwrap();
/// println!("UV channels: {:?}", mesh.uv_channels().collect::<Vec<_>>());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<MeshData> {
    let path = path.as_ref();

    let (document, buffers, _images) = ::gltf::import(path).map_err(|e| MaskError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut normals: Vec<Vector3<f64>> = Vec::new();
    let mut uvs: Vec<Vec<Point2<f64>>> = vec![Vec::new(); MAX_UV_CHANNELS];
    let mut colors: Vec<Rgba> = Vec::new();
    let mut indices: Vec<usize> = Vec::new();

    // A channel survives only if every primitive provides it.
    let mut has_normals = true;
    let mut has_uvs = [true; MAX_UV_CHANNELS];
    let mut has_colors = true;

    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let Some(read_positions) = reader.read_positions() else {
                continue;
            };
            let vertex_offset = positions.len();
            positions.extend(
                read_positions.map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
            );
            let count = positions.len() - vertex_offset;

            match reader.read_normals() {
                Some(read) if has_normals => normals
                    .extend(read.map(|n| Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64))),
                _ => has_normals = false,
            }

            for (set, channel) in uvs.iter_mut().enumerate() {
                match reader.read_tex_coords(set as u32) {
                    Some(read) if has_uvs[set] => channel.extend(
                        read.into_f32()
                            .map(|uv| Point2::new(uv[0] as f64, 1.0 - uv[1] as f64)),
                    ),
                    _ => has_uvs[set] = false,
                }
            }

            match reader.read_colors(0) {
                Some(read) if has_colors => colors.extend(read.into_rgba_u8().map(Rgba::from)),
                _ => has_colors = false,
            }

            let primitive_indices: Vec<usize> = match reader.read_indices() {
                Some(read) => read.into_u32().map(|i| i as usize).collect(),
                None => (0..count).collect(),
            };
            triangulate(primitive.mode(), &primitive_indices, vertex_offset, &mut indices);
        }
    }

    if indices.is_empty() {
        return Err(MaskError::LoadError {
            path: path.to_path_buf(),
            message: "glTF file contains no triangle meshes".to_string(),
        });
    }

    let vertex_count = positions.len();
    let mut data = MeshData::new(positions, indices);
    if has_normals && normals.len() == vertex_count {
        data = data.with_normals(normals);
    }
    for (channel, coords) in uvs.into_iter().enumerate() {
        if has_uvs[channel] && coords.len() == vertex_count {
            data = data.with_uvs(channel, coords);
        }
    }
    if has_colors && colors.len() == vertex_count {
        data = data.with_colors(colors);
    }

    log::debug!(
        "loaded {}: {} vertices, {} triangles, UV channels {:?}",
        path.display(),
        data.num_vertices(),
        data.num_triangles(),
        data.uv_channels().collect::<Vec<_>>()
    );

    Ok(data)
}

/// Append the triangles of one primitive to a flat index list.
fn triangulate(mode: ::gltf::mesh::Mode, indices: &[usize], offset: usize, out: &mut Vec<usize>) {
    match mode {
        ::gltf::mesh::Mode::Triangles => {
            for chunk in indices.chunks_exact(3) {
                out.extend([chunk[0] + offset, chunk[1] + offset, chunk[2] + offset]);
            }
        }
        ::gltf::mesh::Mode::TriangleStrip => {
            for i in 0..indices.len().saturating_sub(2) {
                if i % 2 == 0 {
                    out.extend([indices[i] + offset, indices[i + 1] + offset, indices[i + 2] + offset]);
                } else {
                    // Reverse winding for odd triangles
                    out.extend([indices[i] + offset, indices[i + 2] + offset, indices[i + 1] + offset]);
                }
            }
        }
        ::gltf::mesh::Mode::TriangleFan => {
            for i in 1..indices.len().saturating_sub(1) {
                out.extend([indices[0] + offset, indices[i] + offset, indices[i + 1] + offset]);
            }
        }
        _ => {
            // Points and lines have no area
        }
    }
}
