//! PLY (Stanford polygon) format support.
//!
//! Loading reads positions, optional normals (`nx`/`ny`/`nz`), optional
//! texture coordinates into UV channel 0 (`u`/`v`, `s`/`t` or
//! `texture_u`/`texture_v`) and optional vertex colors
//! (`red`/`green`/`blue`/`alpha`). Polygons are fan-triangulated.
//!
//! Saving writes ASCII PLY with per-vertex RGBA colors, which is how baked
//! vertex masks leave the crate.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point2, Point3, Vector3};
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MaskError, Result};
use crate::mesh::{MeshData, Rgba};

const UV_PROPERTY_NAMES: [(&str, &str); 3] = [("u", "v"), ("s", "t"), ("texture_u", "texture_v")];

/// Load a mesh from a PLY file.
///
/// # Example
///
/// ```no_run
/// use uvmask::io::ply;
///
/// let mesh = ply::load("model.ply").unwrap();
/// assert!(mesh.has_uvs(0));
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<MeshData> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser.read_ply(&mut reader).map_err(|e| MaskError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let load_error = |message: &str| MaskError::LoadError {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| load_error("PLY file has no vertex element"))?;

    let mut positions: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    let mut normals: Option<Vec<Vector3<f64>>> = Some(Vec::with_capacity(vertex_element.len()));
    let mut uvs: Option<Vec<Point2<f64>>> = Some(Vec::with_capacity(vertex_element.len()));
    let mut colors: Option<Vec<Rgba>> = Some(Vec::with_capacity(vertex_element.len()));

    for vertex in vertex_element {
        let x = get_float_property(vertex, "x").ok_or_else(|| load_error("vertex missing x coordinate"))?;
        let y = get_float_property(vertex, "y").ok_or_else(|| load_error("vertex missing y coordinate"))?;
        let z = get_float_property(vertex, "z").ok_or_else(|| load_error("vertex missing z coordinate"))?;
        positions.push(Point3::new(x, y, z));

        // Any vertex lacking an attribute drops it for the whole mesh
        if let Some(list) = normals.as_mut() {
            match (
                get_float_property(vertex, "nx"),
                get_float_property(vertex, "ny"),
                get_float_property(vertex, "nz"),
            ) {
                (Some(nx), Some(ny), Some(nz)) => list.push(Vector3::new(nx, ny, nz)),
                _ => normals = None,
            }
        }

        if let Some(list) = uvs.as_mut() {
            match read_uv(vertex) {
                Some(uv) => list.push(uv),
                None => uvs = None,
            }
        }

        if let Some(list) = colors.as_mut() {
            match (
                get_color_property(vertex, "red"),
                get_color_property(vertex, "green"),
                get_color_property(vertex, "blue"),
            ) {
                (Some(r), Some(g), Some(b)) => {
                    let a = get_color_property(vertex, "alpha").unwrap_or(255);
                    list.push(Rgba::new(r, g, b, a));
                }
                _ => colors = None,
            }
        }
    }

    let face_element = ply
        .payload
        .get("face")
        .ok_or_else(|| load_error("PLY file has no face element"))?;

    let mut indices: Vec<usize> = Vec::with_capacity(face_element.len() * 3);
    for face in face_element {
        let face_indices = get_list_property(face, "vertex_indices")
            .or_else(|| get_list_property(face, "vertex_index"))
            .ok_or_else(|| load_error("face missing vertex_indices property"))?;

        if face_indices.len() >= 3 {
            // Triangulate polygon by fan triangulation
            for i in 1..face_indices.len() - 1 {
                indices.extend([face_indices[0], face_indices[i], face_indices[i + 1]]);
            }
        }
    }

    if indices.is_empty() {
        return Err(load_error("PLY file contains no faces"));
    }

    let mut data = MeshData::new(positions, indices);
    if let Some(normals) = normals.filter(|n| !n.is_empty()) {
        data = data.with_normals(normals);
    }
    if let Some(uvs) = uvs.filter(|u| !u.is_empty()) {
        data = data.with_uvs(0, uvs);
    }
    if let Some(colors) = colors.filter(|c| !c.is_empty()) {
        data = data.with_colors(colors);
    }

    log::debug!(
        "loaded {}: {} vertices, {} triangles, uvs: {}",
        path.display(),
        data.num_vertices(),
        data.num_triangles(),
        data.has_uvs(0)
    );

    Ok(data)
}

fn read_uv(vertex: &DefaultElement) -> Option<Point2<f64>> {
    UV_PROPERTY_NAMES.iter().find_map(|(u, v)| {
        Some(Point2::new(
            get_float_property(vertex, u)?,
            get_float_property(vertex, v)?,
        ))
    })
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

/// Color channel as a byte. Floating point channels are read as `0.0..=1.0`.
fn get_color_property(element: &DefaultElement, name: &str) -> Option<u8> {
    match element.get(name)? {
        Property::UChar(v) => Some(*v),
        Property::Char(v) => Some((*v).max(0) as u8),
        Property::UShort(v) => Some((*v).min(255) as u8),
        Property::Short(v) => Some((*v).clamp(0, 255) as u8),
        Property::UInt(v) => Some((*v).min(255) as u8),
        Property::Int(v) => Some((*v).clamp(0, 255) as u8),
        Property::Float(v) => Some(((*v as f64).clamp(0.0, 1.0) * 255.0).round() as u8),
        Property::Double(v) => Some((v.clamp(0.0, 1.0) * 255.0).round() as u8),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

/// Save a mesh with one RGBA color per vertex to a PLY file (ASCII format).
///
/// Normals and UV channel 0 are written when the mesh has them. Trailing
/// indices that do not form a whole triangle are dropped.
///
/// Returns [`MaskError::InvalidParameter`] if `colors` does not hold exactly
/// one entry per vertex.
///
/// # Example
///
/// ```no_run
/// use uvmask::io::ply;
/// use uvmask::mesh::{MeshData, Rgba};
/// use nalgebra::Point3;
///
/// let mesh = MeshData::from_triangles(
///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     &[[0, 1, 2]],
/// );
/// ply::save_with_colors(&mesh, &[Rgba::BLACK; 3], "baked.ply").unwrap();
/// ```
pub fn save_with_colors<P: AsRef<Path>>(mesh: &MeshData, colors: &[Rgba], path: P) -> Result<()> {
    let path = path.as_ref();
    if colors.len() != mesh.num_vertices() {
        return Err(MaskError::invalid_param(
            "colors",
            colors.len(),
            "must hold one color per vertex",
        ));
    }

    let normals = mesh
        .normals()
        .filter(|n| n.len() == mesh.num_vertices());
    let uvs = mesh.uvs(0).filter(|u| u.len() == mesh.num_vertices());

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    // Write header
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by uvmask")?;
    writeln!(writer, "element vertex {}", mesh.num_vertices())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    if normals.is_some() {
        writeln!(writer, "property float nx")?;
        writeln!(writer, "property float ny")?;
        writeln!(writer, "property float nz")?;
    }
    if uvs.is_some() {
        writeln!(writer, "property float s")?;
        writeln!(writer, "property float t")?;
    }
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "property uchar alpha")?;
    writeln!(writer, "element face {}", mesh.num_triangles())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    // Write vertices
    for (i, (p, c)) in mesh.positions().iter().zip(colors).enumerate() {
        write!(writer, "{} {} {}", p.x, p.y, p.z)?;
        if let Some(normals) = normals {
            let n = normals[i];
            write!(writer, " {} {} {}", n.x, n.y, n.z)?;
        }
        if let Some(uvs) = uvs {
            write!(writer, " {} {}", uvs[i].x, uvs[i].y)?;
        }
        writeln!(writer, " {} {} {} {}", c.r, c.g, c.b, c.a)?;
    }

    // Write faces
    for f in mesh.indices().chunks_exact(3) {
        writeln!(writer, "3 {} {} {}", f[0], f[1], f[2])?;
    }

    writer.flush()?;
    log::debug!("saved {} vertex colors to {}", colors.len(), path.display());
    Ok(())
}
