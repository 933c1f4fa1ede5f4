//! PNG persistence for [`ColorBuffer`]s.
//!
//! Buffers store row 0 at `v = 0`, the bottom of UV space. Image files store
//! the top row first, so rows are flipped on the way in and out.

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::composite::ColorBuffer;
use crate::error::{MaskError, Result};

/// Write a buffer as an 8-bit RGBA PNG.
///
/// # Example
///
/// ```no_run
/// use uvmask::composite::ColorBuffer;
/// use uvmask::io::texture;
/// use uvmask::mesh::Rgba;
///
/// let buffer = ColorBuffer::new(64, 64, Rgba::WHITE);
/// texture::save_png(&buffer, "mask.png").unwrap();
/// ```
pub fn save_png<P: AsRef<Path>>(buffer: &ColorBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    let image = to_image(buffer).ok_or_else(|| MaskError::SaveError {
        path: path.to_path_buf(),
        message: format!(
            "cannot encode a {}x{} buffer",
            buffer.width(),
            buffer.height()
        ),
    })?;

    image.save_with_format(path, ImageFormat::Png)?;
    log::debug!(
        "saved {}x{} texture to {}",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(())
}

/// Read any image the `image` crate can decode (PNG in this build) as RGBA.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ColorBuffer> {
    let path = path.as_ref();
    let image = image::open(path)?.to_rgba8();
    from_image(&image)
}

fn to_image(buffer: &ColorBuffer) -> Option<RgbaImage> {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(width * height * 4);
    for row in buffer.pixels().chunks_exact(width).rev() {
        for px in row {
            bytes.extend_from_slice(&px.to_array());
        }
    }
    RgbaImage::from_raw(u32::try_from(width).ok()?, u32::try_from(height).ok()?, bytes)
}

fn from_image(image: &RgbaImage) -> Result<ColorBuffer> {
    let width = image.width() as usize;
    let row_bytes = width * 4;

    let mut bytes = Vec::with_capacity(image.as_raw().len());
    if row_bytes > 0 {
        for row in image.as_raw().chunks_exact(row_bytes).rev() {
            bytes.extend_from_slice(row);
        }
    }
    ColorBuffer::from_rgba_bytes(width, image.height() as usize, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Rgba;

    #[test]
    fn test_rows_are_flipped_for_image_order() {
        let mut buffer = ColorBuffer::new(2, 2, Rgba::WHITE);
        buffer.set(0, 0, Rgba::new(255, 0, 0, 255));

        let image = to_image(&buffer).unwrap();
        // Bottom-left texel of UV space is the last image row
        assert_eq!(image.get_pixel(0, 1).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);

        let back = from_image(&image).unwrap();
        assert_eq!(back, buffer);
    }

    #[test]
    fn test_empty_buffer_cannot_be_saved() {
        let buffer = ColorBuffer::new(0, 4, Rgba::WHITE);
        let path = std::env::temp_dir().join("uvmask-empty.png");
        let result = save_png(&buffer, &path);
        assert!(matches!(result, Err(MaskError::SaveError { .. })));
    }

    #[test]
    fn test_png_round_trip() {
        let path = std::env::temp_dir().join(format!("uvmask-{}-mask.png", std::process::id()));
        let mut buffer = ColorBuffer::new(3, 2, Rgba::BLACK);
        buffer.set(2, 1, Rgba::new(1, 2, 3, 4));

        save_png(&buffer, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, buffer);
    }
}
