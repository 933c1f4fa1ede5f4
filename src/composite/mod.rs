//! Compositing masks into images and vertex colors.
//!
//! - [`render_mask`] runs the full image pipeline (rasterize, invert, pad,
//!   composite) for a selection.
//! - [`composite_mask`] turns an already processed [`Mask`](crate::raster::Mask)
//!   into a [`ColorBuffer`].
//! - [`composite_vertex_colors`] bakes a selection onto mesh vertices instead
//!   of pixels.
//!
//! Two composite modes exist. [`CompositeMode::Simple`] paints the selection
//! black on white. [`CompositeMode::ChannelWrite`] writes the selection only
//! into the enabled channels, optionally on top of a base image, so several
//! masks can be packed into one texture.

mod buffer;
mod options;
mod pixel;
mod vertex;

pub use buffer::ColorBuffer;
pub use options::{
    ChannelFlags, CompositeMode, ExportOptions, VertexBakeOptions, MAX_TEXTURE_SIZE,
    MIN_TEXTURE_SIZE,
};
pub use pixel::{composite_mask, pad_mask, prepare_mask, render_mask, render_mask_with_progress};
pub use vertex::{composite_vertex_colors, selected_vertices};
