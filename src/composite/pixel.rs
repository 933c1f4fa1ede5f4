//! Mask-to-image compositing and the full export pipeline.

use rayon::prelude::*;

use super::buffer::ColorBuffer;
use super::options::{ChannelFlags, CompositeMode, ExportOptions};
use crate::analysis::{IslandSelection, UvAnalysis};
use crate::mesh::Rgba;
use crate::progress::Progress;
use crate::raster::{build_union_mask, morphology, Mask, SELECTED, UNSELECTED};

/// Render a selection of islands into a color image.
///
/// Runs the whole pipeline: rasterize the selected islands, invert the mask if
/// requested, pad it by `options.margin` pixels, and composite it.
///
/// Padding always grows the selected islands: a plain mask is dilated with
/// [`morphology::dilate_black`], an inverted one with
/// [`morphology::dilate_white`].
///
/// # Example
///
/// ```
/// use uvmask::prelude::*;
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
/// .with_uvs(0, vec![Point2::new(0.0, 0.0), Point2::new(0.5, 0.0), Point2::new(0.0, 0.5)]);
/// let analysis = analyze(&mesh, 0).unwrap();
///
/// let options = ExportOptions::default().with_size(16).with_margin(1);
/// let image = render_mask(&analysis, &IslandSelection::all(&analysis), &options);
///
/// assert_eq!(image.get(0, 0), Rgba::BLACK);
/// assert_eq!(image.get(15, 15), Rgba::WHITE);
/// ```
pub fn render_mask(
    analysis: &UvAnalysis,
    selection: &IslandSelection,
    options: &ExportOptions,
) -> ColorBuffer {
    render_mask_with_progress(analysis, selection, options, &Progress::none())
}

/// [`render_mask`] with stage reporting.
pub fn render_mask_with_progress(
    analysis: &UvAnalysis,
    selection: &IslandSelection,
    options: &ExportOptions,
    progress: &Progress,
) -> ColorBuffer {
    const STAGES: usize = 3;

    progress.report(0, STAGES, "Rasterizing islands");
    let mask = prepare_mask(analysis, selection, options, progress);

    progress.report(2, STAGES, "Compositing");
    let image = composite_mask(&mask, options);

    progress.report(STAGES, STAGES, "Done");
    image
}

/// Rasterize, invert and pad a selection without compositing it.
///
/// Reports the padding stage as step 1 of 3 through `progress`.
pub fn prepare_mask(
    analysis: &UvAnalysis,
    selection: &IslandSelection,
    options: &ExportOptions,
    progress: &Progress,
) -> Mask {
    let mut mask = build_union_mask(analysis, selection, options.width, options.height);
    if options.invert {
        mask.invert();
    }

    progress.report(1, 3, "Padding seams");
    pad_mask(&mut mask, options.margin, options.invert, options.parallel);
    mask
}

/// Dilate a mask so the region the user selected grows by `margin` pixels.
///
/// `inverted` tells which polarity currently marks the selected islands.
pub fn pad_mask(mask: &mut Mask, margin: usize, inverted: bool, parallel: bool) {
    let grow = if inverted { UNSELECTED } else { SELECTED };
    let (width, height) = (mask.width(), mask.height());
    morphology::dilate_impl(mask.as_mut_slice(), width, height, margin, grow, parallel);
}

/// Turn a processed mask into colors.
///
/// - [`CompositeMode::Simple`]: non-zero pixels become opaque black, zero
///   pixels opaque white.
/// - [`CompositeMode::ChannelWrite`] with a base image: the base is resampled
///   to the mask size and only non-zero pixels change; enabled R/G/B are set
///   to 0 and an enabled A to 255.
/// - [`CompositeMode::ChannelWrite`] without a base image: every pixel starts
///   opaque white; enabled R/G/B become `selected ? 0 : 255` and an enabled A
///   takes the raw mask byte.
///
/// `options.invert` and `options.margin` are not applied here; see
/// [`render_mask`].
pub fn composite_mask(mask: &Mask, options: &ExportOptions) -> ColorBuffer {
    let (width, height) = (mask.width(), mask.height());

    let mut out = match (options.mode, &options.base_image) {
        (CompositeMode::ChannelWrite(_), Some(base)) => base.resample_nearest(width, height),
        _ => ColorBuffer::new(width, height, Rgba::WHITE),
    };

    let paint: fn(&mut Rgba, u8, ChannelFlags) = match (options.mode, &options.base_image) {
        (CompositeMode::Simple, _) => |px, m, _| {
            *px = if m != UNSELECTED { Rgba::BLACK } else { Rgba::WHITE };
        },
        (CompositeMode::ChannelWrite(_), Some(_)) => |px, m, flags| {
            paint_over_base(px, m != UNSELECTED, flags);
        },
        (CompositeMode::ChannelWrite(_), None) => paint_without_base,
    };

    let flags = match options.mode {
        CompositeMode::ChannelWrite(flags) => flags,
        CompositeMode::Simple => ChannelFlags::NONE,
    };

    if options.parallel {
        out.pixels_mut()
            .par_iter_mut()
            .zip(mask.as_slice().par_iter())
            .for_each(|(px, &m)| paint(px, m, flags));
    } else {
        out.pixels_mut()
            .iter_mut()
            .zip(mask.as_slice())
            .for_each(|(px, &m)| paint(px, m, flags));
    }

    out
}

/// Write a selected element over an existing color. Unselected elements are kept.
#[inline]
pub(crate) fn paint_over_base(px: &mut Rgba, selected: bool, flags: ChannelFlags) {
    if !selected {
        return;
    }
    if flags.r {
        px.r = 0;
    }
    if flags.g {
        px.g = 0;
    }
    if flags.b {
        px.b = 0;
    }
    if flags.a {
        px.a = 255;
    }
}

/// Write an element with no base: RGB encode the selection, A takes `mask_value`.
#[inline]
pub(crate) fn paint_without_base(px: &mut Rgba, mask_value: u8, flags: ChannelFlags) {
    let color = if mask_value != UNSELECTED { 0 } else { 255 };
    if flags.r {
        px.r = color;
    }
    if flags.g {
        px.g = color;
    }
    if flags.b {
        px.b = color;
    }
    if flags.a {
        px.a = mask_value;
    }
}
