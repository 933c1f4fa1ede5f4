//! Compositing and export options.

use std::fmt;
use std::str::FromStr;

use super::buffer::ColorBuffer;
use crate::error::MaskError;

/// Smallest texture edge accepted by [`ExportOptions`].
pub const MIN_TEXTURE_SIZE: usize = 8;
/// Largest texture edge accepted by [`ExportOptions`].
pub const MAX_TEXTURE_SIZE: usize = 8192;

/// Which output channels a channel-write composite may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelFlags {
    /// Write red.
    pub r: bool,
    /// Write green.
    pub g: bool,
    /// Write blue.
    pub b: bool,
    /// Write alpha.
    pub a: bool,
}

impl ChannelFlags {
    /// No channels.
    pub const NONE: ChannelFlags = ChannelFlags::new(false, false, false, false);
    /// Red, green and blue.
    pub const RGB: ChannelFlags = ChannelFlags::new(true, true, true, false);
    /// All four channels.
    pub const ALL: ChannelFlags = ChannelFlags::new(true, true, true, true);

    /// Create flags from individual channel switches.
    pub const fn new(r: bool, g: bool, b: bool, a: bool) -> Self {
        Self { r, g, b, a }
    }

    /// Whether any channel is enabled.
    pub fn any(self) -> bool {
        self.r || self.g || self.b || self.a
    }
}

impl FromStr for ChannelFlags {
    type Err = MaskError;

    /// Parse a channel list such as `"rgba"`, `"r"` or `"ga"`. Case-insensitive;
    /// `"none"` or an empty string disables every channel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let mut flags = ChannelFlags::NONE;
        if s == "none" {
            return Ok(flags);
        }
        for c in s.chars() {
            match c {
                'r' => flags.r = true,
                'g' => flags.g = true,
                'b' => flags.b = true,
                'a' => flags.a = true,
                _ => {
                    return Err(MaskError::invalid_param(
                        "channels",
                        &s,
                        "expected a combination of r, g, b, a",
                    ))
                }
            }
        }
        Ok(flags)
    }
}

impl fmt::Display for ChannelFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.any() {
            return f.write_str("none");
        }
        for (on, c) in [(self.r, 'r'), (self.g, 'g'), (self.b, 'b'), (self.a, 'a')] {
            if on {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// How a mask is turned into colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Selected pixels opaque black, everything else opaque white.
    #[default]
    Simple,
    /// Write the selection into the enabled channels only, optionally on top
    /// of a base image.
    ChannelWrite(ChannelFlags),
}

/// Options for rendering a selection into a color image.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output width in pixels.
    pub width: usize,

    /// Output height in pixels.
    pub height: usize,

    /// Seam padding in pixels (number of dilation iterations).
    pub margin: usize,

    /// Invert the mask before padding and compositing.
    pub invert: bool,

    /// Simple black/white output or per-channel writes.
    pub mode: CompositeMode,

    /// Image to composite onto in channel-write mode. Resampled to the
    /// output size with nearest-neighbour sampling.
    pub base_image: Option<ColorBuffer>,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            margin: 4,
            invert: false,
            mode: CompositeMode::Simple,
            base_image: None,
            parallel: true,
        }
    }
}

impl ExportOptions {
    /// Set a square output size, clamped to `[MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE]`.
    pub fn with_size(self, size: usize) -> Self {
        self.with_dimensions(size, size)
    }

    /// Set the output dimensions, each clamped to `[MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE]`.
    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width.clamp(MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE);
        self.height = height.clamp(MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE);
        self
    }

    /// Set the seam padding in pixels.
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// Set whether the mask is inverted.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the composite mode.
    pub fn with_mode(mut self, mode: CompositeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switch to channel-write mode with the given channels.
    pub fn with_channels(self, channels: ChannelFlags) -> Self {
        self.with_mode(CompositeMode::ChannelWrite(channels))
    }

    /// Set the base image for channel-write mode.
    pub fn with_base_image(mut self, base: ColorBuffer) -> Self {
        self.base_image = Some(base);
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Options for baking a selection into per-vertex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBakeOptions {
    /// Channels to write.
    pub channels: ChannelFlags,
    /// Treat unselected vertices as selected and vice versa.
    pub invert: bool,
}

impl Default for VertexBakeOptions {
    fn default() -> Self {
        Self {
            channels: ChannelFlags::RGB,
            invert: false,
        }
    }
}

impl VertexBakeOptions {
    /// Set the channels to write.
    pub fn with_channels(mut self, channels: ChannelFlags) -> Self {
        self.channels = channels;
        self
    }

    /// Set whether the selection is inverted.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}
