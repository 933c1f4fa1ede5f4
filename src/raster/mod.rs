//! Mask rasterization and morphology.
//!
//! - [`build_union_mask`] scan-converts the selected islands of a
//!   [`UvAnalysis`](crate::analysis::UvAnalysis) into a binary [`Mask`].
//! - [`morphology`] grows either polarity of a mask to pad island borders.

mod mask;
pub mod morphology;
mod scan;

pub use mask::{Mask, SELECTED, UNSELECTED};
pub use scan::{build_union_mask, edge_function, rasterize_triangle, DEGENERATE_AREA_EPSILON};
