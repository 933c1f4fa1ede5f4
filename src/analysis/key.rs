//! Quantized hash keys for UV points, UV edges and vertex positions.
//!
//! Floating point coordinates are snapped to a fixed grid before they are
//! compared, so equality is decided on integers and repeated analyses of one
//! mesh always agree.

use nalgebra::{Point2, Point3};

/// Scale applied to coordinates before rounding (snaps to ~1e-5).
pub const QUANTIZATION_SCALE: f64 = 100_000.0;

/// A quantized UV point packed into 64 bits.
///
/// The high 32 bits hold `round(u * 100000)` and the low 32 bits hold
/// `round(v * 100000)`, both as two's complement `i32`. Values outside the
/// `i32` range saturate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UvKey(u64);

impl UvKey {
    /// Quantize a UV point.
    #[inline]
    pub fn new(uv: &Point2<f64>) -> Self {
        let u = (uv.x * QUANTIZATION_SCALE).round() as i32;
        let v = (uv.y * QUANTIZATION_SCALE).round() as i32;
        Self(((u as u32 as u64) << 32) | (v as u32 as u64))
    }

    /// The packed 64-bit value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// An undirected edge between two quantized UV points.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UvEdgeKey(UvKey, UvKey);

impl UvEdgeKey {
    /// Build the key; endpoint order does not matter.
    #[inline]
    pub fn new(a: UvKey, b: UvKey) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// Build the key from unquantized endpoints.
    #[inline]
    pub fn from_points(a: &Point2<f64>, b: &Point2<f64>) -> Self {
        Self::new(UvKey::new(a), UvKey::new(b))
    }
}

/// A quantized 3D position, used to weld split vertices before edges are keyed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PositionKey([i64; 3]);

impl PositionKey {
    #[inline]
    pub(crate) fn new(p: &Point3<f64>) -> Self {
        Self([
            (p.x * QUANTIZATION_SCALE).round() as i64,
            (p.y * QUANTIZATION_SCALE).round() as i64,
            (p.z * QUANTIZATION_SCALE).round() as i64,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_key_snaps_small_differences() {
        let a = UvKey::new(&Point2::new(0.5, 0.25));
        let b = UvKey::new(&Point2::new(0.500_000_1, 0.249_999_9));
        assert_eq!(a, b);

        let c = UvKey::new(&Point2::new(0.500_02, 0.25));
        assert_ne!(a, c);
    }

    #[test]
    fn test_uv_key_packing() {
        let key = UvKey::new(&Point2::new(1.0, -1.0));
        assert_eq!(key.raw() >> 32, 100_000);
        assert_eq!(key.raw() & 0xFFFF_FFFF, (-100_000i32) as u32 as u64);
    }

    #[test]
    fn test_uv_key_distinguishes_swapped_components() {
        let a = UvKey::new(&Point2::new(0.1, 0.9));
        let b = UvKey::new(&Point2::new(0.9, 0.1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_uv_key_saturates_out_of_range() {
        let key = UvKey::new(&Point2::new(1.0e12, 0.0));
        assert_eq!(key.raw() >> 32, i32::MAX as u32 as u64);
    }

    #[test]
    fn test_uv_edge_key_is_undirected() {
        let p = Point2::new(0.0, 0.0);
        let q = Point2::new(1.0, 0.5);
        assert_eq!(UvEdgeKey::from_points(&p, &q), UvEdgeKey::from_points(&q, &p));
    }

    #[test]
    fn test_position_key_welds_nearby_points() {
        let a = PositionKey::new(&Point3::new(1.0, 2.0, 3.0));
        let b = PositionKey::new(&Point3::new(1.000_000_1, 2.0, 3.0));
        assert_eq!(a, b);
    }
}
