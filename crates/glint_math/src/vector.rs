//! Vector helpers on top of glam.

use crate::Vec3;

/// Normalize `v` to unit length.
///
/// Zero-length and non-finite vectors map to `Vec3::ZERO` instead of NaN.
#[inline]
pub fn unit(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Mirror direction `d` about the surface normal `n`.
///
/// Computed as `2 (n · -d) n + d`, then normalized.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    unit(2.0 * n.dot(-d) * n + d)
}
