//! Infinite plane primitive.

use crate::Primitive;
use glint_core::Color;
use glint_math::{unit, Ray, Vec3};

/// Below this |normal · direction| the ray counts as parallel.
const PARALLEL_THRESHOLD: f64 = 1e-9;

/// An infinite plane: all points `p` with `normal · p = offset`.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Unit normal
    normal: Vec3,
    /// Signed distance from the origin along `normal`
    offset: f64,
    color: Color,
}

impl Plane {
    /// Create a new plane. `normal` is normalized; it must not be zero.
    pub fn new(normal: Vec3, offset: f64, color: Color) -> Self {
        Self {
            normal: unit(normal),
            offset,
            color,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_THRESHOLD {
            return None;
        }

        Some((self.offset - self.normal.dot(ray.origin())) / denom)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> &'static str {
        "plane"
    }
}
