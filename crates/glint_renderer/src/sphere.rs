//! Sphere primitive for ray tracing.

use crate::Primitive;
use glint_core::Color;
use glint_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    color: Color,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Vec3, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Primitive for Sphere {
    /// Analytic quadratic with a unit-length ray direction.
    ///
    /// Returns the smaller root whenever the discriminant is non-negative,
    /// even if that root is behind the origin. A ray starting inside the
    /// sphere therefore yields a negative distance and is treated as a miss.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        Some((-b - discriminant.sqrt()) / 2.0)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> &'static str {
        "sphere"
    }
}
