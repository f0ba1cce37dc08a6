//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::Primitive;
use glint_core::Color;
use glint_math::{unit, Ray, Vec3};

/// A single triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// Pre-computed face normal (unit length, fixed orientation)
    normal: Vec3,
    color: Color,
}

impl Triangle {
    /// Create a new triangle from three non-collinear vertices.
    ///
    /// The normal is `(b - a) × (c - a)`, normalized. It is not flipped to
    /// face incoming rays.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, color: Color) -> Self {
        let normal = unit((b - a).cross(c - a));

        Self {
            a,
            b,
            c,
            normal,
            color,
        }
    }
}

impl Primitive for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;

        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);

        // Ray is parallel to triangle
        if det.abs() < 1e-12 {
            return None;
        }

        let f = 1.0 / det;
        let s = ray.origin() - self.a;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);

        // Behind the ray origin
        if t <= 0.0 {
            return None;
        }

        Some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> &'static str {
        "triangle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Triangle in XY plane at z=-1
    fn tri() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Color::new(220.0, 110.0, 0.0, 0.2),
        )
    }

    #[test]
    fn test_triangle_hit() {
        // Ray pointing at triangle center
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = tri().intersect(&ray).unwrap();
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_miss_behind() {
        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(tri().intersect(&ray), None);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(tri().intersect(&ray), None);

        let ray = Ray::new(Vec3::new(0.9, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(tri().intersect(&ray), None);
    }

    #[test]
    fn test_triangle_parallel() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);
        assert_eq!(tri().intersect(&ray), None);
    }

    #[test]
    fn test_triangle_normal_orientation_is_fixed() {
        let t = tri();
        // (b - a) x (c - a) = (2,0,0) x (1,2,0) = (0,0,4)
        assert_eq!(t.normal_at(Vec3::new(0.0, 0.0, -1.0)), Vec3::Z);

        // Hit from the other side: the normal does not flip
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        assert!(t.intersect(&ray).is_some());
        assert_eq!(t.normal_at(ray.at(1.0)), Vec3::Z);
    }
}
