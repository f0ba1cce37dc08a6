//! Point light.

use glint_core::Color;
use glint_math::{unit, Vec3};

/// A single point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }

    /// Cosine between `normal` and the direction from `point` to the light.
    pub fn incidence(&self, point: Vec3, normal: Vec3) -> f64 {
        normal.dot(unit(self.position - point))
    }
}
