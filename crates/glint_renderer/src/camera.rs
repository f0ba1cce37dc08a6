//! Camera for ray generation.

use glint_math::{unit, Vec3};

/// A pinhole camera that always looks at the world origin.
///
/// The basis is fixed at construction:
/// - `forward` points from the camera to the origin
/// - `right = Y × forward`
/// - `down = right × forward`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    down: Vec3,
}

impl Camera {
    /// Place a camera at `position`, looking at the origin with +Y as up.
    ///
    /// `position` must not be the origin nor lie on the Y axis, otherwise
    /// the basis collapses to zero vectors.
    pub fn look_at_origin(position: Vec3) -> Self {
        let forward = unit(-position);
        let right = unit(Vec3::Y.cross(forward));
        let down = right.cross(forward);

        Self {
            position,
            forward,
            right,
            down,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn down(&self) -> Vec3 {
        self.down
    }

    /// Unit direction through screen amounts `(xamnt, yamnt)`.
    ///
    /// `(0.5, 0.5)` is the forward axis; the amounts displace the ray along
    /// `right` and `down` respectively.
    pub fn direction(&self, xamnt: f64, yamnt: f64) -> Vec3 {
        unit(self.forward + self.right * (xamnt - 0.5) + self.down * (yamnt - 0.5))
    }
}
