//! Glint Renderer - recursive single-scene ray tracing.
//!
//! Traces one ray per pixel against a floor plane, a triangle and a sphere,
//! shades the nearest hit with an ambient term plus mirror reflections, and
//! writes the result into a packed RGB8 buffer.

mod camera;
mod light;
mod plane;
mod primitive;
mod renderer;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use light::Light;
pub use plane::Plane;
pub use primitive::{nearest, Hit, Primitive, PrimitiveList, EPSILON, HIT_RANGE};
pub use renderer::{
    screen_amounts, RenderConfig, RenderError, RenderOutput, RenderStats, Renderer,
};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and Ray from glint_math
pub use glint_math::{Ray, Vec3};
