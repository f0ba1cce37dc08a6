//! Glint math types: f64 vectors, rays and intervals.

// Glint works in double precision throughout.
pub use glam::DVec3 as Vec3;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, unit};
