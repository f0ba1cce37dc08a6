//! Primitive trait and nearest-hit selection.

use std::ops::Index;

use glint_core::Color;
use glint_math::{Interval, Ray, Vec3};

/// Smallest accepted hit distance.
///
/// Reflected rays start on a surface; anything closer than this is treated
/// as the surface the ray just left.
pub const EPSILON: f64 = 1e-6;

/// Accepted range of hit distances, exclusive at both ends.
pub const HIT_RANGE: Interval = Interval::new(EPSILON, f64::INFINITY);

/// A renderable surface.
pub trait Primitive: Send + Sync {
    /// Distance along `ray` to the surface, if the ray's line meets it.
    ///
    /// The value may be zero or negative (behind the origin); callers only
    /// accept distances inside [`HIT_RANGE`].
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Unit normal at a point assumed to lie on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Surface color; `alpha` is the reflectivity.
    fn color(&self) -> Color;

    /// Short name for logs.
    fn kind(&self) -> &'static str;
}

/// A ray/primitive hit: which primitive, and how far along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub t: f64,
}

/// Pick the closest hit. Ties resolve to the earliest candidate.
pub fn nearest(hits: &[Hit]) -> Option<Hit> {
    hits.iter().copied().fold(None, |best, hit| match best {
        Some(b) if b.t <= hit.t => Some(b),
        _ => Some(hit),
    })
}

/// The fixed set of primitives in a scene.
pub struct PrimitiveList {
    objects: Vec<Box<dyn Primitive>>,
}

impl PrimitiveList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add a primitive. Its index is its position in insertion order.
    pub fn add(&mut self, object: Box<dyn Primitive>) {
        self.objects.push(object);
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Every primitive hit by `ray` at a distance inside [`HIT_RANGE`].
    pub fn intersections(&self, ray: &Ray) -> Vec<Hit> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(index, object)| {
                object
                    .intersect(ray)
                    .filter(|t| HIT_RANGE.surrounds(*t))
                    .map(|t| Hit { index, t })
            })
            .collect()
    }

    /// The closest valid hit along `ray`.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit> {
        nearest(&self.intersections(ray))
    }
}

/// Lookup of a [`Hit::index`]. Panics if the index did not come from this list.
impl Index<usize> for PrimitiveList {
    type Output = dyn Primitive;

    fn index(&self, index: usize) -> &Self::Output {
        self.objects[index].as_ref()
    }
}

impl Default for PrimitiveList {
    fn default() -> Self {
        Self::new()
    }
}
