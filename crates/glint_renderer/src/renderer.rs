//! Core recursive ray tracer.
//!
//! Implements:
//! - One primary ray per pixel from a fixed camera origin
//! - Nearest-hit selection across the scene's primitives
//! - Ambient shading with mirror reflection, bounded by `max_bounces`

use std::time::{Duration, Instant};

use glint_core::{Color, ColorSpec, ImageSink, Palette, SceneError, SceneParams, SinkResult};
use glint_math::{reflect, Ray, Vec3};
use rayon::prelude::*;
use thiserror::Error;

use crate::{Camera, Hit, Light, Plane, PrimitiveList, Sphere, Triangle};

/// Errors that can occur while building a renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum number of reflection bounces after the primary hit
    pub max_bounces: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { max_bounces: 16 }
    }
}

/// Counters collected during a render.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Pixels whose primary ray hit a primitive
    pub pixels_hit: usize,
    /// Wall time of the render loop
    pub elapsed: Duration,
}

/// A finished frame: tightly packed RGB8, row-major, top-left origin.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stats: RenderStats,
}

impl RenderOutput {
    /// Hand the frame to an image sink.
    pub fn write_to(&self, sink: &mut dyn ImageSink) -> SinkResult<()> {
        sink.write(&self.pixels, self.width, self.height)
    }
}

/// Screen amounts for a pixel.
///
/// The row index drives the horizontal amount and the column index the
/// vertical one. Together with the camera basis this orientation is part of
/// the expected output; do not swap them.
pub fn screen_amounts(row: u32, column: u32, width: u32, height: u32) -> (f64, f64) {
    let w = width as f64;
    let h = height as f64;
    let aspect = w / h;

    let xamnt = ((row as f64 + 0.5) / w) * aspect - ((w - h) / h) / 2.0;
    let yamnt = ((h - column as f64) + 0.5) / h;
    (xamnt, yamnt)
}

/// Renders one fixed scene into an RGB8 buffer.
pub struct Renderer {
    camera: Camera,
    /// Origin shared by every primary ray
    origin: Vec3,
    light: Light,
    primitives: PrimitiveList,
    ambient: f64,
    background: Color,
    width: u32,
    height: u32,
    config: RenderConfig,
}

impl Renderer {
    /// Build a renderer from scene parameters, resolving colors through
    /// `palette`.
    ///
    /// Primitives are tested in the order floor plane, triangle, sphere.
    pub fn from_params(
        params: &SceneParams,
        palette: &Palette,
        config: RenderConfig,
    ) -> Result<Self, RenderError> {
        params.validate()?;

        let resolve = |spec: &ColorSpec| -> Result<Color, SceneError> {
            Ok(spec.resolve(palette)?)
        };

        let camera = Camera::look_at_origin(params.camera);
        let light = Light::new(params.light.position, resolve(&params.light.color)?);

        let mut primitives = PrimitiveList::new();
        primitives.add(Box::new(Plane::new(
            params.floor.normal,
            params.floor.offset,
            resolve(&params.floor.color)?,
        )));
        primitives.add(Box::new(Triangle::new(
            params.triangle.a,
            params.triangle.b,
            params.triangle.c,
            resolve(&params.triangle.color)?,
        )));
        primitives.add(Box::new(Sphere::new(
            params.sphere.center,
            params.sphere.radius,
            resolve(&params.sphere.color)?,
        )));

        let background = resolve(&params.background)?;

        log::debug!(
            "Renderer: camera at {:?} (forward {:?}), {} primitives, ambient {}, max {} bounces",
            camera.position(),
            camera.forward(),
            primitives.len(),
            params.ambient,
            config.max_bounces
        );

        Ok(Self {
            camera,
            origin: camera.position(),
            light,
            primitives,
            ambient: params.ambient,
            background,
            width: params.width,
            height: params.height,
            config,
        })
    }

    pub fn primitives(&self) -> &PrimitiveList {
        &self.primitives
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Primary ray for a pixel.
    pub fn primary_ray(&self, row: u32, column: u32) -> Ray {
        let (xamnt, yamnt) = screen_amounts(row, column, self.width, self.height);
        Ray::new(self.origin, self.camera.direction(xamnt, yamnt))
    }

    /// Color seen along `ray`, or `None` if it hits nothing.
    pub fn trace(&self, ray: &Ray) -> Option<Color> {
        self.primitives
            .nearest_hit(ray)
            .map(|hit| self.shade(ray, hit, 0))
    }

    /// Shade a resolved hit. `depth` counts bounces taken so far.
    fn shade(&self, ray: &Ray, hit: Hit, depth: u32) -> Color {
        let primitive = &self.primitives[hit.index];

        let surface = primitive.color();
        let mut color = surface.scale(self.ambient);

        let point = ray.at(hit.t);
        let normal = primitive.normal_at(point);

        if depth < self.config.max_bounces {
            let reflected = Ray::new(point, reflect(ray.direction(), normal));

            if let Some(bounce) = self.primitives.nearest_hit(&reflected) {
                let mirrored = self.shade(&reflected, bounce, depth + 1);
                color = color + mirrored.scale(surface.alpha);
            }
        }

        // Light angle is reported only; no diffuse or shadow term is applied.
        log::trace!(
            "{} hit at {:?}, depth {}, light incidence {:.3}",
            primitive.kind(),
            point,
            depth,
            self.light.incidence(point, normal)
        );

        color.clip()
    }

    /// Final RGB triplet for one pixel, and whether its primary ray hit.
    pub fn trace_pixel(&self, row: u32, column: u32) -> ([u8; 3], bool) {
        let ray = self.primary_ray(row, column);
        match self.trace(&ray) {
            Some(color) => (color.to_rgb8(), true),
            None => (self.background.to_rgb8(), false),
        }
    }

    /// Fill one output row; returns the number of pixels that hit.
    fn render_row(&self, row: u32, out: &mut [u8]) -> usize {
        let mut hits = 0;
        for (column, rgb) in out.chunks_exact_mut(3).enumerate() {
            let (color, hit) = self.trace_pixel(row, column as u32);
            rgb.copy_from_slice(&color);
            hits += hit as usize;
        }
        hits
    }

    fn row_len(&self) -> usize {
        self.width as usize * 3
    }

    /// Render the whole frame on the calling thread.
    pub fn render(&self) -> RenderOutput {
        log::info!("Rendering {}x{}", self.width, self.height);
        let start = Instant::now();

        let mut pixels = vec![0u8; self.row_len() * self.height as usize];
        let pixels_hit: usize = pixels
            .chunks_exact_mut(self.row_len())
            .enumerate()
            .map(|(row, out)| self.render_row(row as u32, out))
            .sum();

        self.finish(pixels, pixels_hit, start.elapsed())
    }

    /// Render the whole frame with one rayon task per row.
    ///
    /// Produces exactly the same bytes as [`Renderer::render`].
    pub fn render_parallel(&self) -> RenderOutput {
        log::info!(
            "Rendering {}x{} on {} threads",
            self.width,
            self.height,
            rayon::current_num_threads()
        );
        let start = Instant::now();

        let mut pixels = vec![0u8; self.row_len() * self.height as usize];
        let pixels_hit: usize = pixels
            .par_chunks_mut(self.row_len())
            .enumerate()
            .map(|(row, out)| self.render_row(row as u32, out))
            .sum();

        self.finish(pixels, pixels_hit, start.elapsed())
    }

    fn finish(&self, pixels: Vec<u8>, pixels_hit: usize, elapsed: Duration) -> RenderOutput {
        log::info!(
            "Rendered in {:?}: {} of {} pixels hit",
            elapsed,
            pixels_hit,
            self.width as usize * self.height as usize
        );

        RenderOutput {
            pixels,
            width: self.width,
            height: self.height,
            stats: RenderStats {
                pixels_hit,
                elapsed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{PlaneParams, TriangleParams};

    /// Reflective floor below a red sphere; triangle parked out of the way.
    fn mirror_scene(floor_alpha: f64, sphere_alpha: f64) -> SceneParams {
        let mut params = SceneParams::default();
        params.width = 8;
        params.height = 8;
        params.ambient = 0.5;
        params.floor = PlaneParams {
            normal: Vec3::Y,
            offset: -1.0,
            color: ColorSpec::rgb([100.0, 100.0, 100.0], floor_alpha),
        };
        params.sphere.center = Vec3::new(0.0, 1.0, 0.0);
        params.sphere.radius = 1.0;
        params.sphere.color = ColorSpec::rgb([200.0, 0.0, 0.0], sphere_alpha);
        params.triangle = TriangleParams {
            a: Vec3::new(100.0, 0.0, 100.0),
            b: Vec3::new(101.0, 0.0, 100.0),
            c: Vec3::new(100.0, 1.0, 100.0),
            color: ColorSpec::rgb([0.0, 0.0, 255.0], 0.0),
        };
        params
    }

    fn renderer(params: &SceneParams, max_bounces: u32) -> Renderer {
        Renderer::from_params(params, &Palette::standard(), RenderConfig { max_bounces })
            .unwrap()
    }

    /// Ray that hits the floor at (1.5, -1, 0); its mirror image enters the
    /// sphere.
    fn floor_ray() -> Ray {
        let origin = Vec3::new(3.5, 3.0, 0.0);
        Ray::new(origin, Vec3::new(1.5, -1.0, 0.0) - origin)
    }

    fn assert_color_eq(a: Color, b: Color) {
        assert!(
            (a.red - b.red).abs() < 1e-9
                && (a.green - b.green).abs() < 1e-9
                && (a.blue - b.blue).abs() < 1e-9,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_screen_amounts() {
        let (x, y) = screen_amounts(0, 0, 4, 2);
        // aspect 2, ((4-2)/2)/2 = 0.5
        assert_eq!(x, (0.5 / 4.0) * 2.0 - 0.5);
        assert_eq!(y, 2.5 / 2.0);

        let (x, y) = screen_amounts(5, 5, 11, 11);
        assert_eq!(x, 0.5);
        assert_eq!(y, 6.5 / 11.0);
    }

    #[test]
    fn test_primary_ray_starts_at_camera() {
        let params = SceneParams::default();
        let r = renderer(&params, 16);

        let ray = r.primary_ray(3, 7);
        assert_eq!(ray.origin(), params.camera);
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_floor_ray_reflects_into_sphere() {
        let r = renderer(&mirror_scene(0.5, 0.0), 16);
        let ray = floor_ray();

        let hit = r.primitives().nearest_hit(&ray).unwrap();
        assert_eq!(r.primitives()[hit.index].kind(), "plane");

        // base (50,50,50) + sphere (100,0,0) * 0.5
        let color = r.trace(&ray).unwrap();
        assert_color_eq(color, Color::new(100.0, 50.0, 50.0, 0.5));
    }

    #[test]
    fn test_non_reflective_surface_is_ambient_only() {
        let r = renderer(&mirror_scene(0.0, 0.0), 16);

        let color = r.trace(&floor_ray()).unwrap();
        assert_eq!(color, Color::new(50.0, 50.0, 50.0, 0.0));
    }

    #[test]
    fn test_zero_bounces_skips_reflection() {
        let r = renderer(&mirror_scene(1.0, 1.0), 0);

        let color = r.trace(&floor_ray()).unwrap();
        assert_color_eq(color, Color::new(50.0, 50.0, 50.0, 1.0));
    }

    #[test]
    fn test_one_bounce() {
        // Sphere is fully reflective, but the bounce budget stops at it
        let r = renderer(&mirror_scene(0.5, 1.0), 1);

        let color = r.trace(&floor_ray()).unwrap();
        assert_color_eq(color, Color::new(100.0, 50.0, 50.0, 0.5));
    }

    #[test]
    fn test_mutual_mirrors_terminate() {
        let r = renderer(&mirror_scene(1.0, 1.0), 64);

        for row in 0..r.height() {
            for column in 0..r.width() {
                let ray = r.primary_ray(row, column);
                if let Some(color) = r.trace(&ray) {
                    assert_eq!(color, color.clip());
                }
            }
        }
    }

    #[test]
    fn test_render_counts_hits() {
        let mut params = SceneParams::default();
        params.width = 16;
        params.height = 12;
        let r = renderer(&params, 16);

        let output = r.render();
        assert_eq!(output.pixels.len(), 16 * 12 * 3);
        // The floor and the sphere are both in view
        assert!(output.stats.pixels_hit > 0);
        assert!(output.stats.pixels_hit <= 16 * 12);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut params = SceneParams::default();
        params.width = 40;
        params.height = 30;
        let r = renderer(&params, 16);

        let serial = r.render();
        let parallel = r.render_parallel();

        assert_eq!(serial.pixels, parallel.pixels);
        assert_eq!(serial.stats.pixels_hit, parallel.stats.pixels_hit);
    }

    #[test]
    fn test_invalid_scene_is_rejected() {
        let mut params = SceneParams::default();
        params.camera = Vec3::new(0.0, 3.0, 0.0);

        let result = Renderer::from_params(&params, &Palette::standard(), RenderConfig::default());
        assert!(matches!(result, Err(RenderError::Scene(SceneError::Invalid(_)))));
    }

    #[test]
    fn test_unknown_palette_color() {
        let mut params = SceneParams::default();
        params.sphere.color = ColorSpec::named("unobtainium", 100.0);

        let result = Renderer::from_params(&params, &Palette::standard(), RenderConfig::default());
        assert!(matches!(result, Err(RenderError::Scene(SceneError::Palette(_)))));
    }
}
