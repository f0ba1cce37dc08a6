//! Scene parameters for Glint.
//!
//! A scene is a fixed set of named fields: one camera position, one point
//! light, one sphere, one triangle, one floor plane, the output size and an
//! ambient coefficient. Parameters are read once (usually from JSON) and are
//! read-only afterwards. Missing fields fall back to the built-in scene.

use std::fs;
use std::path::Path;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Color, Palette, PaletteError};

/// Errors that can occur while loading or resolving a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A color descriptor: either a palette name or explicit channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette color, e.g. `{ "name": "floor", "intensity": 100 }`
    Named {
        name: String,
        intensity: f64,
        /// Overrides the palette entry's reflectivity
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reflectivity: Option<f64>,
    },
    /// Explicit channels on the 8-bit scale
    Rgb {
        rgb: [f64; 3],
        #[serde(default)]
        reflectivity: f64,
    },
}

impl ColorSpec {
    /// Palette color with the entry's own reflectivity.
    pub fn named(name: impl Into<String>, intensity: f64) -> Self {
        ColorSpec::Named {
            name: name.into(),
            intensity,
            reflectivity: None,
        }
    }

    /// Explicit color.
    pub fn rgb(rgb: [f64; 3], reflectivity: f64) -> Self {
        ColorSpec::Rgb { rgb, reflectivity }
    }

    /// Resolve against a palette.
    pub fn resolve(&self, palette: &Palette) -> Result<Color, PaletteError> {
        match self {
            ColorSpec::Named {
                name,
                intensity,
                reflectivity,
            } => {
                let color = palette.lookup(name, *intensity)?;
                Ok(match reflectivity {
                    Some(alpha) => Color { alpha: *alpha, ..color },
                    None => color,
                })
            }
            ColorSpec::Rgb { rgb, reflectivity } => {
                Ok(Color::new(rgb[0], rgb[1], rgb[2], *reflectivity))
            }
        }
    }

    fn reflectivity(&self) -> Option<f64> {
        match self {
            ColorSpec::Named { reflectivity, .. } => *reflectivity,
            ColorSpec::Rgb { reflectivity, .. } => Some(*reflectivity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightParams {
    pub position: Vec3,
    pub color: ColorSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereParams {
    pub center: Vec3,
    pub radius: f64,
    pub color: ColorSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleParams {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub color: ColorSpec,
}

/// The floor plane. Points on it satisfy `normal · p = offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneParams {
    pub normal: Vec3,
    pub offset: f64,
    pub color: ColorSpec,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            offset: -1.0,
            color: ColorSpec::named("floor", 100.0),
        }
    }
}

/// All scalar and vector inputs of a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Attenuation applied to every primitive's base color
    pub ambient: f64,
    /// Camera position; the camera always looks at the origin
    pub camera: Vec3,
    pub light: LightParams,
    pub sphere: SphereParams,
    pub triangle: TriangleParams,
    pub floor: PlaneParams,
    /// Color of pixels whose primary ray hits nothing
    pub background: ColorSpec,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            ambient: 0.7,
            camera: Vec3::new(3.0, 1.5, -4.0),
            light: LightParams {
                position: Vec3::new(-7.0, 10.0, -10.0),
                color: ColorSpec::named("white", 255.0),
            },
            sphere: SphereParams {
                center: Vec3::ZERO,
                radius: 1.0,
                color: ColorSpec::named("green", 200.0),
            },
            triangle: TriangleParams {
                a: Vec3::new(3.0, 0.0, 0.0),
                b: Vec3::new(0.0, 3.0, 0.0),
                c: Vec3::new(0.0, 0.0, 3.0),
                color: ColorSpec::named("orange", 220.0),
            },
            floor: PlaneParams::default(),
            background: ColorSpec::named("black", 128.0),
        }
    }
}

impl SceneParams {
    /// Parse and validate a scene from JSON text.
    pub fn from_json(input: &str) -> SceneResult<Self> {
        let params: SceneParams = serde_json::from_str(input)?;
        params.validate()?;
        Ok(params)
    }

    /// Load, parse and validate a scene file.
    pub fn from_file(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        log::info!("Loading scene file {}", path.display());

        let input = fs::read_to_string(path)?;
        log::debug!("Read {} bytes", input.len());

        Self::from_json(&input).inspect_err(|e| {
            log::error!("Failed to load scene {}: {}", path.display(), e);
        })
    }

    /// Pixel aspect of the output, width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Reject parameters that would produce degenerate geometry or an empty
    /// frame.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }

        if !self.ambient.is_finite() || self.ambient < 0.0 {
            return invalid(format!("ambient must be >= 0, got {}", self.ambient));
        }

        let vectors = [
            ("camera", self.camera),
            ("light.position", self.light.position),
            ("sphere.center", self.sphere.center),
            ("triangle.a", self.triangle.a),
            ("triangle.b", self.triangle.b),
            ("triangle.c", self.triangle.c),
            ("floor.normal", self.floor.normal),
        ];
        if let Some((name, _)) = vectors.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{} is not finite", name));
        }

        // The camera looks at the origin with +Y as world up.
        if self.camera.length_squared() == 0.0 {
            return invalid("camera cannot sit at the look-at target (origin)".to_string());
        }
        if Vec3::Y.cross(self.camera).length_squared() == 0.0 {
            return invalid("camera cannot lie on the world up axis".to_string());
        }

        if !self.sphere.radius.is_finite() || self.sphere.radius <= 0.0 {
            return invalid(format!(
                "sphere radius must be > 0, got {}",
                self.sphere.radius
            ));
        }

        let t = &self.triangle;
        if (t.b - t.a).cross(t.c - t.a).length_squared() == 0.0 {
            return invalid("triangle vertices are collinear".to_string());
        }

        if self.floor.normal.length_squared() == 0.0 {
            return invalid("floor normal cannot be zero".to_string());
        }
        if !self.floor.offset.is_finite() {
            return invalid("floor offset is not finite".to_string());
        }

        let colors = [
            ("light", &self.light.color),
            ("sphere", &self.sphere.color),
            ("triangle", &self.triangle.color),
            ("floor", &self.floor.color),
            ("background", &self.background),
        ];
        for (name, color) in colors {
            if let Some(alpha) = color.reflectivity() {
                if !(0.0..=1.0).contains(&alpha) {
                    return invalid(format!(
                        "{} reflectivity must be in [0, 1], got {}",
                        name, alpha
                    ));
                }
            }
            if let ColorSpec::Rgb { rgb, .. } = color {
                if rgb.iter().any(|c| !c.is_finite()) {
                    return invalid(format!("{} color is not finite", name));
                }
            }
        }

        Ok(())
    }
}

fn invalid<T>(message: String) -> SceneResult<T> {
    Err(SceneError::Invalid(message))
}
