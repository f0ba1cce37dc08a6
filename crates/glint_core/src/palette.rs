//! Named color table.
//!
//! Scenes refer to colors by name plus an intensity on the 8-bit scale, e.g.
//! `("floor", 100)`. The table is built once, handed to whoever resolves
//! scene colors, and never mutated afterwards.

use std::collections::HashMap;

use thiserror::Error;

use crate::Color;

/// Errors that can occur during palette lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaletteError {
    #[error("Unknown palette color: {0}")]
    UnknownColor(String),

    #[error("Intensity {intensity} for color '{name}' is outside [0, 255]")]
    IntensityOutOfRange { name: String, intensity: f64 },
}

/// One palette entry: per-channel weights and the surface reflectivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    /// RGB weights in [0, 1], multiplied by the requested intensity
    pub weights: [f64; 3],
    /// Reflectivity carried into the resolved color's alpha
    pub reflectivity: f64,
}

impl PaletteEntry {
    pub const fn new(weights: [f64; 3], reflectivity: f64) -> Self {
        Self {
            weights,
            reflectivity,
        }
    }
}

/// Read-only mapping from color names to entries.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    entries: HashMap<String, PaletteEntry>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in color table.
    pub fn standard() -> Self {
        [
            ("white", PaletteEntry::new([1.0, 1.0, 1.0], 0.0)),
            ("black", PaletteEntry::new([0.0, 0.0, 0.0], 0.0)),
            ("gray", PaletteEntry::new([0.5, 0.5, 0.5], 0.1)),
            ("red", PaletteEntry::new([1.0, 0.0, 0.0], 0.3)),
            ("green", PaletteEntry::new([0.0, 1.0, 0.0], 0.3)),
            ("blue", PaletteEntry::new([0.0, 0.0, 1.0], 0.3)),
            ("yellow", PaletteEntry::new([1.0, 1.0, 0.0], 0.3)),
            ("cyan", PaletteEntry::new([0.0, 1.0, 1.0], 0.3)),
            ("magenta", PaletteEntry::new([1.0, 0.0, 1.0], 0.3)),
            ("orange", PaletteEntry::new([1.0, 0.5, 0.0], 0.2)),
            ("floor", PaletteEntry::new([0.8, 0.75, 0.65], 0.5)),
        ]
        .into_iter()
        .fold(Self::new(), |palette, (name, entry)| palette.with(name, entry))
    }

    /// Add or replace an entry. Names are case-insensitive.
    pub fn with(mut self, name: &str, entry: PaletteEntry) -> Self {
        self.entries.insert(name.to_ascii_lowercase(), entry);
        self
    }

    /// Get the raw entry for a name.
    pub fn get(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    /// Number of named colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve `name` at `intensity` (0-255) to a concrete color.
    pub fn lookup(&self, name: &str, intensity: f64) -> Result<Color, PaletteError> {
        let entry = self
            .get(name)
            .ok_or_else(|| PaletteError::UnknownColor(name.to_string()))?;

        if !(0.0..=255.0).contains(&intensity) {
            return Err(PaletteError::IntensityOutOfRange {
                name: name.to_string(),
                intensity,
            });
        }

        let [r, g, b] = entry.weights;
        Ok(Color::new(
            r * intensity,
            g * intensity,
            b * intensity,
            entry.reflectivity,
        ))
    }
}
