//! Glint Core - colors, scene parameters and image output.
//!
//! This crate provides:
//!
//! - **Colors**: `Color` and the named `Palette`
//! - **Scene parameters**: `SceneParams`, loaded from JSON
//! - **Image sinks**: `FileSink` (TIFF/PNG/...) and `MemorySink`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{FileSink, ImageSink, SceneParams};
//!
//! let params = SceneParams::from_file("scene.json")?;
//! let mut sink = FileSink::new("render.tif");
//! sink.write(&pixels, params.width, params.height)?;
//! ```

pub mod color;
pub mod palette;
pub mod scene;
pub mod sink;

// Re-export commonly used types
pub use color::Color;
pub use palette::{Palette, PaletteEntry, PaletteError};
pub use scene::{
    ColorSpec, LightParams, PlaneParams, SceneError, SceneParams, SceneResult, SphereParams,
    TriangleParams,
};
pub use sink::{FileSink, Frame, ImageSink, MemorySink, SinkError, SinkResult};
