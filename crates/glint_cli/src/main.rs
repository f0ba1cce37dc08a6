//! Render a Glint scene to an image file.
//!
//! Run with: cargo run --release -- [scene.json] [output.tif]

use std::env;

use anyhow::{Context, Result};
use glint_core::{FileSink, Palette, SceneParams};
use glint_renderer::{RenderConfig, Renderer};

const DEFAULT_OUTPUT: &str = "render.tif";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 3 || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: {} [scene.json] [output]", args[0]);
        eprintln!("\nWithout a scene file the built-in scene is rendered.");
        eprintln!("The output format follows the extension (default {}).", DEFAULT_OUTPUT);
        std::process::exit(2);
    }

    let params = match args.get(1) {
        Some(path) => SceneParams::from_file(path)
            .with_context(|| format!("Failed to load scene {}", path))?,
        None => {
            log::info!("No scene file given, using the built-in scene");
            SceneParams::default()
        }
    };
    let output_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);

    let palette = Palette::standard();
    let renderer = Renderer::from_params(&params, &palette, RenderConfig::default())
        .context("Failed to set up renderer")?;

    let output = renderer.render();

    let mut sink = FileSink::new(output_path);
    output
        .write_to(&mut sink)
        .with_context(|| format!("Failed to write {}", output_path))?;

    Ok(())
}
