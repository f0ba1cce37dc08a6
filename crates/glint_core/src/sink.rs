//! Image sinks: where a finished pixel buffer goes.
//!
//! A sink receives a tightly packed, row-major, top-left-origin RGB8 buffer
//! together with its dimensions. Every sink refuses a buffer whose length is
//! not exactly `width * height * 3`.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use image::codecs::tiff::TiffEncoder;
use image::{ColorType, ImageEncoder};
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Cannot write an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Number of bytes in an RGB8 buffer of the given size.
pub fn rgb_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Check that `pixels` is a complete RGB8 frame of `width` x `height`.
pub fn check_frame(pixels: &[u8], width: u32, height: u32) -> SinkResult<()> {
    if width == 0 || height == 0 {
        return Err(SinkError::EmptyImage { width, height });
    }

    let expected = rgb_buffer_len(width, height);
    if pixels.len() != expected {
        return Err(SinkError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

/// Consumer of a finished frame.
pub trait ImageSink {
    /// Write one complete RGB8 frame.
    fn write(&mut self, pixels: &[u8], width: u32, height: u32) -> SinkResult<()>;
}

/// Writes frames to a file on disk.
///
/// `.tif`/`.tiff` paths are written as baseline TIFF (8-bit RGB, top-left
/// origin). Any other extension is encoded by the `image` crate according to
/// the extension, e.g. `.png`.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_tiff(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
            .unwrap_or(false)
    }
}

impl ImageSink for FileSink {
    fn write(&mut self, pixels: &[u8], width: u32, height: u32) -> SinkResult<()> {
        check_frame(pixels, width, height)?;

        if self.is_tiff() {
            let writer = BufWriter::new(File::create(&self.path)?);
            TiffEncoder::new(writer).write_image(pixels, width, height, ColorType::Rgb8)?;
        } else {
            image::save_buffer(&self.path, pixels, width, height, ColorType::Rgb8)?;
        }

        log::info!(
            "Wrote {}x{} image to {}",
            width,
            height,
            self.path.display()
        );
        Ok(())
    }
}

/// A frame captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Keeps the last written frame in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    frame: Option<Frame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last frame written, if any.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }
}

impl ImageSink for MemorySink {
    fn write(&mut self, pixels: &[u8], width: u32, height: u32) -> SinkResult<()> {
        check_frame(pixels, width, height)?;
        self.frame = Some(Frame {
            pixels: pixels.to_vec(),
            width,
            height,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(rgb_buffer_len(width, height));
        for row in 0..height {
            for column in 0..width {
                pixels.extend_from_slice(&[(column * 10) as u8, (row * 20) as u8, 7]);
            }
        }
        pixels
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("glint_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_check_frame() {
        assert!(check_frame(&[0; 12], 2, 2).is_ok());
        assert!(matches!(
            check_frame(&[0; 11], 2, 2),
            Err(SinkError::SizeMismatch {
                expected: 12,
                actual: 11
            })
        ));
        assert!(matches!(
            check_frame(&[], 0, 4),
            Err(SinkError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        assert!(sink.frame().is_none());

        let pixels = gradient(4, 3);
        sink.write(&pixels, 4, 3).unwrap();

        let frame = sink.frame().unwrap();
        assert_eq!(frame.width, 4);
        assert_eq!(frame.height, 3);
        // (column 2, row 1)
        assert_eq!(frame.pixels[(4 + 2) * 3..][..3], [20, 20, 7]);
    }

    #[test]
    fn test_memory_sink_rejects_short_buffer() {
        let mut sink = MemorySink::new();
        assert!(sink.write(&[1, 2, 3], 2, 1).is_err());
        assert!(sink.frame().is_none());
    }

    #[test]
    fn test_file_sink_tiff() {
        init_logger();
        let path = temp_path("sink.tif");
        let pixels = gradient(5, 4);

        let mut sink = FileSink::new(&path);
        sink.write(&pixels, 5, 4).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 4));
        assert_eq!(decoded.into_raw(), pixels);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_sink_png() {
        init_logger();
        let path = temp_path("sink.png");
        let pixels = gradient(3, 2);

        FileSink::new(&path).write(&pixels, 3, 2).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.into_raw(), pixels);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_sink_size_mismatch_writes_nothing() {
        init_logger();
        let path = temp_path("mismatch.tif");

        let result = FileSink::new(&path).write(&[0; 10], 2, 2);

        assert!(matches!(result, Err(SinkError::SizeMismatch { .. })));
        assert!(!path.exists());
    }
}
