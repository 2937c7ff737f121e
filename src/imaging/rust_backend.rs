//! Pure Rust codec backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader::decode` → `into_rgb8` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, best compression (lossless) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output formats originals and thumbnails can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Jpeg,
    Png,
}

fn output_format(path: &Path) -> Result<OutputFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ImageFormat::from_extension(&ext) {
        Some(ImageFormat::Jpeg) => Ok(OutputFormat::Jpeg),
        Some(ImageFormat::Png) => Ok(OutputFormat::Png),
        _ => Err(BackendError::UnsupportedFormat(ext)),
    }
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn encode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Encode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path) -> Result<ImageReader<std::io::BufReader<File>>, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()
        .map_err(BackendError::Io)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open(path)?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions::new(width, height))
    }

    fn load(&self, path: &Path) -> Result<RgbImage, BackendError> {
        let img = open(path)?.decode().map_err(|e| decode_error(path, e))?;
        Ok(img.into_rgb8())
    }

    fn save(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
        let format = output_format(path)?;
        let writer = BufWriter::new(File::create(path)?);
        let (width, height) = image.dimensions();
        let written = match format {
            OutputFormat::Jpeg => {
                JpegEncoder::new_with_quality(writer, quality.value() as u8).write_image(
                    image.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )
            }
            OutputFormat::Png => {
                PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive)
                    .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
            }
        };
        written.map_err(|e| encode_error(path, e))
    }
}
