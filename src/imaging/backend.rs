//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the workflows and the
//! codecs: identify (read dimensions without a full decode), load (decode
//! to 8-bit RGB) and save (encode, format chosen from the extension).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use a recording
//! mock so orchestration logic can be checked without touching pixels.

use super::params::Quality;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Pixel dimensions of an image: `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Landscape iff strictly wider than tall. Squares are not.
    pub fn is_landscape(self) -> bool {
        self.width > self.height
    }

    /// Swap axes of a landscape size; portrait and square sizes pass through.
    pub fn to_portrait(self) -> Self {
        if self.is_landscape() {
            Self::new(self.height, self.width)
        } else {
            self
        }
    }

    /// Whether this size fits inside `outer` on both axes.
    pub fn fits_within(self, outer: Dimensions) -> bool {
        self.width <= outer.width && self.height <= outer.height
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image codec backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode an image, converting it to 8-bit RGB.
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError>;

    /// Encode `image` to `path`, overwriting any existing file.
    fn save(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError>;
}
