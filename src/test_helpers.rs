//! Shared test utilities: synthetic photos written to temp directories.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let (tmp, run) = photos_dir();
//! let path = write_photo(&run, "a.png", &dull_gradient(40, 60));
//! let report = process::process(&run, ProcessOptions::default(), None).unwrap();
//! ```

use crate::config::{NormalizeConfig, RunConfig};
use crate::imaging::{ImageBackend, Quality, RustBackend};
use image::{Rgb, RgbImage};
use std::path::PathBuf;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Empty photos directory with default settings.
pub fn photos_dir() -> (TempDir, RunConfig) {
    let tmp = TempDir::new().unwrap();
    let run = RunConfig::new(tmp.path(), None, NormalizeConfig::default());
    (tmp, run)
}

/// Encode `image` into the photos directory; format follows the extension.
pub fn write_photo(run: &RunConfig, name: &str, image: &RgbImage) -> PathBuf {
    let path = run.photos_dir.join(name);
    RustBackend::new()
        .save(image, &path, Quality::new(95))
        .unwrap();
    path
}

// =========================================================================
// Synthetic images
// =========================================================================

/// Low-contrast gradient with a warm cast: no channel reaches 0 or 255.
pub fn dull_gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let t = ((x + y) * 100 / (width + height).max(1)) as u8;
        Rgb([60 + t, 50 + t / 2, 40 + t / 3])
    })
}

/// Image whose top-left pixel is red and everything else black.
pub fn marked_corner(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img
}

/// Per-channel `(min, max)` of an image.
pub fn channel_extremes(image: &RgbImage) -> [(u8, u8); 3] {
    crate::imaging::correction::channel_ranges(image).map(|r| (r.min, r.max))
}
