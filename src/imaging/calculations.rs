//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::{ScaleFactor, Tolerance};

/// Landscape width produced by the capture device whose shots arrive
/// rotated a quarter turn.
pub const CAPTURE_LANDSCAPE_WIDTH: u32 = 4000;

/// Whether an original must be rotated a quarter turn to become portrait.
///
/// This is deliberately narrow: only images exactly `landscape_width` wide
/// *and* wider than tall qualify. Other landscape images are left alone.
///
/// ```
/// # use photo_normalize::imaging::{Dimensions, needs_rotation};
/// assert!(needs_rotation(Dimensions::new(4000, 3000), 4000));
/// assert!(!needs_rotation(Dimensions::new(4000, 4000), 4000));
/// assert!(!needs_rotation(Dimensions::new(3000, 4000), 4000));
/// ```
pub fn needs_rotation(dim: Dimensions, landscape_width: u32) -> bool {
    dim.width == landscape_width && dim.width > dim.height
}

/// Expected thumbnail size: each axis multiplied by `scale` and floored.
///
/// ```
/// # use photo_normalize::imaging::{Dimensions, ScaleFactor, expected_thumb_size};
/// let expected = expected_thumb_size(Dimensions::new(1000, 2000), ScaleFactor::default());
/// assert_eq!(expected, Dimensions::new(200, 400));
/// ```
pub fn expected_thumb_size(original: Dimensions, scale: ScaleFactor) -> Dimensions {
    Dimensions::new(scale.apply(original.width), scale.apply(original.height))
}

/// Whether an existing thumbnail is within `tolerance` pixels of `expected`
/// on both axes.
pub fn is_thumbnail_current(existing: Dimensions, expected: Dimensions, tolerance: Tolerance) -> bool {
    existing.width.abs_diff(expected.width) <= tolerance.value()
        && existing.height.abs_diff(expected.height) <= tolerance.value()
}

/// Top-left offset that centers `source` on `canvas`.
///
/// Uses truncating division; offsets go negative when the source is larger
/// than the canvas on that axis.
pub fn center_offset(source: Dimensions, canvas: Dimensions) -> (i64, i64) {
    let x = (i64::from(canvas.width) - i64::from(source.width)) / 2;
    let y = (i64::from(canvas.height) - i64::from(source.height)) / 2;
    (x, y)
}

/// Largest size with the aspect ratio of `source` that fits inside `bound`.
///
/// Never upscales: a source already inside the bound is returned unchanged.
/// Each axis is rounded and kept at least one pixel.
pub fn fit_within(source: Dimensions, bound: Dimensions) -> Dimensions {
    if source.fits_within(bound) {
        return source;
    }
    let scale = f64::min(
        bound.width as f64 / source.width as f64,
        bound.height as f64 / source.height as f64,
    );
    let w = ((source.width as f64 * scale).round() as u32).clamp(1, bound.width);
    let h = ((source.height as f64 * scale).round() as u32).clamp(1, bound.height);
    Dimensions::new(w, h)
}
