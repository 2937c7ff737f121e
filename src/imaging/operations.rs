//! High-level image operations.
//!
//! These combine the pure calculations with pixel work on in-memory
//! rasters. Nothing here touches the filesystem.

use super::backend::Dimensions;
use super::calculations::{expected_thumb_size, fit_within};
use super::params::ScaleFactor;
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Dimensions of an in-memory raster.
pub fn dimensions_of(image: &RgbImage) -> Dimensions {
    Dimensions::new(image.width(), image.height())
}

/// Rotate a quarter turn clockwise, turning a landscape capture portrait.
pub fn rotate_to_portrait(image: &RgbImage) -> RgbImage {
    imageops::rotate90(image)
}

/// Thumbnail at exactly [`expected_thumb_size`] of `image`, Lanczos3.
///
/// Each axis is kept at least one pixel, so very small sources still get
/// a (1-pixel) thumbnail.
pub fn scaled_thumbnail(image: &RgbImage, scale: ScaleFactor) -> RgbImage {
    let target = expected_thumb_size(dimensions_of(image), scale);
    imageops::resize(
        image,
        target.width.max(1),
        target.height.max(1),
        FilterType::Lanczos3,
    )
}

/// Thumbnail fitted inside `bound`, aspect ratio preserved, never upscaled.
pub fn bounded_thumbnail(image: &RgbImage, bound: Dimensions) -> RgbImage {
    let source = dimensions_of(image);
    let target = fit_within(source, bound);
    if target == source {
        return image.clone();
    }
    imageops::resize(image, target.width, target.height, FilterType::Lanczos3)
}
