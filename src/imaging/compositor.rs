//! Place an image centered on a blank white canvas.

use super::backend::Dimensions;
use super::calculations::center_offset;
use image::{Rgb, RgbImage, imageops};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canvas background.
pub const CANVAS_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// What to do when the source is larger than the canvas on some axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Keep the centered placement and clip whatever falls outside the canvas.
    #[default]
    Crop,
    /// Refuse with [`CompositeError::Oversized`].
    Reject,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompositeError {
    #[error("Image {image} does not fit on canvas {canvas}")]
    Oversized { image: Dimensions, canvas: Dimensions },
}

/// A composed canvas and where the source landed on it.
#[derive(Debug, Clone)]
pub struct Composite {
    pub image: RgbImage,
    /// Top-left of the source on the canvas; negative when it was clipped.
    pub offset: (i64, i64),
}

/// Center `source` on a white canvas of size `canvas`.
pub fn center_on_canvas(
    source: &RgbImage,
    canvas: Dimensions,
    oversize: OversizePolicy,
) -> Result<Composite, CompositeError> {
    let source_dims = Dimensions::new(source.width(), source.height());
    if oversize == OversizePolicy::Reject && !source_dims.fits_within(canvas) {
        return Err(CompositeError::Oversized {
            image: source_dims,
            canvas,
        });
    }

    let offset = center_offset(source_dims, canvas);
    let mut image = RgbImage::from_pixel(canvas.width, canvas.height, CANVAS_FILL);
    // overlay clips at the canvas bounds for negative or overhanging offsets
    imageops::overlay(&mut image, source, offset.0, offset.1);
    Ok(Composite { image, offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([200, 10, 10]);

    #[test]
    fn smaller_source_is_centered_on_white() {
        let source = RgbImage::from_pixel(500, 700, RED);
        let out = center_on_canvas(&source, Dimensions::new(800, 1000), OversizePolicy::Crop).unwrap();

        assert_eq!(out.offset, (150, 150));
        assert_eq!(out.image.dimensions(), (800, 1000));
        assert_eq!(*out.image.get_pixel(149, 149), CANVAS_FILL);
        assert_eq!(*out.image.get_pixel(150, 150), RED);
        assert_eq!(*out.image.get_pixel(649, 849), RED);
        assert_eq!(*out.image.get_pixel(650, 850), CANVAS_FILL);
        assert_eq!(*out.image.get_pixel(799, 999), CANVAS_FILL);
    }

    #[test]
    fn same_size_source_covers_canvas() {
        let source = RgbImage::from_pixel(40, 60, RED);
        let out = center_on_canvas(&source, Dimensions::new(40, 60), OversizePolicy::Reject).unwrap();
        assert_eq!(out.offset, (0, 0));
        assert!(out.image.pixels().all(|p| *p == RED));
    }

    #[test]
    fn oversized_source_is_cropped_by_default() {
        let source = RgbImage::from_fn(12, 4, |x, _| Rgb([x as u8, 0, 0]));
        let out = center_on_canvas(&source, Dimensions::new(8, 8), OversizePolicy::default()).unwrap();

        assert_eq!(out.offset, (-2, 2));
        assert_eq!(out.image.dimensions(), (8, 8));
        // leftmost canvas column shows source column 2
        assert_eq!(out.image.get_pixel(0, 2).0[0], 2);
        assert_eq!(out.image.get_pixel(7, 5).0[0], 9);
        assert_eq!(*out.image.get_pixel(0, 0), CANVAS_FILL);
        assert_eq!(*out.image.get_pixel(0, 6), CANVAS_FILL);
    }

    #[test]
    fn oversized_source_rejected_when_asked() {
        let source = RgbImage::from_pixel(10, 4, RED);
        let err = center_on_canvas(&source, Dimensions::new(8, 8), OversizePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            CompositeError::Oversized {
                image: Dimensions::new(10, 4),
                canvas: Dimensions::new(8, 8),
            }
        );
    }
}
