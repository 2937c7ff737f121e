//! Per-image decisions for the thumbnail workflow.
//!
//! Each original is classified before any pixel is touched:
//!
//! | Status | When | Work done |
//! |---|---|---|
//! | `rotated` | original is a capture-width landscape | rotate, rewrite original, new thumbnail (plus color correction if it had no thumbnail) |
//! | `new` | no thumbnail exists | white balance, auto levels, rewrite original, new thumbnail |
//! | `wrong-size` | thumbnail off by more than the tolerance, or unreadable | new thumbnail only |
//! | `ok` | thumbnail within tolerance | nothing |
//!
//! Rotation is checked first and wins over every other status. Color
//! correction only ever runs for originals without a thumbnail, so pixel
//! content is never corrected twice across runs.

use crate::config::NormalizeConfig;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, ScaleFactor, Tolerance, expected_thumb_size,
    is_thumbnail_current, needs_rotation,
};
use serde::Serialize;
use std::path::Path;

/// What was found at an original's thumbnail location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingThumbnail {
    Missing,
    /// A file exists but its size could not be read.
    Unreadable,
    Present(Dimensions),
}

/// Classification of one original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ImageStatus {
    /// No thumbnail yet.
    New,
    /// Original needs a quarter turn. `is_new` when it also has no thumbnail.
    Rotated { is_new: bool },
    /// Thumbnail exists but does not match the expected size.
    WrongSize {
        found: Option<Dimensions>,
        expected: Dimensions,
    },
    /// Thumbnail is current.
    Ok { thumbnail: Dimensions },
}

impl ImageStatus {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ImageStatus::New => "new",
            ImageStatus::Rotated { .. } => "rotated",
            ImageStatus::WrongSize { .. } => "wrong-size",
            ImageStatus::Ok { .. } => "ok",
        }
    }

    /// Whether a thumbnail has to be (re)written.
    pub fn needs_thumbnail(&self) -> bool {
        !matches!(self, ImageStatus::Ok { .. })
    }

    /// Whether white balance and auto levels run for this image.
    pub fn applies_color_correction(&self) -> bool {
        matches!(
            self,
            ImageStatus::New | ImageStatus::Rotated { is_new: true }
        )
    }

    pub fn rotates(&self) -> bool {
        matches!(self, ImageStatus::Rotated { .. })
    }
}

/// Thumbnail rules for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailPolicy {
    pub scale: ScaleFactor,
    pub tolerance: Tolerance,
    pub landscape_width: u32,
}

impl Default for ThumbnailPolicy {
    fn default() -> Self {
        Self::from_config(&NormalizeConfig::default())
    }
}

impl ThumbnailPolicy {
    pub fn from_config(config: &NormalizeConfig) -> Self {
        Self {
            scale: config.thumbnails.scale,
            tolerance: config.thumbnails.tolerance,
            landscape_width: config.rotation.landscape_width,
        }
    }

    pub fn needs_rotation(&self, original: Dimensions) -> bool {
        needs_rotation(original, self.landscape_width)
    }

    /// Expected thumbnail size for an original as it will be after any
    /// rotation.
    pub fn expected_size(&self, original: Dimensions) -> Dimensions {
        let processed = if self.needs_rotation(original) {
            original.to_portrait()
        } else {
            original
        };
        expected_thumb_size(processed, self.scale)
    }

    pub fn classify(&self, original: Dimensions, existing: ExistingThumbnail) -> ImageStatus {
        if self.needs_rotation(original) {
            return ImageStatus::Rotated {
                is_new: existing == ExistingThumbnail::Missing,
            };
        }
        let expected = self.expected_size(original);
        match existing {
            ExistingThumbnail::Missing => ImageStatus::New,
            ExistingThumbnail::Unreadable => ImageStatus::WrongSize {
                found: None,
                expected,
            },
            ExistingThumbnail::Present(found)
                if is_thumbnail_current(found, expected, self.tolerance) =>
            {
                ImageStatus::Ok { thumbnail: found }
            }
            ExistingThumbnail::Present(found) => ImageStatus::WrongSize {
                found: Some(found),
                expected,
            },
        }
    }
}

/// Look at the thumbnail location without decoding the image.
pub fn inspect_thumbnail(backend: &impl ImageBackend, thumb_path: &Path) -> ExistingThumbnail {
    if !thumb_path.exists() {
        return ExistingThumbnail::Missing;
    }
    match backend.identify(thumb_path) {
        Ok(dims) => ExistingThumbnail::Present(dims),
        Err(_) => ExistingThumbnail::Unreadable,
    }
}

/// An original's size and what needs doing to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePlan {
    pub original: Dimensions,
    pub status: ImageStatus,
}

/// Read the original's header and classify it against its thumbnail.
pub fn plan_image(
    backend: &impl ImageBackend,
    policy: &ThumbnailPolicy,
    original_path: &Path,
    thumb_path: &Path,
) -> Result<ImagePlan, BackendError> {
    let original = backend.identify(original_path)?;
    let existing = inspect_thumbnail(backend, thumb_path);
    Ok(ImagePlan {
        original,
        status: policy.classify(original, existing),
    })
}
