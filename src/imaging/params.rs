//! Value types shared by the imaging operations.
//!
//! - [`Quality`] — Lossy encoding quality (1–100). Clamped on construction.
//! - [`ScaleFactor`] — Thumbnail size relative to its source (default 0.2).
//! - [`Tolerance`] — Per-axis slack, in pixels, when judging an existing thumbnail.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Thumbnail scale relative to the source image.
///
/// Always finite and strictly positive. Applying it to an axis floors the
/// product, so `1000 * 0.2` is `200` and `1004 * 0.2` is `200` as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Returns `None` for zero, negative, NaN or infinite factors.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Scale one axis, flooring the result.
    pub fn apply(self, axis: u32) -> u32 {
        (axis as f64 * self.0).floor() as u32
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(0.2)
    }
}

impl TryFrom<f64> for ScaleFactor {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("scale factor must be positive, got {value}"))
    }
}

impl From<ScaleFactor> for f64 {
    fn from(scale: ScaleFactor) -> Self {
        scale.0
    }
}

/// Allowed per-axis difference, in pixels, between an existing thumbnail
/// and its expected size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance(pub u32);

impl Tolerance {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(1)
    }
}
