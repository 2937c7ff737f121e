//! Run configuration.
//!
//! Settings are loaded from an optional `config.toml` in the photos
//! directory, merged on top of the stock defaults. Directory locations come
//! from the command line; both are bundled into a [`RunConfig`] that is
//! built once per run and passed explicitly to every workflow.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnails]
//! scale = 0.2               # Thumbnail size relative to the original
//! tolerance = 1             # Allowed per-axis drift (px) of an existing thumbnail
//! quality = 85              # JPEG quality for thumbnails
//!
//! [originals]
//! quality = 95              # JPEG quality when a corrected original is rewritten
//!
//! [rotation]
//! landscape_width = 4000    # Landscape originals exactly this wide are turned portrait
//!
//! [centering]
//! suffix = "_centered"      # Output name: <stem><suffix>.jpg
//! thumbnail_max = [800, 800]
//! quality = 95
//! thumbnail_quality = 85
//! oversize = "crop"         # "crop" or "reject" when the source exceeds the canvas
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::calculations::CAPTURE_LANDSCAPE_WIDTH;
use crate::imaging::{Dimensions, OversizePolicy, Quality, ScaleFactor, Tolerance};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the settings file looked up in the photos directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `config.toml`.
///
/// All fields have defaults matching the behavior the tool was tuned for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Thumbnail scale and tolerance.
    pub thumbnails: ThumbnailsConfig,
    /// Re-encoding of corrected originals.
    pub originals: OriginalsConfig,
    /// Auto-rotation of mis-oriented captures.
    pub rotation: RotationConfig,
    /// Single-image centering workflow.
    pub centering: CenteringConfig,
}

impl NormalizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.scale.value() > 1.0 {
            return Err(ConfigError::Validation(
                "thumbnails.scale must be in (0, 1]".into(),
            ));
        }
        for (key, quality) in [
            ("thumbnails.quality", self.thumbnails.quality),
            ("originals.quality", self.originals.quality),
            ("centering.quality", self.centering.quality),
            ("centering.thumbnail_quality", self.centering.thumbnail_quality),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::Validation(format!("{key} must be 1-100")));
            }
        }
        if self.rotation.landscape_width == 0 {
            return Err(ConfigError::Validation(
                "rotation.landscape_width must be non-zero".into(),
            ));
        }
        if self.centering.thumbnail_max.contains(&0) {
            return Err(ConfigError::Validation(
                "centering.thumbnail_max values must be non-zero".into(),
            ));
        }
        if self.centering.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "centering.suffix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Thumbnail size relative to the (rotated) original.
    pub scale: ScaleFactor,
    /// Allowed per-axis difference before an existing thumbnail is rebuilt.
    pub tolerance: Tolerance,
    /// JPEG quality for thumbnails (PNG thumbnails are lossless).
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            scale: ScaleFactor::default(),
            tolerance: Tolerance::default(),
            quality: 85,
        }
    }
}

impl ThumbnailsConfig {
    pub fn quality(&self) -> Quality {
        Quality::new(self.quality)
    }
}

/// Settings for rewriting corrected originals in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OriginalsConfig {
    /// JPEG quality for rewritten originals (PNG originals are lossless).
    pub quality: u32,
}

impl Default for OriginalsConfig {
    fn default() -> Self {
        Self { quality: 95 }
    }
}

impl OriginalsConfig {
    pub fn quality(&self) -> Quality {
        Quality::new(self.quality)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotationConfig {
    /// Only landscape originals exactly this wide are rotated.
    pub landscape_width: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            landscape_width: CAPTURE_LANDSCAPE_WIDTH,
        }
    }
}

/// Settings for placing one image on the canonical canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CenteringConfig {
    /// Appended to the target's stem to name the output.
    pub suffix: String,
    /// Bounding box `[width, height]` for the centered thumbnail.
    pub thumbnail_max: [u32; 2],
    /// JPEG quality of the full-size centered image.
    pub quality: u32,
    /// JPEG quality of the centered thumbnail.
    pub thumbnail_quality: u32,
    /// Behavior when the target is larger than the canvas.
    pub oversize: OversizePolicy,
}

impl Default for CenteringConfig {
    fn default() -> Self {
        Self {
            suffix: "_centered".to_string(),
            thumbnail_max: [800, 800],
            quality: 95,
            thumbnail_quality: 85,
            oversize: OversizePolicy::Crop,
        }
    }
}

impl CenteringConfig {
    pub fn thumbnail_bound(&self) -> Dimensions {
        Dimensions::new(self.thumbnail_max[0], self.thumbnail_max[1])
    }
}

/// Everything a workflow needs, constructed once per run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the originals.
    pub photos_dir: PathBuf,
    /// Directory receiving thumbnails.
    pub thumb_dir: PathBuf,
    pub settings: NormalizeConfig,
}

impl RunConfig {
    /// Build from explicit parts. `thumb_dir` defaults to `<photos_dir>/thumb`.
    pub fn new(photos_dir: impl Into<PathBuf>, thumb_dir: Option<PathBuf>, settings: NormalizeConfig) -> Self {
        let photos_dir = photos_dir.into();
        let thumb_dir = thumb_dir.unwrap_or_else(|| photos_dir.join("thumb"));
        Self {
            photos_dir,
            thumb_dir,
            settings,
        }
    }

    /// Load settings from the photos directory and build the run config.
    pub fn load(photos_dir: impl Into<PathBuf>, thumb_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let photos_dir = photos_dir.into();
        let settings = load_config(&photos_dir)?;
        Ok(Self::new(photos_dir, thumb_dir, settings))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(NormalizeConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<NormalizeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: NormalizeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load settings from `config.toml` in `dir`, falling back to stock defaults.
pub fn load_config(dir: &Path) -> Result<NormalizeConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-normalize configuration
# =============================
# Place this file as config.toml in the photos directory.
# All settings are optional; values shown are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Thumbnails (the `thumbnails` and `check` commands)
# ---------------------------------------------------------------------------
[thumbnails]
# Thumbnail size relative to the original, per axis, floored. Must be in (0, 1].
scale = 0.2

# An existing thumbnail within this many pixels of the expected size on both
# axes is considered current and left alone.
tolerance = 1

# JPEG quality for thumbnails (1-100). PNG thumbnails are always lossless.
quality = 85

# ---------------------------------------------------------------------------
# Originals
# ---------------------------------------------------------------------------
[originals]
# JPEG quality used when a rotated or color-corrected original is written
# back over the source file.
quality = 95

# ---------------------------------------------------------------------------
# Rotation
# ---------------------------------------------------------------------------
[rotation]
# Landscape originals exactly this many pixels wide are rotated a quarter
# turn clockwise. Other landscape images are left as they are.
landscape_width = 4000

# ---------------------------------------------------------------------------
# Centering (the `center` command)
# ---------------------------------------------------------------------------
[centering]
# Output file name: <stem><suffix>.jpg
suffix = "_centered"

# The centered thumbnail is fitted inside this [width, height] box.
thumbnail_max = [800, 800]

# JPEG quality of the full-size centered image and of its thumbnail.
quality = 95
thumbnail_quality = 85

# When the image is larger than the canvas: "crop" clips it to the canvas,
# "reject" refuses to process it.
oversize = "crop"
"##
}
