//! Centering workflow: put one outlier image on the folder's canonical canvas.
//!
//! 1. Tally the sizes of the reference images in the photos directory and
//!    take the most common one, turned portrait, as the canvas.
//! 2. Load the target and center it on a white canvas of that size.
//! 3. Write the result next to the target as `<stem><suffix>.jpg`, plus a
//!    thumbnail fitted inside `thumbnail_max` under the same name in the
//!    thumbnail directory.
//!
//! Unlike the thumbnail workflow, every failure here is fatal: there is
//! exactly one image to process.

use crate::config::RunConfig;
use crate::imaging::{
    BackendError, CompositeError, Dimensions, ImageBackend, Quality, RustBackend,
    bounded_thumbnail, center_on_canvas,
};
use crate::naming;
use crate::scan::{self, ScanError};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CenterError {
    #[error("No readable reference images found in {0}")]
    MissingReference(PathBuf),
    #[error("Target image not found: {0}")]
    TargetNotFound(PathBuf),
    #[error(transparent)]
    Oversized(#[from] CompositeError),
    #[error("Image processing failed: {0}")]
    Backend(#[from] BackendError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
}

/// Result of centering one image.
#[derive(Debug, Clone, Serialize)]
pub struct CenterOutcome {
    /// Target file name as given.
    pub target: String,
    /// Output file name (`<stem><suffix>.jpg`).
    pub output: String,
    pub canvas: Dimensions,
    pub source: Dimensions,
    /// Top-left of the source on the canvas.
    pub offset: (i64, i64),
    pub full_size_path: PathBuf,
    pub thumbnail_path: PathBuf,
    pub thumbnail: Dimensions,
}

/// Canonical canvas of the run's photos directory.
pub fn canonical_canvas_for(
    backend: &impl ImageBackend,
    run: &RunConfig,
) -> Result<Dimensions, CenterError> {
    let tally =
        scan::collect_reference_sizes(backend, &run.photos_dir, &run.settings.centering.suffix)?;
    debug!(references = tally.total(), "reference sizes collected");
    tally
        .canonical_canvas()
        .ok_or_else(|| CenterError::MissingReference(run.photos_dir.clone()))
}

/// Center `target` (a file name inside the photos directory) with the
/// production backend.
pub fn center(run: &RunConfig, target: &str) -> Result<CenterOutcome, CenterError> {
    center_with_backend(&RustBackend::new(), run, target)
}

pub fn center_with_backend(
    backend: &impl ImageBackend,
    run: &RunConfig,
    target: &str,
) -> Result<CenterOutcome, CenterError> {
    let settings = &run.settings.centering;
    let canvas = canonical_canvas_for(backend, run)?;
    info!(%canvas, "canonical canvas");

    let target_path = run.photos_dir.join(target);
    if !target_path.is_file() {
        return Err(CenterError::TargetNotFound(target_path));
    }

    let source = backend.load(&target_path)?;
    let source_dims = Dimensions::new(source.width(), source.height());
    let composite = center_on_canvas(&source, canvas, settings.oversize)?;
    debug!(source = %source_dims, offset = ?composite.offset, "centered on canvas");

    let output = naming::centered_filename(target, &settings.suffix);
    let full_size_path = run.photos_dir.join(&output);
    backend.save(
        &composite.image,
        &full_size_path,
        Quality::new(settings.quality),
    )?;

    std::fs::create_dir_all(&run.thumb_dir)?;
    let thumbnail = bounded_thumbnail(&composite.image, settings.thumbnail_bound());
    let thumbnail_path = run.thumb_dir.join(&output);
    backend.save(
        &thumbnail,
        &thumbnail_path,
        Quality::new(settings.thumbnail_quality),
    )?;
    info!(output = %full_size_path.display(), "centered image written");

    Ok(CenterOutcome {
        target: target.to_string(),
        output,
        canvas,
        source: source_dims,
        offset: composite.offset,
        full_size_path,
        thumbnail_path,
        thumbnail: Dimensions::new(thumbnail.width(), thumbnail.height()),
    })
}
