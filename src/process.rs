//! Thumbnail workflow: rotate, color-correct and thumbnail a photos folder.
//!
//! For every original (sorted by file name) the stage:
//!
//! 1. Classifies it with [`plan_image`] (header reads only).
//! 2. Stops there for `ok` images, or for every image in a dry run.
//! 3. Loads the pixels and applies the corrections its status calls for:
//!    quarter-turn rotation, then white-patch balance, then auto levels.
//! 4. **Overwrites the original** when any correction was applied. Edits
//!    are destructive; there is no backup.
//! 5. Writes a thumbnail at exactly the expected size into the thumbnail
//!    directory, under the original's file name.
//!
//! Images are handled one at a time. A failure on one image is logged,
//! reported as [`ProcessEvent::ImageFailed`], counted, and the run moves on
//! to the next image.
//!
//! ## Output Structure
//!
//! ```text
//! photos/
//! ├── a.jpg                 # Rotated and/or corrected in place
//! ├── b.png
//! └── thumb/
//!     ├── a.jpg             # floor(width * scale) x floor(height * scale)
//!     └── b.png
//! ```

use crate::config::RunConfig;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, RustBackend, auto_levels, rotate_to_portrait,
    scaled_thumbnail, white_patch_balance,
};
use crate::naming;
use crate::policy::{ImagePlan, ImageStatus, ThumbnailPolicy, plan_image};
use crate::scan::{self, ScanError};
use serde::Serialize;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Classify only; nothing is decoded or written.
    pub dry_run: bool,
}

/// A correction applied to an original's pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Correction {
    Rotated { from: Dimensions, to: Dimensions },
    WhiteBalance,
    AutoLevels,
}

/// Progress events emitted while processing.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    Started {
        image_count: usize,
    },
    /// Image classified and left alone (status `ok`, or a dry run).
    ImageChecked {
        index: usize,
        filename: String,
        original: Dimensions,
        status: ImageStatus,
    },
    /// Thumbnail written, original possibly rewritten.
    ImageProcessed {
        index: usize,
        filename: String,
        status: ImageStatus,
        corrections: Vec<Correction>,
        /// Size of the original after corrections.
        original: Dimensions,
        thumbnail: Dimensions,
    },
    ImageFailed {
        index: usize,
        filename: String,
        reason: String,
    },
}

/// Outcome for one original.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRecord {
    pub filename: String,
    #[serde(flatten)]
    pub status: ImageStatus,
    /// Original size as found on disk, before any rotation.
    pub original: Dimensions,
    /// Thumbnail written during this run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Dimensions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub corrections: Vec<Correction>,
}

/// Run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    /// Originals that could be classified.
    pub processed: usize,
    pub rotated: usize,
    /// New images (white balance and levels applied).
    pub created: usize,
    /// Existing thumbnails regenerated because of their size.
    pub fixed: usize,
    pub failed: usize,
}

impl ProcessSummary {
    /// Images that needed nothing. Never negative.
    pub fn already_correct(&self) -> usize {
        self.processed
            .saturating_sub(self.created)
            .saturating_sub(self.fixed)
            .saturating_sub(self.rotated)
    }

    fn count(&mut self, status: &ImageStatus) {
        self.processed += 1;
        match status {
            ImageStatus::Rotated { .. } => self.rotated += 1,
            ImageStatus::New => self.created += 1,
            ImageStatus::WrongSize { .. } => self.fixed += 1,
            ImageStatus::Ok { .. } => {}
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessReport {
    pub summary: ProcessSummary,
    pub images: Vec<ImageRecord>,
}

/// Process every original in the run's photos directory with the
/// production backend.
pub fn process(
    run: &RunConfig,
    options: ProcessOptions,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ProcessReport, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(&backend, run, options, progress)
}

/// Process images using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    run: &RunConfig,
    options: ProcessOptions,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ProcessReport, ProcessError> {
    let originals = scan::list_originals(&run.photos_dir)?;
    if !options.dry_run {
        std::fs::create_dir_all(&run.thumb_dir)?;
    }
    info!(
        photos = %run.photos_dir.display(),
        thumbs = %run.thumb_dir.display(),
        count = originals.len(),
        dry_run = options.dry_run,
        "processing originals"
    );

    let emit = |event: ProcessEvent| {
        if let Some(tx) = &progress {
            tx.send(event).ok();
        }
    };
    emit(ProcessEvent::Started {
        image_count: originals.len(),
    });

    let policy = ThumbnailPolicy::from_config(&run.settings);
    let mut report = ProcessReport::default();

    for (i, original_path) in originals.iter().enumerate() {
        let index = i + 1;
        let filename = naming::file_name(original_path);
        let thumb_path = naming::thumbnail_path(&run.thumb_dir, original_path);

        let plan = match plan_image(backend, &policy, original_path, &thumb_path) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(file = %filename, error = %e, "skipping unreadable original");
                report.summary.failed += 1;
                emit(ProcessEvent::ImageFailed {
                    index,
                    filename,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        report.summary.count(&plan.status);
        debug!(file = %filename, status = plan.status.label(), original = %plan.original, "classified");

        if options.dry_run || !plan.status.needs_thumbnail() {
            emit(ProcessEvent::ImageChecked {
                index,
                filename: filename.clone(),
                original: plan.original,
                status: plan.status,
            });
            report.images.push(ImageRecord {
                filename,
                status: plan.status,
                original: plan.original,
                thumbnail: None,
                corrections: Vec::new(),
            });
            continue;
        }

        match apply_plan(backend, run, &policy, &plan, original_path, &thumb_path) {
            Ok(applied) => {
                emit(ProcessEvent::ImageProcessed {
                    index,
                    filename: filename.clone(),
                    status: plan.status,
                    corrections: applied.corrections.clone(),
                    original: applied.original,
                    thumbnail: applied.thumbnail,
                });
                report.images.push(ImageRecord {
                    filename,
                    status: plan.status,
                    original: plan.original,
                    thumbnail: Some(applied.thumbnail),
                    corrections: applied.corrections,
                });
            }
            Err(e) => {
                warn!(file = %filename, error = %e, "failed to process image");
                report.summary.failed += 1;
                emit(ProcessEvent::ImageFailed {
                    index,
                    filename,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        processed = report.summary.processed,
        rotated = report.summary.rotated,
        created = report.summary.created,
        fixed = report.summary.fixed,
        failed = report.summary.failed,
        "processing finished"
    );
    Ok(report)
}

struct Applied {
    corrections: Vec<Correction>,
    original: Dimensions,
    thumbnail: Dimensions,
}

fn apply_plan(
    backend: &impl ImageBackend,
    run: &RunConfig,
    policy: &ThumbnailPolicy,
    plan: &ImagePlan,
    original_path: &Path,
    thumb_path: &Path,
) -> Result<Applied, ProcessError> {
    let mut image = backend.load(original_path)?;
    let mut corrections = Vec::new();

    if plan.status.rotates() {
        let from = Dimensions::new(image.width(), image.height());
        image = rotate_to_portrait(&image);
        let to = Dimensions::new(image.width(), image.height());
        debug!(%from, %to, "rotated to portrait");
        corrections.push(Correction::Rotated { from, to });
    }

    if plan.status.applies_color_correction() {
        image = white_patch_balance(image);
        corrections.push(Correction::WhiteBalance);
        image = auto_levels(image);
        corrections.push(Correction::AutoLevels);
    }

    if !corrections.is_empty() {
        backend.save(&image, original_path, run.settings.originals.quality())?;
        debug!(path = %original_path.display(), "original overwritten");
    }

    let thumbnail = scaled_thumbnail(&image, policy.scale);
    backend.save(&thumbnail, thumb_path, run.settings.thumbnails.quality())?;

    Ok(Applied {
        corrections,
        original: Dimensions::new(image.width(), image.height()),
        thumbnail: Dimensions::new(thumbnail.width(), thumbnail.height()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizeConfig;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Photos directory with empty placeholder files; the mock serves sizes.
    fn setup(files: &[&str]) -> (TempDir, RunConfig) {
        let tmp = TempDir::new().unwrap();
        for name in files {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        let mut settings = NormalizeConfig::default();
        // small capture width keeps the mock rasters small
        settings.rotation.landscape_width = 400;
        let run = RunConfig::new(tmp.path(), None, settings);
        (tmp, run)
    }

    fn path_str(p: PathBuf) -> String {
        p.to_string_lossy().to_string()
    }

    fn save_paths(backend: &MockBackend) -> Vec<String> {
        backend
            .saves()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Save { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Register an existing thumbnail (mock size plus a file on disk).
    fn existing_thumb(backend: &MockBackend, run: &RunConfig, name: &str, dims: Dimensions) {
        fs::create_dir_all(&run.thumb_dir).unwrap();
        let path = run.thumb_dir.join(name);
        fs::write(&path, b"").unwrap();
        backend.register(path, dims);
    }

    #[test]
    fn new_image_is_corrected_and_thumbnailed() {
        let (_tmp, run) = setup(&["a.jpg"]);
        let original = run.photos_dir.join("a.jpg");
        let backend = MockBackend::with_dimensions([(original.clone(), Dimensions::new(1000, 2000))]);

        let report = process_with_backend(&backend, &run, ProcessOptions::default(), None).unwrap();

        assert_eq!(report.summary.created, 1);
        assert_eq!(report.summary.already_correct(), 0);
        let record = &report.images[0];
        assert_eq!(record.status, ImageStatus::New);
        assert_eq!(record.thumbnail, Some(Dimensions::new(200, 400)));
        assert_eq!(
            record.corrections,
            vec![Correction::WhiteBalance, Correction::AutoLevels]
        );

        // original rewritten first at originals quality, then the thumbnail
        assert_eq!(
            backend.saves(),
            vec![
                RecordedOp::Save {
                    path: path_str(original),
                    width: 1000,
                    height: 2000,
                    quality: 95,
                },
                RecordedOp::Save {
                    path: path_str(run.thumb_dir.join("a.jpg")),
                    width: 200,
                    height: 400,
                    quality: 85,
                },
            ]
        );
        assert!(run.thumb_dir.is_dir());
    }

    #[test]
    fn capture_landscape_is_rotated_before_thumbnailing() {
        let (_tmp, run) = setup(&["wide.jpg"]);
        let original = run.photos_dir.join("wide.jpg");
        let backend = MockBackend::with_dimensions([(original.clone(), Dimensions::new(400, 300))]);
        existing_thumb(&backend, &run, "wide.jpg", Dimensions::new(80, 60));

        let report = process_with_backend(&backend, &run, ProcessOptions::default(), None).unwrap();

        assert_eq!(report.summary.rotated, 1);
        assert_eq!(report.summary.created, 0);
        let record = &report.images[0];
        // thumbnail existed, so no color correction
        assert_eq!(
            record.corrections,
            vec![Correction::Rotated {
                from: Dimensions::new(400, 300),
                to: Dimensions::new(300, 400),
            }]
        );
        assert_eq!(record.thumbnail, Some(Dimensions::new(60, 80)));
        assert!(backend.saves().contains(&RecordedOp::Save {
            path: path_str(original),
            width: 300,
            height: 400,
            quality: 95,
        }));
    }

    #[test]
    fn new_capture_landscape_gets_every_correction() {
        let (_tmp, run) = setup(&["wide.jpg"]);
        let backend =
            MockBackend::with_dimensions([(run.photos_dir.join("wide.jpg"), Dimensions::new(400, 300))]);

        let report = process_with_backend(&backend, &run, ProcessOptions::default(), None).unwrap();
        assert_eq!(report.images[0].status, ImageStatus::Rotated { is_new: true });
        assert_eq!(report.images[0].corrections.len(), 3);
        assert_eq!(report.summary.rotated, 1);
        assert_eq!(report.summary.created, 0);
    }

    #[test]
    fn wrong_size_thumbnail_regenerated_without_touching_original() {
        let (_tmp, run) = setup(&["a.png"]);
        let backend =
            MockBackend::with_dimensions([(run.photos_dir.join("a.png"), Dimensions::new(1000, 2000))]);
        existing_thumb(&backend, &run, "a.png", Dimensions::new(100, 200));

        let report = process_with_backend(&backend, &run, ProcessOptions::default(), None).unwrap();

        assert_eq!(report.summary.fixed, 1);
        assert!(report.images[0].corrections.is_empty());
        assert_eq!(save_paths(&backend), vec![path_str(run.thumb_dir.join("a.png"))]);
    }

    #[test]
    fn current_thumbnail_is_left_alone() {
        let (_tmp, run) = setup(&["a.jpg"]);
        let backend =
            MockBackend::with_dimensions([(run.photos_dir.join("a.jpg"), Dimensions::new(1000, 2000))]);
        existing_thumb(&backend, &run, "a.jpg", Dimensions::new(201, 399));

        let report = process_with_backend(&backend, &run, ProcessOptions::default(), None).unwrap();

        assert_eq!(report.summary.processed, 1);
        assert_eq!(report.summary.already_correct(), 1);
        assert!(backend.saves().is_empty());
        assert!(
            !backend
                .get_operations()
                .iter()
                .any(|op| matches!(op, RecordedOp::Load(_)))
        );
    }

    #[test]
    fn second_run_finds_everything_current() {
        let (_tmp, run) = setup(&["a.jpg", "b.jpg"]);
        let backend = MockBackend::with_dimensions([
            (run.photos_dir.join("a.jpg"), Dimensions::new(1000, 2000)),
            (run.photos_dir.join("b.jpg"), Dimensions::new(400, 300)),
        ]);

        process_with_backend(&backend, &run, ProcessOptions::default(), None).unwrap();
        // mock saves register sizes but do not create files
        for name in ["a.jpg", "b.jpg"] {
            fs::write(run.thumb_dir.join(name), b"").unwrap();
        }
        let second = process_with_backend(&backend, &run, ProcessOptions::default(), None).unwrap();

        assert_eq!(second.summary.processed, 2);
        assert_eq!(second.summary.already_correct(), 2);
        assert!(second.images.iter().all(|r| r.corrections.is_empty()));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let (_tmp, run) = setup(&["a.jpg", "b.jpg"]);
        let backend = MockBackend::with_dimensions([
            (run.photos_dir.join("a.jpg"), Dimensions::new(1000, 2000)),
            (run.photos_dir.join("b.jpg"), Dimensions::new(400, 300)),
        ]);

        let report =
            process_with_backend(&backend, &run, ProcessOptions { dry_run: true }, None).unwrap();

        assert_eq!(report.summary.created, 1);
        assert_eq!(report.summary.rotated, 1);
        assert!(backend.saves().is_empty());
        assert!(!run.thumb_dir.exists());
    }

    #[test]
    fn unreadable_original_is_counted_and_skipped() {
        let (_tmp, run) = setup(&["a.jpg", "broken.jpg", "c.jpg"]);
        let backend = MockBackend::with_dimensions([
            (run.photos_dir.join("a.jpg"), Dimensions::new(100, 200)),
            (run.photos_dir.join("c.jpg"), Dimensions::new(100, 200)),
        ]);

        let (tx, rx) = std::sync::mpsc::channel();
        let report = process_with_backend(&backend, &run, ProcessOptions::default(), Some(tx)).unwrap();
        let events: Vec<ProcessEvent> = rx.into_iter().collect();

        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.processed, 2);
        assert_eq!(report.images.len(), 2);
        assert!(events.iter().any(|e| matches!(
            e,
            ProcessEvent::ImageFailed { index: 2, filename, .. } if filename == "broken.jpg"
        )));
    }

    #[test]
    fn events_follow_listing_order() {
        let (_tmp, run) = setup(&["b.jpg", "a.jpg"]);
        let backend = MockBackend::with_dimensions([
            (run.photos_dir.join("a.jpg"), Dimensions::new(100, 200)),
            (run.photos_dir.join("b.jpg"), Dimensions::new(100, 200)),
        ]);

        let (tx, rx) = std::sync::mpsc::channel();
        process_with_backend(&backend, &run, ProcessOptions::default(), Some(tx)).unwrap();
        let events: Vec<ProcessEvent> = rx.into_iter().collect();

        assert!(matches!(events[0], ProcessEvent::Started { image_count: 2 }));
        let processed: Vec<(usize, &str)> = events
            .iter()
            .filter_map(|e| match e {
                ProcessEvent::ImageProcessed {
                    index, filename, ..
                } => Some((*index, filename.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(processed, vec![(1, "a.jpg"), (2, "b.jpg")]);
    }

    #[test]
    fn missing_photos_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let run = RunConfig::new(tmp.path().join("nope"), None, NormalizeConfig::default());
        let result = process_with_backend(&MockBackend::new(), &run, ProcessOptions::default(), None);
        assert!(matches!(result, Err(ProcessError::Scan(ScanError::NotFound(_)))));
    }

    // =========================================================================
    // Summary
    // =========================================================================

    #[test]
    fn already_correct_saturates() {
        let summary = ProcessSummary {
            processed: 1,
            rotated: 1,
            created: 1,
            fixed: 1,
            failed: 0,
        };
        assert_eq!(summary.already_correct(), 0);
    }

    #[test]
    fn report_serializes_status_inline() {
        let record = ImageRecord {
            filename: "a.jpg".into(),
            status: ImageStatus::New,
            original: Dimensions::new(10, 20),
            thumbnail: Some(Dimensions::new(2, 4)),
            corrections: vec![Correction::WhiteBalance],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "new");
        assert_eq!(json["thumbnail"]["width"], 2);
        assert_eq!(json["corrections"][0]["kind"], "white-balance");
    }

    // =========================================================================
    // Real backend
    // =========================================================================

    #[test]
    fn new_png_original_is_overwritten_with_corrected_pixels() {
        use crate::test_helpers::*;
        let (_tmp, run) = photos_dir();
        let original = write_photo(&run, "dull.png", &dull_gradient(40, 60));
        let before = RustBackend::new().load(&original).unwrap();
        assert_ne!(channel_extremes(&before)[0], (0, 255));

        let report = process(&run, ProcessOptions::default(), None).unwrap();
        assert_eq!(report.summary.created, 1);

        let after = RustBackend::new().load(&original).unwrap();
        assert_eq!(after.dimensions(), (40, 60));
        assert_eq!(channel_extremes(&after), [(0, 255); 3]);

        let thumb = RustBackend::new()
            .identify(&run.thumb_dir.join("dull.png"))
            .unwrap();
        assert_eq!(thumb, Dimensions::new(8, 12));
    }

    #[test]
    fn capture_landscape_png_is_rotated_clockwise_on_disk() {
        use crate::test_helpers::*;
        let (_tmp, mut run) = photos_dir();
        run.settings.rotation.landscape_width = 50;
        let original = write_photo(&run, "wide.png", &marked_corner(50, 30));

        process(&run, ProcessOptions::default(), None).unwrap();

        let after = RustBackend::new().load(&original).unwrap();
        assert_eq!(after.dimensions(), (30, 50));
        assert_eq!(after.get_pixel(29, 0).0, [255, 0, 0]);
        assert_eq!(after.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(
            RustBackend::new()
                .identify(&run.thumb_dir.join("wide.png"))
                .unwrap(),
            Dimensions::new(6, 10)
        );
    }
}
