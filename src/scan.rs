//! Directory scanning.
//!
//! Both workflows start from a flat photos directory:
//!
//! ```text
//! photos/
//! ├── config.toml           # Settings (optional)
//! ├── a.jpg                 # Originals, processed in filename order
//! ├── b.PNG
//! ├── b_centered.jpg        # Centered output (not a reference image)
//! ├── .DS_Store             # Dot-files are ignored
//! └── thumb/                # Thumbnails (subdirectories are never scanned)
//!     ├── a.jpg
//!     └── b.PNG
//! ```
//!
//! Only `.jpg`, `.jpeg` and `.png` files are considered, case-insensitively.

use crate::imaging::{ImageBackend, SizeTally};
use crate::naming;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Extensions (lowercase) of files treated as photos.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Photos directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Whether `path` has one of the [`IMAGE_EXTENSIONS`].
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Original photos directly inside `dir`, sorted by file name.
///
/// Subdirectories (including the thumbnail directory) and dot-files are
/// skipped. Symlinks are followed: a link to a photo is listed under the
/// link's name.
pub fn list_originals(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotFound(dir.to_path_buf()));
    }

    let mut originals = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.path().is_file() && !hidden && is_image(entry.path()) {
            originals.push(entry.into_path());
        }
    }
    Ok(originals)
}

/// Tally the sizes of every readable reference image in `dir`.
///
/// Centered outputs (`<stem><suffix>.jpg`) are left out so earlier runs do
/// not skew the canvas. Files whose header cannot be read are skipped
/// without being counted. Tally order follows the sorted listing, which
/// makes the histogram's first-seen tie-break deterministic.
pub fn collect_reference_sizes(
    backend: &impl ImageBackend,
    dir: &Path,
    suffix: &str,
) -> Result<SizeTally, ScanError> {
    let mut tally = SizeTally::new();
    for path in list_originals(dir)? {
        let name = naming::file_name(&path);
        if naming::is_centered_output(&name, suffix) {
            debug!(file = %name, "skipping centered output");
            continue;
        }
        match backend.identify(&path) {
            Ok(dims) => tally.record(dims),
            Err(e) => debug!(file = %name, error = %e, "skipping unreadable reference image"),
        }
    }
    Ok(tally)
}
