//! Output file naming.
//!
//! Two outputs are derived from an input file name:
//! - `photo.jpg` → `photo_centered.jpg` (centered image, always JPEG)
//! - `photo.png` → `<thumbs>/photo.png` (thumbnail, same name as the original)
//!
//! Centered outputs are excluded from the reference set used to pick the
//! canonical canvas, so [`is_centered_output`] must recognize exactly what
//! [`centered_filename`] produces.

use std::path::{Path, PathBuf};

/// Extension of every centered output.
pub const CENTERED_EXTENSION: &str = "jpg";

/// `<stem><suffix>.jpg` for `target`.
///
/// - `("IMG_01.png", "_centered")` → `"IMG_01_centered.jpg"`
/// - `("archive.tar.jpg", "_c")` → `"archive.tar_c.jpg"`
/// - `("noext", "_centered")` → `"noext_centered.jpg"`
pub fn centered_filename(target: &str, suffix: &str) -> String {
    let stem = Path::new(target)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(target);
    format!("{stem}{suffix}.{CENTERED_EXTENSION}")
}

/// Whether `filename` looks like something [`centered_filename`] wrote.
pub fn is_centered_output(filename: &str, suffix: &str) -> bool {
    let path = Path::new(filename);
    let is_jpg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CENTERED_EXTENSION));
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    is_jpg && stem.ends_with(suffix) && stem.len() > suffix.len()
}

/// Thumbnail location for an original: same file name inside `thumb_dir`.
pub fn thumbnail_path(thumb_dir: &Path, original: &Path) -> PathBuf {
    match original.file_name() {
        Some(name) => thumb_dir.join(name),
        None => thumb_dir.to_path_buf(),
    }
}

/// File name component as a string, for reporting.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
