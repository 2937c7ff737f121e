//! # Photo Normalize
//!
//! Keeps a folder of photographs consistent: every original ends up
//! portrait, color-corrected once, and paired with a thumbnail at a fixed
//! fraction of its size. Outliers can be placed on the folder's common
//! canvas size.
//!
//! # Workflows
//!
//! ```text
//! thumbnails   photos/*.jpg  →  rotate → white balance → auto levels  →  photos/thumb/*.jpg
//! center       photos/       →  canonical canvas → centered copy      →  photos/<stem>_centered.jpg
//! ```
//!
//! Both workflows re-derive everything from the files on disk on every run.
//! There is no state file: a thumbnail of the right size *is* the record
//! that an original has been processed, which keeps repeated runs from
//! correcting the same pixels twice.
//!
//! Corrections are **destructive**. A rotated or color-corrected original
//! is written back over its source file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Pixel math (histogram, orientation, white balance, levels, compositing) and the codec backend |
//! | [`policy`] | Per-image classification: new, rotated, wrong-size or ok |
//! | [`scan`] | Listing originals and tallying reference sizes |
//! | [`process`] | The thumbnail workflow with progress events and a run summary |
//! | [`center`] | The centering workflow |
//! | [`naming`] | Output file names |
//! | [`config`] | `config.toml` loading, validation and the stock config |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Header Reads Before Pixels
//!
//! Classification only needs dimensions, which the backend reads from the
//! file header. Images whose thumbnail is current are never decoded, so a
//! re-run over a large folder costs one header read per file.
//!
//! ## Deterministic Canvas
//!
//! When two sizes are equally common, the one seen first wins. Reference
//! images are always tallied in file-name order, so the canvas does not
//! depend on the order the filesystem happens to return entries in.
//!
//! ## Truncating Sample Conversion
//!
//! White balance and auto levels compute in `f64` and truncate back to
//! 8-bit after clipping. The brightest sample of a channel lands on exactly
//! 255 because the remap multiplies before it divides.

pub mod center;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod policy;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
