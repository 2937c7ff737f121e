//! Image processing: pure pixel math plus a swappable codec backend.
//!
//! | Component | Module | Entry point |
//! |---|---|---|
//! | Size histogram | [`histogram`] | [`canonical_canvas`] |
//! | Orientation policy | [`calculations`] | [`needs_rotation`] |
//! | White-patch balance | [`correction`] | [`white_patch_balance`] |
//! | Auto levels | [`correction`] | [`auto_levels`] |
//! | Thumbnail math | [`calculations`] | [`expected_thumb_size`], [`is_thumbnail_current`] |
//! | Canvas compositor | [`compositor`] | [`center_on_canvas`] |
//!
//! The module is split into:
//! - **Calculations / histogram**: pure functions over [`Dimensions`] (no pixels, no I/O)
//! - **Correction / compositor**: pure functions over in-memory rasters
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] (decode, identify, encode)
//! - **Operations**: higher-level pixel operations the workflows call

pub mod backend;
pub mod calculations;
pub mod compositor;
pub mod correction;
pub mod histogram;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    center_offset, expected_thumb_size, fit_within, is_thumbnail_current, needs_rotation,
};
pub use compositor::{Composite, CompositeError, OversizePolicy, center_on_canvas};
pub use correction::{auto_levels, white_patch_balance};
pub use histogram::{SizeTally, canonical_canvas};
pub use operations::{bounded_thumbnail, rotate_to_portrait, scaled_thumbnail};
pub use params::{Quality, ScaleFactor, Tolerance};
pub use rust_backend::RustBackend;
