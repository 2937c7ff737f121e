//! Size histogram over a reference set of images.
//!
//! The canonical canvas of a folder is its most common image size, turned
//! portrait. Counting happens in a [`SizeTally`]; ties between equally
//! common sizes go to the size that was recorded first, so callers that
//! feed sizes in a stable order (the scanner sorts by filename) get a
//! deterministic answer.

use super::backend::Dimensions;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: usize,
    first_seen: usize,
}

/// Occurrence count per distinct [`Dimensions`].
#[derive(Debug, Default, Clone)]
pub struct SizeTally {
    tallies: HashMap<Dimensions, Tally>,
    recorded: usize,
}

impl SizeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more image of size `dim`.
    pub fn record(&mut self, dim: Dimensions) {
        let order = self.recorded;
        self.tallies
            .entry(dim)
            .or_insert(Tally {
                count: 0,
                first_seen: order,
            })
            .count += 1;
        self.recorded += 1;
    }

    /// Number of times `dim` was recorded.
    pub fn count(&self, dim: Dimensions) -> usize {
        self.tallies.get(&dim).map_or(0, |t| t.count)
    }

    /// Total number of recorded images.
    pub fn total(&self) -> usize {
        self.recorded
    }

    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    /// Most frequent size; ties go to the earliest recorded.
    pub fn mode(&self) -> Option<Dimensions> {
        self.tallies
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.count
                    .cmp(&b.count)
                    .then_with(|| b.first_seen.cmp(&a.first_seen))
            })
            .map(|(dim, _)| *dim)
    }

    /// The mode, normalized to portrait. `None` when nothing was recorded.
    pub fn canonical_canvas(&self) -> Option<Dimensions> {
        self.mode().map(Dimensions::to_portrait)
    }
}

impl FromIterator<Dimensions> for SizeTally {
    fn from_iter<I: IntoIterator<Item = Dimensions>>(iter: I) -> Self {
        let mut tally = Self::new();
        for dim in iter {
            tally.record(dim);
        }
        tally
    }
}

impl Extend<Dimensions> for SizeTally {
    fn extend<I: IntoIterator<Item = Dimensions>>(&mut self, iter: I) {
        for dim in iter {
            self.record(dim);
        }
    }
}

/// Canonical canvas for a sequence of image sizes.
///
/// Returns `None` for an empty sequence.
///
/// ```
/// # use photo_normalize::imaging::{Dimensions, canonical_canvas};
/// let sizes = [
///     Dimensions::new(800, 600),
///     Dimensions::new(800, 600),
///     Dimensions::new(600, 800),
/// ];
/// assert_eq!(canonical_canvas(sizes), Some(Dimensions::new(600, 800)));
/// ```
pub fn canonical_canvas<I: IntoIterator<Item = Dimensions>>(sizes: I) -> Option<Dimensions> {
    sizes.into_iter().collect::<SizeTally>().canonical_canvas()
}
