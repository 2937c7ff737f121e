//! Per-channel color corrections applied to newly added photos.
//!
//! Both corrections are the same linear remap with different anchors:
//!
//! | Correction | Low anchor | High anchor | Degenerate case |
//! |---|---|---|---|
//! | [`white_patch_balance`] | `0` | channel max | max = 0 → channel untouched |
//! | [`auto_levels`] | channel min | channel max | min = max → channel untouched |
//!
//! Each sample `v` becomes `(v - low) * 255 / (high - low)`, computed in
//! `f64`, clipped to `[0, 255]` and truncated back to `u8`. Multiplying
//! before dividing keeps the high anchor at exactly 255. Channels are
//! handled independently; there is no shared luminance range.
//!
//! This is not the usual gain form `v * (255 / high)`. With a precomputed
//! gain the product can land just under an integer and truncate one step
//! lower: a uniform channel of 25 ends at 254, and `v = 21, max = 105`
//! gives 50 where this module gives 51. The two agree everywhere else.
//!
//! Apply [`white_patch_balance`] first and [`auto_levels`] second: levels
//! stretches the already balanced data.

use image::{DynamicImage, RgbImage};
use tracing::debug;

/// Per-channel `(min, max)` sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

/// Scan every pixel once and return the range of each RGB channel.
///
/// An image without pixels reports `min = 255, max = 0` per channel, which
/// both corrections treat as "leave alone".
pub fn channel_ranges(image: &RgbImage) -> [ChannelRange; 3] {
    let mut ranges = [ChannelRange { min: u8::MAX, max: u8::MIN }; 3];
    for pixel in image.pixels() {
        for (range, &sample) in ranges.iter_mut().zip(pixel.0.iter()) {
            range.min = range.min.min(sample);
            range.max = range.max.max(sample);
        }
    }
    ranges
}

/// Linear remap of one channel; `None` leaves the channel as is.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stretch {
    low: f64,
    span: f64,
}

impl Stretch {
    fn between(low: u8, high: u8) -> Option<Self> {
        (high > low).then(|| Self {
            low: f64::from(low),
            span: f64::from(high - low),
        })
    }

    fn apply(self, sample: u8) -> u8 {
        ((f64::from(sample) - self.low) * 255.0 / self.span).clamp(0.0, 255.0) as u8
    }
}

fn remap_channels(image: &mut RgbImage, stretches: [Option<Stretch>; 3]) {
    if stretches.iter().all(Option::is_none) {
        return;
    }
    for pixel in image.pixels_mut() {
        for (sample, stretch) in pixel.0.iter_mut().zip(stretches.iter()) {
            if let Some(stretch) = stretch {
                *sample = stretch.apply(*sample);
            }
        }
    }
}

/// White-patch auto white balance.
///
/// Assumes the brightest sample of each channel should read as pure white
/// and scales the channel by `255 / max`. A channel whose max is 0 is left
/// unscaled. Non-RGB input is converted to 8-bit RGB first.
pub fn white_patch_balance(image: impl Into<DynamicImage>) -> RgbImage {
    let mut rgb = image.into().into_rgb8();
    let ranges = channel_ranges(&rgb);
    let stretches = ranges.map(|r| Stretch::between(0, r.max));
    debug!(
        max_r = ranges[0].max,
        max_g = ranges[1].max,
        max_b = ranges[2].max,
        "white patch balance"
    );
    remap_channels(&mut rgb, stretches);
    rgb
}

/// Auto levels: stretch each channel's `[min, max]` to `[0, 255]`.
///
/// Flat channels (`min == max`) are left unmodified. Applying this twice
/// gives the same result as applying it once.
pub fn auto_levels(image: impl Into<DynamicImage>) -> RgbImage {
    let mut rgb = image.into().into_rgb8();
    let ranges = channel_ranges(&rgb);
    let stretches = ranges.map(|r| Stretch::between(r.min, r.max));
    debug!(
        r = ?(ranges[0].min, ranges[0].max),
        g = ?(ranges[1].min, ranges[1].max),
        b = ?(ranges[2].min, ranges[2].max),
        "auto levels"
    );
    remap_channels(&mut rgb, stretches);
    rgb
}
