use serde::{Deserialize, Serialize};

use crate::image::GrayImageView;

/// Summary statistics of one grayscale frame, all 8-bit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ImageStatistics {
    pub mean: u8,
    pub std_dev: u8,
    /// `max - min`.
    pub contrast: u8,
    pub min: u8,
    pub max: u8,
}

/// Single-pass mean / standard deviation / contrast / min / max.
///
/// Accumulates the intensity sum and sum of squares in `u64` (a 65536-pixel
/// frame of 255s stays far below either limit) alongside a running min/max.
/// Mean and variance use truncating integer division; the variance is
/// floored at zero so truncation can never push `E[x²] − mean²` negative.
pub fn compute_statistics(image: &GrayImageView<'_>) -> ImageStatistics {
    let mut sum = 0u64;
    let mut sum_sq = 0u64;
    let mut min = 255u8;
    let mut max = 0u8;

    for &px in image.data() {
        sum += u64::from(px);
        sum_sq += u64::from(px) * u64::from(px);
        if px < min {
            min = px;
        }
        if px > max {
            max = px;
        }
    }

    // Nonzero by GrayImageView construction.
    let n = image.geometry().pixel_count() as u64;
    let mean = (sum / n) as u8;

    let mean_sq = u64::from(mean) * u64::from(mean);
    let variance = (sum_sq / n).saturating_sub(mean_sq);

    ImageStatistics {
        mean,
        std_dev: isqrt(variance).min(255) as u8,
        contrast: max - min,
        min,
        max,
    }
}

/// Integer square root by Newton's method.
///
/// Seeded at the value itself, which always sits at or above the true root,
/// so the iteration decreases monotonically; it stops at the first
/// non-decreasing step. 16 rounds cover the full 8-bit variance range.
fn isqrt(value: u64) -> u64 {
    if value == 0 {
        return 0;
    }
    let mut s = value;
    for _ in 0..16 {
        let next = (s + value / s) / 2;
        if next >= s {
            break;
        }
        s = next;
    }
    s
}
