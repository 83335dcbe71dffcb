use serde::{Deserialize, Serialize};

use crate::stats::ImageStatistics;

/// Quality/speed trade-off for one segmentation run, ordered by
/// thoroughness: `Fast < Normal < Careful`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessingMode {
    /// Threshold only, no morphology.
    Fast,
    /// Threshold plus one morphological open.
    Normal,
    /// Adaptive fallback threshold plus open and close.
    Careful,
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ProcessingMode::Fast => "FAST",
            ProcessingMode::Normal => "NORMAL",
            ProcessingMode::Careful => "CAREFUL",
        })
    }
}

/// Contrast floor for [`ProcessingMode::Fast`].
pub const FAST_CONTRAST_MIN: u8 = 150;
/// Standard-deviation floor for [`ProcessingMode::Fast`].
pub const FAST_STD_DEV_MIN: u8 = 50;
/// Contrast floor for [`ProcessingMode::Normal`].
pub const NORMAL_CONTRAST_MIN: u8 = 80;
/// Standard-deviation floor for [`ProcessingMode::Normal`].
pub const NORMAL_STD_DEV_MIN: u8 = 25;

/// Rule-based mode selection.
///
/// High-contrast, high-variance frames separate cleanly and get the cheap
/// path; flat frames get the full cleanup. Every caller (automatic or with
/// its own statistics implementation) must go through this function, so the
/// constants cannot drift between paths.
pub fn select_mode(stats: &ImageStatistics) -> ProcessingMode {
    if stats.contrast >= FAST_CONTRAST_MIN && stats.std_dev >= FAST_STD_DEV_MIN {
        return ProcessingMode::Fast;
    }
    if stats.contrast >= NORMAL_CONTRAST_MIN && stats.std_dev >= NORMAL_STD_DEV_MIN {
        return ProcessingMode::Normal;
    }
    ProcessingMode::Careful
}
