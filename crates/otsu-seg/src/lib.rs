//! Integer-only adaptive Otsu segmentation.
//!
//! Turns a fixed-geometry grayscale frame into a binary foreground mask and
//! a list of connected regions. The whole pipeline is integer arithmetic
//! over preallocated buffers, so the same inputs produce bit-identical
//! outputs on any target.
//!
//! Stages:
//! 1. [`Histogram::build`]: 256-bin intensity histogram
//! 2. [`otsu_threshold`]: threshold maximising inter-class variance
//! 3. [`apply_threshold`]: binarise (strict `>`, ties are background)
//! 4. [`open`] / [`close`]: optional 3×3 morphological cleanup
//! 5. [`label_regions`]: 4-connected components with per-region statistics
//!
//! The [`ProcessingMode`]s trade thoroughness for cost: `Fast` thresholds
//! only, `Normal` adds one open, `Careful` adds an adaptive fallback
//! threshold plus open and close. [`select_mode`] picks a mode from frame
//! statistics; callers may also force one.
//!
//! Two engines implement the same [`Segmenter`] contract,
//! [`PipelinedSegmenter`] (preallocated scratch, no per-frame allocation)
//! and [`BaselineSegmenter`] (straight-line reference), and are held to
//! bit-identical outputs by the conformance suite.
//!
//! ## Quickstart
//!
//! ```
//! use otsu_seg::{label_regions, PipelinedSegmenter, RegionParams, Segmenter};
//! use otsu_seg::{GrayImageView, ImageGeometry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let geometry = ImageGeometry::new(64, 64);
//! let mut pixels = vec![30u8; geometry.pixel_count()];
//! pixels[geometry.index(32, 32)] = 220;
//!
//! let image = GrayImageView::new(geometry, &pixels)?;
//! let mut engine = PipelinedSegmenter::new(geometry);
//! let (mask, auto) = engine.segment_auto(&image)?;
//!
//! let analysis = label_regions(&mask, &RegionParams::default());
//! println!(
//!     "mode {}: {} regions",
//!     auto.result.mode_used,
//!     analysis.regions.len()
//! );
//! # Ok(())
//! # }
//! ```

pub use otsu_seg_core as core;

mod engine;
mod fallback;
mod histogram;
mod morphology;
mod otsu;
mod regions;
mod threshold;

pub use engine::{
    AutoSegmentation, BaselineSegmenter, PipelinedSegmenter, SegmentError, Segmenter,
    ThresholdResult,
};
pub use fallback::{overselects, strict_threshold, FALLBACK_FOREGROUND_DIVISOR};
pub use histogram::{Histogram, NUM_BINS};
pub use morphology::{close, close_with_scratch, dilate_3x3, erode_3x3, open, open_with_scratch};
pub use otsu::otsu_threshold;
pub use regions::{label_regions, Region, RegionAnalysis, RegionParams};
pub use threshold::{apply_threshold, count_above, BACKGROUND, FOREGROUND};

pub use otsu_seg_core::{
    compute_statistics, select_mode, BinaryMask, GrayImage, GrayImageView, ImageError,
    ImageGeometry, ImageStatistics, ProcessingMode,
};
