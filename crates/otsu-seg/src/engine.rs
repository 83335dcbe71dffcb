use log::debug;
use serde::{Deserialize, Serialize};

use otsu_seg_core::{
    compute_statistics, select_mode, BinaryMask, GrayImageView, ImageGeometry, ImageStatistics,
    ProcessingMode,
};

use crate::fallback::{overselects, strict_threshold};
use crate::histogram::Histogram;
use crate::morphology::{close, close_with_scratch, open, open_with_scratch};
use crate::otsu::otsu_threshold;
use crate::threshold::{apply_threshold, count_above};

/// Errors returned by the segmentation engines. The pipeline itself is
/// total; these only flag buffers that do not belong together.
#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum SegmentError {
    #[error("image is {got} but the engine was built for {expected}")]
    ImageGeometry {
        expected: ImageGeometry,
        got: ImageGeometry,
    },
    #[error("mask is {got} but the image is {expected}")]
    MaskGeometry {
        expected: ImageGeometry,
        got: ImageGeometry,
    },
}

/// Outcome record of one segmentation run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// Threshold actually applied: the fallback value when Careful mode
    /// overrode the raw Otsu result.
    pub threshold: u8,
    /// Foreground pixels in the final, post-morphology mask.
    pub foreground_pixels: u32,
    /// Mode that was executed.
    pub mode_used: ProcessingMode,
}

/// Statistics, selected mode and segmentation outcome of one
/// [`Segmenter::segment_auto`] call.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AutoSegmentation {
    pub statistics: ImageStatistics,
    pub result: ThresholdResult,
}

/// One conforming implementation of the segmentation pipeline.
///
/// The contract is deterministic: any two implementations must produce
/// bit-identical masks and [`ThresholdResult`]s for the same image and
/// mode. `tests/conformance.rs` holds the engines in this crate to it.
///
/// Per-mode staging is linear:
/// - `Fast`: histogram, Otsu, apply.
/// - `Normal`: the above, then one open.
/// - `Careful`: histogram, Otsu, fallback check, apply, then open and close.
pub trait Segmenter {
    /// Segment `image` with an explicit mode, writing into `mask`.
    fn segment_into(
        &mut self,
        image: &GrayImageView<'_>,
        mode: ProcessingMode,
        mask: &mut BinaryMask,
    ) -> Result<ThresholdResult, SegmentError>;

    /// Allocating convenience around [`Segmenter::segment_into`].
    fn segment(
        &mut self,
        image: &GrayImageView<'_>,
        mode: ProcessingMode,
    ) -> Result<(BinaryMask, ThresholdResult), SegmentError> {
        let mut mask = BinaryMask::new(image.geometry());
        let result = self.segment_into(image, mode, &mut mask)?;
        Ok((mask, result))
    }

    /// Compute frame statistics, select the mode, then segment.
    fn segment_auto(
        &mut self,
        image: &GrayImageView<'_>,
    ) -> Result<(BinaryMask, AutoSegmentation), SegmentError> {
        let statistics = compute_statistics(image);
        let mode = select_mode(&statistics);
        debug!(
            "auto mode {mode}: mean={} std_dev={} contrast={}",
            statistics.mean, statistics.std_dev, statistics.contrast
        );
        let (mask, result) = self.segment(image, mode)?;
        Ok((mask, AutoSegmentation { statistics, result }))
    }
}

/// Careful-mode threshold: raw Otsu unless it floods the frame, in which
/// case the statistics-derived strict threshold replaces it.
fn careful_threshold(image: &GrayImageView<'_>, raw: u8) -> u8 {
    let raw_foreground = count_above(image, raw);
    if !overselects(raw_foreground, image.geometry().pixel_count()) {
        return raw;
    }
    let stats = compute_statistics(image);
    let strict = strict_threshold(&stats);
    debug!(
        "fallback threshold {strict} replaces otsu {raw} \
         ({raw_foreground} raw foreground pixels)"
    );
    strict
}

/// Stage-by-stage engine with scratch preallocated for one fixed geometry.
///
/// Construction sizes the histogram and the morphology scratch once;
/// segmenting a frame performs no allocation, so per-frame cost is a fixed
/// number of bounded passes over the buffers.
pub struct PipelinedSegmenter {
    geometry: ImageGeometry,
    histogram: Histogram,
    scratch: Vec<u8>,
}

impl PipelinedSegmenter {
    pub fn new(geometry: ImageGeometry) -> Self {
        Self {
            geometry,
            histogram: Histogram::default(),
            scratch: vec![0; geometry.pixel_count()],
        }
    }

    /// Geometry the scratch buffers were sized for.
    #[inline]
    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }
}

impl Segmenter for PipelinedSegmenter {
    fn segment_into(
        &mut self,
        image: &GrayImageView<'_>,
        mode: ProcessingMode,
        mask: &mut BinaryMask,
    ) -> Result<ThresholdResult, SegmentError> {
        if image.geometry() != self.geometry {
            return Err(SegmentError::ImageGeometry {
                expected: self.geometry,
                got: image.geometry(),
            });
        }
        if mask.geometry() != image.geometry() {
            return Err(SegmentError::MaskGeometry {
                expected: image.geometry(),
                got: mask.geometry(),
            });
        }

        self.histogram.rebuild(image);
        let mut threshold = otsu_threshold(&self.histogram);

        if mode == ProcessingMode::Careful {
            threshold = careful_threshold(image, threshold);
        }

        apply_threshold(image, threshold, mask);

        if mode >= ProcessingMode::Normal {
            open_with_scratch(mask, &mut self.scratch);
        }
        if mode == ProcessingMode::Careful {
            close_with_scratch(mask, &mut self.scratch);
        }

        Ok(ThresholdResult {
            threshold,
            foreground_pixels: mask.foreground_pixels(),
            mode_used: mode,
        })
    }
}

/// Straight-line reference engine with operation-scoped buffers.
///
/// Works for any geometry and keeps its own histogram accumulation and
/// threshold sweep, so the conformance suite compares two genuine
/// implementations of the search. Statistics and morphology are shared on
/// purpose: the contract pins those to a single implementation each, which
/// is what keeps mode selection and the fallback identical across engines.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselineSegmenter;

impl Segmenter for BaselineSegmenter {
    fn segment_into(
        &mut self,
        image: &GrayImageView<'_>,
        mode: ProcessingMode,
        mask: &mut BinaryMask,
    ) -> Result<ThresholdResult, SegmentError> {
        if mask.geometry() != image.geometry() {
            return Err(SegmentError::MaskGeometry {
                expected: image.geometry(),
                got: mask.geometry(),
            });
        }

        let mut hist = [0u32; 256];
        for &px in image.data() {
            hist[px as usize] += 1;
        }

        let total = image.geometry().pixel_count() as u64;
        let sum_total: u64 = hist
            .iter()
            .enumerate()
            .map(|(i, &c)| i as u64 * u64::from(c))
            .sum();

        let mut weight_bg = 0u64;
        let mut sum_bg = 0u64;
        let mut max_var = 0u64;
        let mut threshold = 0u8;

        for (t, &count) in hist.iter().enumerate() {
            weight_bg += u64::from(count);
            if weight_bg == 0 {
                continue;
            }
            let weight_fg = total - weight_bg;
            if weight_fg == 0 {
                break;
            }

            sum_bg += t as u64 * u64::from(count);
            let mean_bg = sum_bg / weight_bg;
            let mean_fg = (sum_total - sum_bg) / weight_fg;
            let diff = mean_bg.abs_diff(mean_fg);
            let var_between = weight_bg * weight_fg * diff * diff;

            if var_between > max_var {
                max_var = var_between;
                threshold = t as u8;
            }
        }

        if mode == ProcessingMode::Careful {
            threshold = careful_threshold(image, threshold);
        }

        apply_threshold(image, threshold, mask);

        if mode >= ProcessingMode::Normal {
            open(mask);
        }
        if mode == ProcessingMode::Careful {
            close(mask);
        }

        Ok(ThresholdResult {
            threshold,
            foreground_pixels: mask.foreground_pixels(),
            mode_used: mode,
        })
    }
}
