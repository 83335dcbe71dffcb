//! Core types for the adaptive Otsu segmentation pipeline.
//!
//! This crate is intentionally small and integer-only. It holds the image
//! model (fixed geometry, borrowed grayscale views, owned binary masks),
//! the single-pass statistics engine and the adaptive mode selector that
//! every segmentation engine shares. It does *not* depend on the pipeline
//! crate, so alternative engines can be built against the same contract.

mod geometry;
mod image;
mod logger;
mod mode;
mod stats;

pub use geometry::ImageGeometry;
pub use image::{BinaryMask, GrayImage, GrayImageView, ImageError};
pub use mode::{
    select_mode, ProcessingMode, FAST_CONTRAST_MIN, FAST_STD_DEV_MIN, NORMAL_CONTRAST_MIN,
    NORMAL_STD_DEV_MIN,
};
pub use stats::{compute_statistics, ImageStatistics};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
