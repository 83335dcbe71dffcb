//! Connected-component labeling of a binary mask.
//!
//! Scans in row-major order and flood-fills each unlabeled foreground
//! pixel over its 4-connected neighbours with a FIFO queue preallocated to
//! the pixel count, so even a component spanning the whole frame never
//! grows the queue.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use otsu_seg_core::{BinaryMask, ImageGeometry};

/// Labeling limits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RegionParams {
    /// Hard cap on distinct labels. Components encountered after the cap
    /// stay unlabeled. Labels live in one byte per map cell, so the cap
    /// cannot exceed 255.
    pub max_regions: u8,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self { max_regions: 16 }
    }
}

/// One connected component of the foreground.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Label written into the map for this component, starting at 1.
    pub label: u8,
    /// Foreground pixels in the component.
    pub area: u32,
    /// Centre of mass, truncated to pixel coordinates.
    pub centroid_x: u16,
    pub centroid_y: u16,
    /// Axis-aligned bounding box, inclusive on both corners.
    pub bbox_x0: u16,
    pub bbox_y0: u16,
    pub bbox_x1: u16,
    pub bbox_y1: u16,
}

impl Region {
    /// Whether `(x, y)` lies inside the bounding box.
    pub fn bbox_contains(&self, x: u16, y: u16) -> bool {
        (self.bbox_x0..=self.bbox_x1).contains(&x) && (self.bbox_y0..=self.bbox_y1).contains(&y)
    }
}

/// Output of [`label_regions`].
#[derive(Clone, Debug)]
pub struct RegionAnalysis {
    /// Per-pixel labels, row-major; 0 is background or post-cap foreground.
    pub label_map: Vec<u8>,
    pub regions: Vec<Region>,
    /// Foreground pixels belonging to labeled regions. Under-counts the
    /// mask's true foreground exactly when `truncated` is set.
    pub total_foreground: u32,
    /// Set when the label cap stopped new regions from being created.
    pub truncated: bool,
}

impl RegionAnalysis {
    /// Emit a per-region summary at debug level.
    pub fn log_summary(&self) {
        debug!(
            "{} regions, {} labeled foreground pixels{}",
            self.regions.len(),
            self.total_foreground,
            if self.truncated { " (truncated)" } else { "" }
        );
        for r in &self.regions {
            debug!(
                "region {}: area={} centroid=({}, {}) bbox=({}, {})..({}, {})",
                r.label,
                r.area,
                r.centroid_x,
                r.centroid_y,
                r.bbox_x0,
                r.bbox_y0,
                r.bbox_x1,
                r.bbox_y1
            );
        }
    }
}

/// Label the 4-connected components of `mask`.
///
/// New labels stop at `params.max_regions`; the scan is abandoned at the
/// first component that would exceed the cap, leaving that foreground
/// unlabeled and `truncated` set. This mirrors the capacity behaviour of
/// fixed region tables: a bounded result, not an error.
pub fn label_regions(mask: &BinaryMask, params: &RegionParams) -> RegionAnalysis {
    let geometry = mask.geometry();
    let pixels = geometry.pixel_count();
    let data = mask.data();

    let mut label_map = vec![0u8; pixels];
    let mut regions: Vec<Region> = Vec::with_capacity(params.max_regions as usize);
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(pixels);
    let mut total_foreground = 0u32;
    let mut truncated = false;

    for start in 0..pixels {
        if data[start] == 0 || label_map[start] != 0 {
            continue;
        }
        if regions.len() >= params.max_regions as usize {
            truncated = true;
            warn!(
                "region cap {} reached; remaining foreground left unlabeled",
                params.max_regions
            );
            break;
        }

        let label = regions.len() as u8 + 1;
        let region = flood_fill(geometry, data, &mut label_map, &mut queue, start, label);
        total_foreground += region.area;
        regions.push(region);
    }

    RegionAnalysis {
        label_map,
        regions,
        total_foreground,
        truncated,
    }
}

fn flood_fill(
    geometry: ImageGeometry,
    data: &[u8],
    label_map: &mut [u8],
    queue: &mut VecDeque<usize>,
    start: usize,
    label: u8,
) -> Region {
    let width = geometry.width;
    let height = geometry.height;

    let mut area = 0u32;
    let mut sum_x = 0u64;
    let mut sum_y = 0u64;
    let mut bbox_x0 = width as u16;
    let mut bbox_y0 = height as u16;
    let mut bbox_x1 = 0u16;
    let mut bbox_y1 = 0u16;

    queue.clear();
    queue.push_back(start);
    label_map[start] = label;

    while let Some(p) = queue.pop_front() {
        let (x, y) = geometry.coords(p);
        let (px, py) = (x as u16, y as u16);

        area += 1;
        sum_x += x as u64;
        sum_y += y as u64;
        bbox_x0 = bbox_x0.min(px);
        bbox_y0 = bbox_y0.min(py);
        bbox_x1 = bbox_x1.max(px);
        bbox_y1 = bbox_y1.max(py);

        let mut visit = |nx: usize, ny: usize| {
            let ni = geometry.index(nx, ny);
            if data[ni] != 0 && label_map[ni] == 0 {
                label_map[ni] = label;
                queue.push_back(ni);
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < width {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < height {
            visit(x, y + 1);
        }
    }

    // area >= 1: the seed itself was foreground.
    Region {
        label,
        area,
        centroid_x: (sum_x / u64::from(area)) as u16,
        centroid_y: (sum_y / u64::from(area)) as u16,
        bbox_x0,
        bbox_y0,
        bbox_x1,
        bbox_y1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with_rect(
        geometry: ImageGeometry,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> BinaryMask {
        let mut mask = BinaryMask::new(geometry);
        fill_rect(&mut mask, x0, y0, x1, y1);
        mask
    }

    fn fill_rect(mask: &mut BinaryMask, x0: usize, y0: usize, x1: usize, y1: usize) {
        let geometry = mask.geometry();
        for y in y0..=y1 {
            for x in x0..=x1 {
                mask.data_mut()[geometry.index(x, y)] = 255;
            }
        }
    }

    #[test]
    fn empty_mask_has_no_regions() {
        let analysis = label_regions(
            &BinaryMask::new(ImageGeometry::new(16, 16)),
            &RegionParams::default(),
        );
        assert!(analysis.regions.is_empty());
        assert_eq!(analysis.total_foreground, 0);
        assert!(!analysis.truncated);
        assert!(analysis.label_map.iter().all(|&l| l == 0));
    }

    #[test]
    fn single_rect_statistics() {
        let geometry = ImageGeometry::new(32, 32);
        let mask = mask_with_rect(geometry, 4, 6, 13, 15);
        let analysis = label_regions(&mask, &RegionParams::default());

        assert_eq!(analysis.regions.len(), 1);
        let r = &analysis.regions[0];
        assert_eq!(r.label, 1);
        assert_eq!(r.area, 100);
        assert_eq!((r.centroid_x, r.centroid_y), (8, 10));
        assert_eq!((r.bbox_x0, r.bbox_y0, r.bbox_x1, r.bbox_y1), (4, 6, 13, 15));
        assert!(r.bbox_contains(r.centroid_x, r.centroid_y));
        assert_eq!(analysis.total_foreground, 100);
    }

    #[test]
    fn diagonal_pixels_are_separate_regions() {
        let geometry = ImageGeometry::new(8, 8);
        let mut mask = BinaryMask::new(geometry);
        mask.data_mut()[geometry.index(2, 2)] = 255;
        mask.data_mut()[geometry.index(3, 3)] = 255;

        let analysis = label_regions(&mask, &RegionParams::default());
        assert_eq!(analysis.regions.len(), 2);
    }

    #[test]
    fn labels_follow_scan_order() {
        let geometry = ImageGeometry::new(16, 16);
        let mut mask = BinaryMask::new(geometry);
        fill_rect(&mut mask, 10, 2, 12, 4);
        fill_rect(&mut mask, 1, 8, 3, 10);

        let analysis = label_regions(&mask, &RegionParams::default());
        assert_eq!(analysis.regions.len(), 2);
        // The upper-right block is reached first in row-major order.
        assert_eq!(analysis.regions[0].bbox_y0, 2);
        assert_eq!(analysis.regions[1].bbox_y0, 8);
        assert_eq!(
            analysis.label_map[geometry.index(11, 3)],
            analysis.regions[0].label
        );
        assert_eq!(
            analysis.label_map[geometry.index(2, 9)],
            analysis.regions[1].label
        );
    }

    #[test]
    fn region_cap_truncates_and_flags() {
        let geometry = ImageGeometry::new(16, 16);
        let mut mask = BinaryMask::new(geometry);
        // 5 isolated specks, cap at 3.
        for i in 0..5 {
            mask.data_mut()[geometry.index(2 + 3 * i, 2)] = 255;
        }

        let analysis = label_regions(&mask, &RegionParams { max_regions: 3 });
        assert_eq!(analysis.regions.len(), 3);
        assert!(analysis.truncated);
        assert_eq!(analysis.total_foreground, 3);
        assert_eq!(mask.foreground_pixels(), 5);
    }

    #[test]
    fn areas_account_for_all_labeled_foreground() {
        let geometry = ImageGeometry::new(24, 24);
        let mut mask = BinaryMask::new(geometry);
        fill_rect(&mut mask, 0, 0, 5, 5);
        fill_rect(&mut mask, 10, 10, 20, 15);
        fill_rect(&mut mask, 2, 18, 4, 22);

        let analysis = label_regions(&mask, &RegionParams::default());
        let sum: u32 = analysis.regions.iter().map(|r| r.area).sum();
        assert_eq!(sum, analysis.total_foreground);
        assert_eq!(sum, mask.foreground_pixels());
        let labeled = analysis.label_map.iter().filter(|&&l| l != 0).count() as u32;
        assert_eq!(labeled, sum);
    }

    #[test]
    fn frame_spanning_component_fits_the_queue() {
        let geometry = ImageGeometry::new(64, 64);
        let mut mask = BinaryMask::new(geometry);
        fill_rect(&mut mask, 0, 0, 63, 63);

        let analysis = label_regions(&mask, &RegionParams::default());
        assert_eq!(analysis.regions.len(), 1);
        assert_eq!(analysis.regions[0].area, 64 * 64);
        assert_eq!(
            (
                analysis.regions[0].centroid_x,
                analysis.regions[0].centroid_y
            ),
            (31, 31)
        );
    }
}
