//! 3×3 binary morphology.
//!
//! Erosion treats out-of-bounds neighbours as foreground, so border pixels
//! are only eroded by real image content, never by the edge itself.
//! Dilation treats them as background, the dual convention.

use otsu_seg_core::{BinaryMask, ImageGeometry};

/// Minimum filter over each pixel's 3×3 neighbourhood.
pub fn erode_3x3(geometry: ImageGeometry, src: &[u8], dst: &mut [u8]) {
    filter_3x3(geometry, src, dst, 255, u8::min);
}

/// Maximum filter over each pixel's 3×3 neighbourhood.
pub fn dilate_3x3(geometry: ImageGeometry, src: &[u8], dst: &mut [u8]) {
    filter_3x3(geometry, src, dst, 0, u8::max);
}

fn filter_3x3(
    geometry: ImageGeometry,
    src: &[u8],
    dst: &mut [u8],
    out_of_bounds: u8,
    fold: fn(u8, u8) -> u8,
) {
    debug_assert_eq!(src.len(), geometry.pixel_count());
    debug_assert_eq!(dst.len(), geometry.pixel_count());

    let width = geometry.width as i64;
    let height = geometry.height as i64;

    for y in 0..height {
        for x in 0..width {
            let mut value = out_of_bounds;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let ny = y + dy;
                    let nx = x + dx;
                    if ny >= 0 && ny < height && nx >= 0 && nx < width {
                        value = fold(value, src[(ny * width + nx) as usize]);
                    }
                }
            }
            dst[(y * width + x) as usize] = value;
        }
    }
}

/// Erosion then dilation, in place; removes small isolated foreground
/// specks. `scratch` must match the mask's pixel count and holds the
/// intermediate eroded frame.
pub fn open_with_scratch(mask: &mut BinaryMask, scratch: &mut [u8]) {
    let geometry = mask.geometry();
    erode_3x3(geometry, mask.data(), scratch);
    dilate_3x3(geometry, scratch, mask.data_mut());
}

/// Dilation then erosion, in place; fills small background holes inside
/// foreground regions.
pub fn close_with_scratch(mask: &mut BinaryMask, scratch: &mut [u8]) {
    let geometry = mask.geometry();
    dilate_3x3(geometry, mask.data(), scratch);
    erode_3x3(geometry, scratch, mask.data_mut());
}

/// [`open_with_scratch`] with an operation-scoped scratch buffer.
pub fn open(mask: &mut BinaryMask) {
    let mut scratch = vec![0u8; mask.geometry().pixel_count()];
    open_with_scratch(mask, &mut scratch);
}

/// [`close_with_scratch`] with an operation-scoped scratch buffer.
pub fn close(mask: &mut BinaryMask) {
    let mut scratch = vec![0u8; mask.geometry().pixel_count()];
    close_with_scratch(mask, &mut scratch);
}
