use otsu_seg_core::{BinaryMask, GrayImageView};

/// Mask value for pixels above the threshold.
pub const FOREGROUND: u8 = 255;
/// Mask value for pixels at or below the threshold.
pub const BACKGROUND: u8 = 0;

/// Binarise `image` into `mask`: strictly greater than `threshold` is
/// foreground, everything else (including pixels exactly at the threshold)
/// is background. The mask must share the image's geometry.
pub fn apply_threshold(image: &GrayImageView<'_>, threshold: u8, mask: &mut BinaryMask) {
    debug_assert_eq!(image.geometry(), mask.geometry());
    for (out, &px) in mask.data_mut().iter_mut().zip(image.data()) {
        *out = if px > threshold { FOREGROUND } else { BACKGROUND };
    }
}

/// Number of pixels strictly above `threshold`, i.e. the foreground count
/// the raw threshold would produce before any morphology.
pub fn count_above(image: &GrayImageView<'_>, threshold: u8) -> u32 {
    image.data().iter().filter(|&&px| px > threshold).count() as u32
}
