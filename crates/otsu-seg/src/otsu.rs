use crate::histogram::Histogram;

/// Find the threshold maximising inter-class variance.
///
/// Sweeps `t` from 0 to 255 with cumulative background weight and intensity
/// sum, skipping while the background class is still empty and stopping once
/// the foreground class empties; past that point no split carries any
/// information. Class means use truncating integer division; the tracked
/// quantity is the unscaled variance `w_bg · w_fg · (mean_bg − mean_fg)²`,
/// which with 16-bit weights and an 8-bit mean difference peaks near
/// 2.8 × 10¹⁴ and fits `u64` comfortably.
///
/// The comparison is strict, so ties keep the lowest threshold. A histogram
/// with no separating variance (e.g. a uniform frame) yields 0.
pub fn otsu_threshold(hist: &Histogram) -> u8 {
    let total = hist.total();
    let sum_total = hist.weighted_sum();

    let mut weight_bg = 0u64;
    let mut sum_bg = 0u64;
    let mut max_var = 0u64;
    let mut best = 0u8;

    for (t, &count) in hist.bins().iter().enumerate() {
        weight_bg += u64::from(count);
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }

        sum_bg += t as u64 * u64::from(count);
        let sum_fg = sum_total - sum_bg;

        let mean_bg = sum_bg / weight_bg;
        let mean_fg = sum_fg / weight_fg;
        let diff = mean_bg.abs_diff(mean_fg);
        let var_between = weight_bg * weight_fg * diff * diff;

        if var_between > max_var {
            max_var = var_between;
            best = t as u8;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use otsu_seg_core::{GrayImageView, ImageGeometry};

    fn histogram_of(data: &[u8], width: usize, height: usize) -> Histogram {
        let image =
            GrayImageView::new(ImageGeometry::new(width, height), data).expect("valid view");
        Histogram::build(&image)
    }

    #[test]
    fn uniform_frame_yields_zero() {
        let data = vec![128u8; 64];
        assert_eq!(otsu_threshold(&histogram_of(&data, 8, 8)), 0);
    }

    #[test]
    fn bimodal_frame_splits_at_lower_population() {
        // Equal halves of 20 and 220. Every cut between the populated bins
        // scores the same, and the strict comparison keeps the earliest.
        let mut data = vec![20u8; 32];
        data.extend(std::iter::repeat(220u8).take(32));
        assert_eq!(otsu_threshold(&histogram_of(&data, 8, 8)), 20);
    }

    #[test]
    fn unbalanced_bimodal_frame_separates_classes() {
        let mut data = vec![40u8; 48];
        data.extend(std::iter::repeat(200u8).take(16));
        let t = otsu_threshold(&histogram_of(&data, 8, 8));
        assert!((40..200).contains(&t), "threshold {t} must split the modes");
    }

    #[test]
    fn single_bright_pixel_still_splits() {
        let mut data = vec![10u8; 63];
        data.push(250);
        let t = otsu_threshold(&histogram_of(&data, 8, 8));
        assert!((10..250).contains(&t));
    }
}
