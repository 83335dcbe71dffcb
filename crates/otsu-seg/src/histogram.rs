use otsu_seg_core::GrayImageView;

/// Number of intensity bins; one per 8-bit sample value.
pub const NUM_BINS: usize = 256;

/// Intensity histogram of one frame. Bin `i` counts pixels of value `i`,
/// so the bins always sum to the frame's pixel count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Histogram {
    bins: [u32; NUM_BINS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            bins: [0; NUM_BINS],
        }
    }
}

impl Histogram {
    /// Count every pixel of `image` into a fresh histogram.
    pub fn build(image: &GrayImageView<'_>) -> Self {
        let mut hist = Self::default();
        hist.rebuild(image);
        hist
    }

    /// Zero the bins and recount; lets an engine reuse one allocation
    /// across frames.
    pub fn rebuild(&mut self, image: &GrayImageView<'_>) {
        self.bins.fill(0);
        for &px in image.data() {
            self.bins[px as usize] += 1;
        }
    }

    #[inline]
    pub fn bin(&self, value: u8) -> u32 {
        self.bins[value as usize]
    }

    #[inline]
    pub fn bins(&self) -> &[u32; NUM_BINS] {
        &self.bins
    }

    /// Sum of all bins, i.e. the pixel count of the source frame.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| u64::from(c)).sum()
    }

    /// Grand intensity sum `Σ i·bins[i]`.
    pub fn weighted_sum(&self) -> u64 {
        self.bins
            .iter()
            .enumerate()
            .map(|(i, &c)| i as u64 * u64::from(c))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otsu_seg_core::ImageGeometry;

    #[test]
    fn bins_sum_to_pixel_count() {
        let geometry = ImageGeometry::new(16, 16);
        let data: Vec<u8> = (0..geometry.pixel_count()).map(|i| (i % 251) as u8).collect();
        let image = GrayImageView::new(geometry, &data).expect("valid view");

        let hist = Histogram::build(&image);
        assert_eq!(hist.total(), geometry.pixel_count() as u64);
    }

    #[test]
    fn counts_land_in_their_bins() {
        let geometry = ImageGeometry::new(4, 2);
        let data = [0u8, 0, 7, 7, 7, 255, 255, 255];
        let image = GrayImageView::new(geometry, &data).expect("valid view");

        let hist = Histogram::build(&image);
        assert_eq!(hist.bin(0), 2);
        assert_eq!(hist.bin(7), 3);
        assert_eq!(hist.bin(255), 3);
        assert_eq!(hist.bin(1), 0);
        assert_eq!(hist.weighted_sum(), 7 * 3 + 255 * 3);
    }

    #[test]
    fn rebuild_resets_previous_counts() {
        let geometry = ImageGeometry::new(2, 2);
        let first = [9u8, 9, 9, 9];
        let second = [1u8, 1, 1, 1];

        let mut hist = Histogram::build(&GrayImageView::new(geometry, &first).expect("view"));
        hist.rebuild(&GrayImageView::new(geometry, &second).expect("view"));
        assert_eq!(hist.bin(9), 0);
        assert_eq!(hist.bin(1), 4);
    }
}
