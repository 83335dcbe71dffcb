use crate::geometry::ImageGeometry;

/// Errors produced when wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ImageError {
    #[error("geometry {0} has zero pixels")]
    EmptyGeometry(ImageGeometry),
    #[error("buffer of {len} bytes does not match geometry {geometry}")]
    LengthMismatch { geometry: ImageGeometry, len: usize },
}

/// Borrowed row-major grayscale frame.
///
/// The only input type the pipeline reads. Construction validates the
/// buffer length once; everything downstream can then index freely.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    geometry: ImageGeometry,
    data: &'a [u8],
}

impl<'a> GrayImageView<'a> {
    pub fn new(geometry: ImageGeometry, data: &'a [u8]) -> Result<Self, ImageError> {
        if geometry.pixel_count() == 0 {
            return Err(ImageError::EmptyGeometry(geometry));
        }
        if data.len() != geometry.pixel_count() {
            return Err(ImageError::LengthMismatch {
                geometry,
                len: data.len(),
            });
        }
        Ok(Self { geometry, data })
    }

    #[inline]
    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[self.geometry.index(x, y)]
    }
}

/// Owned grayscale frame, mostly for tests and demo harnesses.
#[derive(Clone, Debug)]
pub struct GrayImage {
    geometry: ImageGeometry,
    data: Vec<u8>,
}

impl GrayImage {
    pub fn new(geometry: ImageGeometry, data: Vec<u8>) -> Result<Self, ImageError> {
        GrayImageView::new(geometry, &data)?;
        Ok(Self { geometry, data })
    }

    /// Frame with every sample set to `value`.
    pub fn filled(geometry: ImageGeometry, value: u8) -> Result<Self, ImageError> {
        if geometry.pixel_count() == 0 {
            return Err(ImageError::EmptyGeometry(geometry));
        }
        Ok(Self {
            geometry,
            data: vec![value; geometry.pixel_count()],
        })
    }

    #[inline]
    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            geometry: self.geometry,
            data: &self.data,
        }
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        let idx = self.geometry.index(x, y);
        self.data[idx] = value;
    }
}

/// Owned binary mask, values restricted to `{0, 255}`.
///
/// Morphology mutates the buffer in place; the final state is what the
/// region labeler consumes. `data_mut` hands out the raw buffer, so the
/// `{0, 255}` restriction is upheld by the writers, not by the type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinaryMask {
    geometry: ImageGeometry,
    data: Vec<u8>,
}

impl BinaryMask {
    /// All-background mask of the given geometry.
    pub fn new(geometry: ImageGeometry) -> Self {
        Self {
            geometry,
            data: vec![0; geometry.pixel_count()],
        }
    }

    #[inline]
    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[self.geometry.index(x, y)]
    }

    /// Number of nonzero samples.
    pub fn foreground_pixels(&self) -> u32 {
        self.data.iter().filter(|&&v| v != 0).count() as u32
    }
}
