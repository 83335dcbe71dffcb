use serde::{Deserialize, Serialize};

/// Fixed image dimensions shared by every buffer of one pipeline instance.
///
/// Dimensions are construction-time constants: nothing in the pipeline
/// resizes, crops or rescales. Every loop below runs with a trip count
/// known as soon as the geometry is chosen, which keeps per-frame cost
/// strictly bounded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ImageGeometry {
    pub width: usize,
    pub height: usize,
}

impl ImageGeometry {
    /// Geometry the pipeline constants were tuned on.
    pub const REFERENCE: Self = Self {
        width: 256,
        height: 256,
    };

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of samples in a row-major buffer of this geometry.
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of `(x, y)`.
    #[inline]
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Inverse of [`ImageGeometry::index`].
    #[inline]
    pub const fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }
}

impl std::fmt::Display for ImageGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
