use crate::Pixel;
use layout_bridge_core::{checked_product, try_filled, BridgeError};

/// Index start and extent of an image along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region<const D: usize> {
    pub index: [i64; D],
    pub size: [usize; D],
}

impl<const D: usize> Region<D> {
    /// Region of the given size starting at index zero.
    pub fn new(size: [usize; D]) -> Self {
        Self {
            index: [0; D],
            size,
        }
    }

    pub fn with_index(mut self, index: [i64; D]) -> Self {
        self.index = index;
        self
    }

    pub fn number_of_pixels(&self) -> Result<usize, BridgeError> {
        checked_product(&self.size)
    }
}

/// Row-major, channel-interleaved image with geometric metadata.
///
/// Axis 0 (x) varies fastest, so the pixel at `[x, y]` of a 2-D image lives at
/// `x + width * y`. `D` is 2 or 3; a 3-D image with `size[2] == 1` is a
/// single slice.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<P: Pixel, const D: usize> {
    region: Region<D>,
    origin: [f64; D],
    spacing: [f64; D],
    pixels: Vec<P>,
}

impl<P: Pixel, const D: usize> Image<P, D> {
    const VALID_DIMENSION: () = assert!(D == 2 || D == 3, "images are 2-D or 3-D");

    /// Allocate an image covering `region`, filled with `P::default()`,
    /// with zero origin and unit spacing.
    pub fn new(region: Region<D>) -> Result<Self, BridgeError> {
        let () = Self::VALID_DIMENSION;
        let n = region.number_of_pixels()?;
        Ok(Self {
            region,
            origin: [0.0; D],
            spacing: [1.0; D],
            pixels: try_filled(n, P::default())?,
        })
    }

    /// Wrap row-major pixels; `pixels.len()` must equal the product of `size`.
    pub fn from_pixels(size: [usize; D], pixels: Vec<P>) -> Result<Self, BridgeError> {
        let () = Self::VALID_DIMENSION;
        let expected = checked_product(&size)?;
        if pixels.len() != expected {
            return Err(BridgeError::ShapeMismatch {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            region: Region::new(size),
            origin: [0.0; D],
            spacing: [1.0; D],
            pixels,
        })
    }

    #[inline]
    pub fn region(&self) -> Region<D> {
        self.region
    }

    /// The buffered region is always the whole image.
    #[inline]
    pub fn largest_possible_region(&self) -> Region<D> {
        self.region
    }

    #[inline]
    pub fn size(&self) -> [usize; D] {
        self.region.size
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.region.size[0]
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.region.size[1]
    }

    pub fn origin(&self) -> [f64; D] {
        self.origin
    }

    pub fn spacing(&self) -> [f64; D] {
        self.spacing
    }

    pub fn set_origin(&mut self, origin: [f64; D]) {
        self.origin = origin;
    }

    pub fn set_spacing(&mut self, spacing: [f64; D]) {
        self.spacing = spacing;
    }

    pub fn set_index(&mut self, index: [i64; D]) {
        self.region.index = index;
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<P> {
        self.pixels
    }

    /// Linear offset of a buffer-relative index.
    #[inline]
    pub fn offset(&self, index: [usize; D]) -> Option<usize> {
        let size = self.region.size;
        let mut offset = 0;
        for axis in (0..D).rev() {
            if index[axis] >= size[axis] {
                return None;
            }
            offset = offset * size[axis] + index[axis];
        }
        Some(offset)
    }

    pub fn get(&self, index: [usize; D]) -> Option<&P> {
        self.offset(index).map(|o| &self.pixels[o])
    }

    pub fn set(&mut self, index: [usize; D], pixel: P) -> bool {
        match self.offset(index) {
            Some(o) => {
                self.pixels[o] = pixel;
                true
            }
            None => false,
        }
    }
}
