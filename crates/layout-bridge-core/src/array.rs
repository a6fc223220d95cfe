//! Column-major, channel-planar N-d array (up to 4 axes).

use crate::{
    checked_product, try_vec, with_element_type, BridgeError, Element, ElementBuffer, ElementType,
};

/// Axis extents of a [`PlanarArray`]: `[dim0, dim1, channels, batch]`.
pub type Dims = [usize; 4];

/// Dense array with up to 4 axes in column-major order.
///
/// The linear index of `(i0, i1, i2, i3)` is `i0 + d0 * (i1 + d1 * (i2 + d2 * i3))`,
/// so axis 0 varies fastest and each channel (axis 2) occupies its own
/// contiguous plane. Unused trailing axes have extent 1.
///
/// Arrays holding images use the native orientation `(height, width, channels)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarArray {
    dims: Dims,
    data: ElementBuffer,
}

impl Default for PlanarArray {
    fn default() -> Self {
        Self::empty()
    }
}

impl PlanarArray {
    /// An array with no elements (`[0, 1, 1, 1]`, `f32`).
    pub fn empty() -> Self {
        Self {
            dims: [0, 1, 1, 1],
            data: ElementBuffer::F32(Vec::new()),
        }
    }

    /// Wrap `data` with the given extents.
    pub fn new(dims: Dims, data: ElementBuffer) -> Result<Self, BridgeError> {
        let expected = checked_product(&dims)?;
        if data.len() != expected {
            return Err(BridgeError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    pub fn from_vec<T: Element>(dims: Dims, data: Vec<T>) -> Result<Self, BridgeError> {
        Self::new(dims, T::into_buffer(data))
    }

    pub fn zeros(dims: Dims, dtype: ElementType) -> Result<Self, BridgeError> {
        let len = checked_product(&dims)?;
        Ok(Self {
            dims,
            data: ElementBuffer::zeros(dtype, len)?,
        })
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn dtype(&self) -> ElementType {
        self.data.dtype()
    }

    #[inline]
    pub fn elements(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Extent of the channel axis.
    #[inline]
    pub fn channels(&self) -> usize {
        self.dims[2]
    }

    /// Number of axes with extent other than 1 (at least 1 for a non-empty array).
    pub fn ndims(&self) -> usize {
        self.dims
            .iter()
            .rposition(|&d| d != 1)
            .map_or(1, |last| last + 1)
    }

    pub fn data(&self) -> &ElementBuffer {
        &self.data
    }

    pub fn into_data(self) -> ElementBuffer {
        self.data
    }

    /// Typed view of the storage, `None` if `T` is not the element type.
    pub fn typed<T: Element>(&self) -> Option<&[T]> {
        T::slice(&self.data)
    }

    pub fn typed_mut<T: Element>(&mut self) -> Option<&mut [T]> {
        T::slice_mut(&mut self.data)
    }

    #[inline]
    pub fn linear_index(&self, index: [usize; 4]) -> Option<usize> {
        let d = self.dims;
        if index.iter().zip(d.iter()).any(|(&i, &e)| i >= e) {
            return None;
        }
        Some(index[0] + d[0] * (index[1] + d[1] * (index[2] + d[2] * index[3])))
    }

    pub fn get_f64(&self, index: [usize; 4]) -> Option<f64> {
        self.linear_index(index).and_then(|i| self.data.get_f64(i))
    }

    /// Swap axes 0 and 1 of every channel and batch slice.
    pub fn transpose(&self) -> Result<Self, BridgeError> {
        self.reorder([1, 0, 2, 3])
    }

    /// Permute axes: axis `k` of the result is axis `axes[k]` of `self`.
    pub fn reorder(&self, axes: [usize; 4]) -> Result<Self, BridgeError> {
        let mut seen = [false; 4];
        for &a in &axes {
            if a >= 4 || seen[a] {
                return Err(BridgeError::InvalidAxes {
                    axes: axes.to_vec(),
                });
            }
            seen[a] = true;
        }

        let d = self.dims;
        let src_strides = [1, d[0], d[0] * d[1], d[0] * d[1] * d[2]];
        let dims = axes.map(|a| d[a]);
        let strides = axes.map(|a| src_strides[a]);

        let data = with_element_type!(self.dtype(), T => {
            let src = T::slice(&self.data).unwrap_or(&[]);
            T::into_buffer(gather_strided(src, dims, strides)?)
        });
        Ok(Self { dims, data })
    }

    /// Reinterpret the extents without moving any element.
    pub fn moddims(&self, dims: Dims) -> Result<Self, BridgeError> {
        let expected = checked_product(&dims)?;
        if expected != self.elements() {
            return Err(BridgeError::ShapeMismatch {
                expected,
                got: self.elements(),
            });
        }
        Ok(Self {
            dims,
            data: self.data.clone(),
        })
    }

    /// Concatenate `other` after `self` along `axis`.
    ///
    /// An empty operand yields a copy of the other one. `other` is cast to the
    /// element type of `self`; every extent except `axis` must agree.
    pub fn join(&self, axis: usize, other: &PlanarArray) -> Result<Self, BridgeError> {
        if axis >= 4 {
            return Err(BridgeError::InvalidAxes { axes: vec![axis] });
        }
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }

        let (a, b) = (self.dims, other.dims);
        if (0..4).any(|k| k != axis && a[k] != b[k]) {
            let mut expected = a;
            expected[axis] = b[axis];
            return Err(BridgeError::ShapeMismatch {
                expected: checked_product(&expected)?,
                got: other.elements(),
            });
        }

        // Column-major: everything up to and including `axis` is one
        // contiguous chunk per outer index.
        let chunk_a = checked_product(&a[..=axis])?;
        let chunk_b = checked_product(&b[..=axis])?;
        let outer = checked_product(&a[axis + 1..])?;

        let mut dims = a;
        dims[axis] = a[axis] + b[axis];

        let other_data = other.data.cast(self.dtype())?;
        let data = with_element_type!(self.dtype(), T => {
            let lhs = T::slice(&self.data).unwrap_or(&[]);
            let rhs = T::slice(&other_data).unwrap_or(&[]);
            let mut out = try_vec::<T>(lhs.len() + rhs.len())?;
            for o in 0..outer {
                out.extend_from_slice(&lhs[o * chunk_a..(o + 1) * chunk_a]);
                out.extend_from_slice(&rhs[o * chunk_b..(o + 1) * chunk_b]);
            }
            T::into_buffer(out)
        });
        Ok(Self { dims, data })
    }

    /// Element-wise cast, keeping the extents.
    pub fn cast(&self, dtype: ElementType) -> Result<Self, BridgeError> {
        Ok(Self {
            dims: self.dims,
            data: self.data.cast(dtype)?,
        })
    }

    /// Number of positions whose values differ; extents that disagree count
    /// every element of the larger array.
    pub fn count_mismatches(&self, other: &PlanarArray) -> usize {
        if self.dims != other.dims {
            return self.elements().max(other.elements());
        }
        (0..self.elements())
            .filter(|&i| self.data.get_f64(i) != other.data.get_f64(i))
            .count()
    }
}

/// Walk `dims` in column-major order, reading `src` through `strides`.
fn gather_strided<T: Copy>(
    src: &[T],
    dims: Dims,
    strides: [usize; 4],
) -> Result<Vec<T>, BridgeError> {
    let mut out = try_vec(src.len())?;
    for i3 in 0..dims[3] {
        let o3 = i3 * strides[3];
        for i2 in 0..dims[2] {
            let o2 = o3 + i2 * strides[2];
            for i1 in 0..dims[1] {
                let o1 = o2 + i1 * strides[1];
                out.extend((0..dims[0]).map(|i0| src[o1 + i0 * strides[0]]));
            }
        }
    }
    Ok(out)
}
