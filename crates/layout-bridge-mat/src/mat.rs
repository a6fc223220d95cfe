use layout_bridge_core::{checked_product, BridgeError, Element, ElementBuffer, ElementType};

/// Row-major, channel-interleaved matrix with an optional row step.
///
/// Element `(row, col, channel)` lives at `row * step + col * channels + channel`;
/// `step >= cols * channels`, anything past `cols * channels` in a row is padding.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    channels: usize,
    step: usize,
    data: ElementBuffer,
}

impl Default for Mat {
    fn default() -> Self {
        Self::empty()
    }
}

impl Mat {
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            channels: 1,
            step: 0,
            data: ElementBuffer::U8(Vec::new()),
        }
    }

    /// Zero-filled, unpadded matrix.
    pub fn new(
        rows: usize,
        cols: usize,
        channels: usize,
        dtype: ElementType,
    ) -> Result<Self, BridgeError> {
        let step = checked_product(&[cols, channels])?;
        let len = checked_product(&[rows, step])?;
        Ok(Self {
            rows,
            cols,
            channels,
            step,
            data: ElementBuffer::zeros(dtype, len)?,
        })
    }

    /// Wrap existing storage, possibly with padded rows.
    pub fn from_buffer(
        rows: usize,
        cols: usize,
        channels: usize,
        step: usize,
        data: ElementBuffer,
    ) -> Result<Self, BridgeError> {
        let row_len = checked_product(&[cols, channels])?;
        if step < row_len {
            return Err(BridgeError::ShapeMismatch {
                expected: row_len,
                got: step,
            });
        }
        let expected = if rows == 0 {
            0
        } else {
            checked_product(&[rows - 1, step])? + row_len
        };
        if data.len() < expected {
            return Err(BridgeError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            channels,
            step,
            data,
        })
    }

    /// Unpadded matrix from interleaved values.
    pub fn from_vec<T: Element>(
        rows: usize,
        cols: usize,
        channels: usize,
        data: Vec<T>,
    ) -> Result<Self, BridgeError> {
        let step = checked_product(&[cols, channels])?;
        Self::from_buffer(rows, cols, channels, step, T::into_buffer(data))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Elements per row, padding included.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn dtype(&self) -> ElementType {
        self.data.dtype()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn data(&self) -> &ElementBuffer {
        &self.data
    }

    pub fn typed<T: Element>(&self) -> Option<&[T]> {
        T::slice(&self.data)
    }

    #[inline]
    pub fn offset(&self, row: usize, col: usize, channel: usize) -> Option<usize> {
        (row < self.rows && col < self.cols && channel < self.channels)
            .then(|| row * self.step + col * self.channels + channel)
    }

    pub fn get_f64(&self, row: usize, col: usize, channel: usize) -> Option<f64> {
        self.offset(row, col, channel)
            .and_then(|o| self.data.get_f64(o))
    }
}
