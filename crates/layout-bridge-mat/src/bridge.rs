//! Interleaved matrix <-> planar array.
//!
//! `mat_to_array` yields `(cols, rows, channels)` and `array_to_mat` reads
//! `dims[0]` as rows, so a round trip needs exactly one of the two calls to
//! transpose. Element types are preserved in both directions.

use crate::Mat;
use layout_bridge_core::{
    checked_product, try_vec, with_element_type, BridgeError, PlanarArray,
};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Most channels an interleaved matrix may carry.
pub const MAX_MAT_CHANNELS: usize = 4;

/// Split an interleaved matrix into channel planes.
///
/// Without `transpose` the result has dims `(cols, rows, channels)`; with it,
/// `(rows, cols, channels)`. An empty matrix yields an empty array.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(mat), fields(rows = mat.rows(), cols = mat.cols()))
)]
pub fn mat_to_array(mat: &Mat, transpose: bool) -> Result<PlanarArray, BridgeError> {
    if mat.is_empty() {
        return Ok(PlanarArray::empty());
    }

    let (rows, cols, channels, step) = (mat.rows(), mat.cols(), mat.channels(), mat.step());
    let dims = if transpose {
        [rows, cols, channels, 1]
    } else {
        [cols, rows, channels, 1]
    };
    let len = checked_product(&dims)?;
    debug!(
        "mat {}x{}x{} {} -> array {:?}",
        rows,
        cols,
        channels,
        mat.dtype(),
        dims
    );

    with_element_type!(mat.dtype(), T => {
        let src = mat.typed::<T>().unwrap_or(&[]);
        let mut out = try_vec::<T>(len)?;
        for c in 0..channels {
            if transpose {
                for col in 0..cols {
                    out.extend((0..rows).map(|row| src[row * step + col * channels + c]));
                }
            } else {
                for row in 0..rows {
                    let line = &src[row * step..];
                    out.extend((0..cols).map(|col| line[col * channels + c]));
                }
            }
        }
        PlanarArray::from_vec(dims, out)
    })
}

/// Convert several matrices and stack their channels in order.
///
/// All matrices must share the same rows and cols. An empty slice yields an
/// empty array.
pub fn mats_to_array(mats: &[Mat], transpose: bool) -> Result<PlanarArray, BridgeError> {
    mats.iter().try_fold(PlanarArray::empty(), |acc, mat| {
        acc.join(2, &mat_to_array(mat, transpose)?)
    })
}

/// Interleave the channel planes of an array into a matrix.
///
/// Without `transpose`, `rows = dims[0]` and `cols = dims[1]`; with it, the
/// two are swapped. An empty array yields an empty matrix.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(array), fields(dims = ?array.dims()))
)]
pub fn array_to_mat(array: &PlanarArray, transpose: bool) -> Result<Mat, BridgeError> {
    if array.is_empty() {
        return Ok(Mat::empty());
    }

    let dims = array.dims();
    let channels = dims[2];
    if channels > MAX_MAT_CHANNELS {
        return Err(BridgeError::UnsupportedChannelCount { channels });
    }
    if dims[3] > 1 {
        return Err(BridgeError::DimensionalityExceeded {
            dims: dims.to_vec(),
        });
    }

    let (rows, cols) = if transpose {
        (dims[1], dims[0])
    } else {
        (dims[0], dims[1])
    };
    // Array strides of the (row, col) axes after the optional transpose.
    let (row_stride, col_stride) = if transpose { (dims[0], 1) } else { (1, dims[0]) };
    let plane = dims[0] * dims[1];
    debug!(
        "array {:?} {} -> mat {}x{}x{}",
        dims,
        array.dtype(),
        rows,
        cols,
        channels
    );

    with_element_type!(array.dtype(), T => {
        let src = array.typed::<T>().unwrap_or(&[]);
        let mut out = try_vec::<T>(array.elements())?;
        for row in 0..rows {
            for col in 0..cols {
                let base = row * row_stride + col * col_stride;
                out.extend((0..channels).map(|c| src[base + c * plane]));
            }
        }
        Mat::from_vec(rows, cols, channels, out)
    })
}
