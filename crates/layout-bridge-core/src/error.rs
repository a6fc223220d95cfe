use crate::ElementType;

/// Errors produced by layout conversions.
///
/// Every error is fatal to the requested conversion; no partial output is
/// returned alongside it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("unsupported channel count {channels} (supported: 1, 3 or 4)")]
    UnsupportedChannelCount { channels: usize },
    #[error("unsupported element type {dtype} for pixel components")]
    UnsupportedElementType { dtype: ElementType },
    #[error("input is empty")]
    EmptyInput,
    #[error("only 1-D and 2-D data is supported (dims={dims:?})")]
    DimensionalityExceeded { dims: Vec<usize> },
    #[error("failed to allocate a buffer of {elements} elements")]
    AllocationFailure { elements: usize },
    #[error("shape mismatch (expected {expected} elements, got {got})")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("invalid axis permutation {axes:?}")]
    InvalidAxes { axes: Vec<usize> },
}

/// Reject channel counts that have no interleaved pixel representation.
pub fn check_channels(channels: usize) -> Result<(), BridgeError> {
    match channels {
        1 | 3 | 4 => Ok(()),
        _ => Err(BridgeError::UnsupportedChannelCount { channels }),
    }
}

/// Allocate an empty vector able to hold `len` elements without reallocating.
pub fn try_vec<T>(len: usize) -> Result<Vec<T>, BridgeError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| BridgeError::AllocationFailure { elements: len })?;
    Ok(out)
}

/// Allocate a vector of `len` copies of `value`.
pub fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, BridgeError> {
    let mut out = try_vec(len)?;
    out.resize(len, value);
    Ok(out)
}

/// Product of extents, reporting overflow as an allocation failure.
pub fn checked_product(extents: &[usize]) -> Result<usize, BridgeError> {
    extents.iter().try_fold(1usize, |acc, &e| {
        acc.checked_mul(e).ok_or(BridgeError::AllocationFailure {
            elements: usize::MAX,
        })
    })
}
