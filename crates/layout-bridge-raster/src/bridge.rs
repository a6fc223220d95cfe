//! Planar array <-> typed image.
//!
//! Arrays are expected in their native orientation `(height, width, channels)`,
//! i.e. already transposed relative to the image. `image_to_array` produces that
//! orientation, so `array_to_image(&image_to_array(&img)?, false)` reproduces
//! `img`. Callers holding a `(width, height, channels)` array pass
//! `transpose = true` instead.

use crate::convert::convert_pixel_buffer;
use crate::{Image, Pixel};
use layout_bridge_core::{
    check_channels, try_filled, BridgeError, Element, ElementType, PlanarArray,
};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Axis permutation taking the (optionally transposed) array to interleaved
/// row-major order: channels first when there are several, then x, then y.
fn interleave_axes(channels: usize, transpose: bool) -> [usize; 4] {
    match (channels > 1, transpose) {
        (true, false) => [2, 1, 0, 3],
        (true, true) => [2, 0, 1, 3],
        (false, false) => [1, 0, 2, 3],
        (false, true) => [0, 1, 2, 3],
    }
}

/// Convert a planar array into an image with pixel type `P`.
///
/// The element type is cast to `P::Component`. When the array channel count
/// differs from `P::CHANNELS`, pixels are adapted (see
/// [`convert_pixel_buffer`](crate::convert_pixel_buffer)). The image size is
/// `[dims[1], dims[0]]` (or `[dims[0], dims[1]]` when transposing), with zero
/// index and origin and unit spacing.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(array), fields(dims = ?array.dims(), dtype = %array.dtype()))
)]
pub fn array_to_image<P: Pixel, const D: usize>(
    array: &PlanarArray,
    transpose: bool,
) -> Result<Image<P, D>, BridgeError> {
    if array.is_empty() {
        return Err(BridgeError::EmptyInput);
    }
    let dtype = array.dtype();
    if dtype == ElementType::B8 {
        return Err(BridgeError::UnsupportedElementType { dtype });
    }

    let dims = array.dims();
    let in_channels = dims[2];
    check_channels(in_channels)?;
    check_channels(P::CHANNELS)?;
    if dims[3] > 1 {
        return Err(BridgeError::DimensionalityExceeded {
            dims: dims.to_vec(),
        });
    }

    let interleaved = array
        .reorder(interleave_axes(in_channels, transpose))?
        .cast(<P::Component as Element>::DTYPE)?;

    let (width, height) = if transpose {
        (dims[0], dims[1])
    } else {
        (dims[1], dims[0])
    };
    debug!(
        "array {:?} {} -> image {}x{} ({} -> {} channels)",
        dims,
        dtype,
        width,
        height,
        in_channels,
        P::CHANNELS
    );

    let components = interleaved
        .typed::<P::Component>()
        .ok_or(BridgeError::UnsupportedElementType {
            dtype: interleaved.dtype(),
        })?;
    let pixels = convert_pixel_buffer::<P>(components, in_channels, width * height)?;

    let mut size = [1usize; D];
    size[0] = width;
    size[1] = height;
    Image::from_pixels(size, pixels)
}

/// Convert an image into a planar array of dims `(height, width, channels)`
/// holding `P::Component` elements.
///
/// Only 1-D and 2-D images are accepted: every axis past the second must have
/// extent 1.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(image), fields(size = ?image.size()))
)]
pub fn image_to_array<P: Pixel, const D: usize>(
    image: &Image<P, D>,
) -> Result<PlanarArray, BridgeError> {
    let size = image.size();
    if size.iter().skip(2).any(|&s| s != 1) {
        return Err(BridgeError::DimensionalityExceeded {
            dims: size.to_vec(),
        });
    }

    let channels = P::CHANNELS;
    check_channels(channels)?;

    let (width, height) = (size[0], size[1]);
    let plane = width * height;
    if plane == 0 {
        return Err(BridgeError::EmptyInput);
    }

    // Planar (width, height, channels): channel c of pixel i lands at c * plane + i.
    let mut data = try_filled(plane * channels, P::Component::default())?;
    for (i, px) in image.pixels().iter().enumerate() {
        for c in 0..channels {
            data[c * plane + i] = px.component(c);
        }
    }
    debug!(
        "image {}x{} ({} channels, {}) -> array",
        width,
        height,
        channels,
        <P::Component as Element>::DTYPE
    );

    PlanarArray::from_vec([width, height, channels, 1], data)?.transpose()
}
