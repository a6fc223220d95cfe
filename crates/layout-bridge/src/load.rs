//! Decode image files into planar arrays.

use crate::io::BridgeIoError;
use image::{DynamicImage, ImageReader};
use layout_bridge_core::{checked_product, try_vec, BridgeError, Element, PlanarArray};
use log::debug;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Decode an image file into a `(height, width, channels)` planar array.
///
/// 8- and 16-bit images keep their depth, float images become `f32`, and
/// luma-alpha is expanded to RGBA.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(path)))]
pub fn load_array(path: impl AsRef<Path>) -> Result<PlanarArray, BridgeIoError> {
    let path = path.as_ref();
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(dynamic_to_array(&image)?)
}

/// Planar array of a decoded image. See [`load_array`] for the depth rules.
pub fn dynamic_to_array(image: &DynamicImage) -> Result<PlanarArray, BridgeError> {
    let (w, h) = (image.width() as usize, image.height() as usize);
    match image {
        DynamicImage::ImageLuma8(b) => planar_from_interleaved(w, h, 1, b.as_raw()),
        DynamicImage::ImageRgb8(b) => planar_from_interleaved(w, h, 3, b.as_raw()),
        DynamicImage::ImageRgba8(b) => planar_from_interleaved(w, h, 4, b.as_raw()),
        DynamicImage::ImageLumaA8(_) => planar_from_interleaved(w, h, 4, image.to_rgba8().as_raw()),
        DynamicImage::ImageLuma16(b) => planar_from_interleaved(w, h, 1, b.as_raw()),
        DynamicImage::ImageRgb16(b) => planar_from_interleaved(w, h, 3, b.as_raw()),
        DynamicImage::ImageRgba16(b) => planar_from_interleaved(w, h, 4, b.as_raw()),
        DynamicImage::ImageLumaA16(_) => {
            planar_from_interleaved(w, h, 4, image.to_rgba16().as_raw())
        }
        DynamicImage::ImageRgb32F(b) => planar_from_interleaved(w, h, 3, b.as_raw()),
        DynamicImage::ImageRgba32F(b) => planar_from_interleaved(w, h, 4, b.as_raw()),
        _ => planar_from_interleaved(w, h, 4, image.to_rgba32f().as_raw()),
    }
}

/// Split row-major interleaved pixels into a `(height, width, channels)`
/// planar array.
pub fn planar_from_interleaved<T: Element>(
    width: usize,
    height: usize,
    channels: usize,
    data: &[T],
) -> Result<PlanarArray, BridgeError> {
    let expected = checked_product(&[width, height, channels])?;
    if data.len() != expected {
        return Err(BridgeError::ShapeMismatch {
            expected,
            got: data.len(),
        });
    }

    let mut out = try_vec::<T>(expected)?;
    for c in 0..channels {
        for x in 0..width {
            out.extend((0..height).map(|y| data[(y * width + x) * channels + c]));
        }
    }
    PlanarArray::from_vec([height, width, channels, 1], out)
}
