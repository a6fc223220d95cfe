//! Conversions between [`Image`] and `image::ImageBuffer`.
//!
//! Supported pairs are gray, RGB and RGBA pixels of `u8`, `u16` and `f32`,
//! mapped to `Luma`, `Rgb` and `Rgba` of the same component type.

use crate::raster::{Image, Pixel, Rgb, Rgba};
use image::{DynamicImage, ImageBuffer};
use layout_bridge_core::BridgeError;

/// `image::ImageBuffer` holding the counterpart of `P`.
pub type ForeignBuffer<P> = ImageBuffer<<P as BridgePixel>::Foreign, Vec<<P as Pixel>::Component>>;

/// A pixel type with an `image` crate counterpart.
pub trait BridgePixel: Pixel {
    type Foreign: image::Pixel<Subpixel = Self::Component>;

    fn to_foreign(self) -> Self::Foreign;

    fn from_foreign(pixel: &Self::Foreign) -> Self;

    /// Convert a decoded image of any layout into this pixel type, using the
    /// `image` crate's own colour conversions.
    fn buffer_from_dynamic(image: &DynamicImage) -> ForeignBuffer<Self>;
}

macro_rules! impl_bridge_pixel {
    ($t:ty, $luma:ident, $rgb:ident, $rgba:ident) => {
        impl BridgePixel for $t {
            type Foreign = image::Luma<$t>;

            fn to_foreign(self) -> Self::Foreign {
                image::Luma([self])
            }

            fn from_foreign(p: &Self::Foreign) -> Self {
                p.0[0]
            }

            fn buffer_from_dynamic(image: &DynamicImage) -> ForeignBuffer<Self> {
                image.$luma()
            }
        }

        impl BridgePixel for Rgb<$t> {
            type Foreign = image::Rgb<$t>;

            fn to_foreign(self) -> Self::Foreign {
                image::Rgb([self.r, self.g, self.b])
            }

            fn from_foreign(p: &Self::Foreign) -> Self {
                let [r, g, b] = p.0;
                Rgb::new(r, g, b)
            }

            fn buffer_from_dynamic(image: &DynamicImage) -> ForeignBuffer<Self> {
                image.$rgb()
            }
        }

        impl BridgePixel for Rgba<$t> {
            type Foreign = image::Rgba<$t>;

            fn to_foreign(self) -> Self::Foreign {
                image::Rgba([self.r, self.g, self.b, self.a])
            }

            fn from_foreign(p: &Self::Foreign) -> Self {
                let [r, g, b, a] = p.0;
                Rgba::new(r, g, b, a)
            }

            fn buffer_from_dynamic(image: &DynamicImage) -> ForeignBuffer<Self> {
                image.$rgba()
            }
        }
    };
}

impl_bridge_pixel!(u8, to_luma8, to_rgb8, to_rgba8);
impl_bridge_pixel!(u16, to_luma16, to_rgb16, to_rgba16);
impl_bridge_pixel!(f32, to_luma32f, to_rgb32f, to_rgba32f);

/// Copy an `image::ImageBuffer` into a 2-D [`Image`].
pub fn from_image_buffer<P: BridgePixel>(
    buffer: &ForeignBuffer<P>,
) -> Result<Image<P, 2>, BridgeError> {
    let size = [buffer.width() as usize, buffer.height() as usize];
    let pixels = buffer.pixels().map(P::from_foreign).collect();
    Image::from_pixels(size, pixels)
}

/// Copy a 2-D [`Image`] into an `image::ImageBuffer`.
///
/// Fails when either side exceeds `u32::MAX` pixels.
pub fn to_image_buffer<P: BridgePixel>(
    image: &Image<P, 2>,
) -> Result<ForeignBuffer<P>, BridgeError> {
    let too_large = || BridgeError::DimensionalityExceeded {
        dims: image.size().to_vec(),
    };
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;
    let pixels = image.pixels();
    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        pixels[x as usize + image.width() * y as usize].to_foreign()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_buffer_round_trips() {
        let buf = image::RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8, y as u8, 7]));
        let img = from_image_buffer::<Rgb<u8>>(&buf).unwrap();
        assert_eq!(img.size(), [3, 2]);
        assert_eq!(img.get([2, 1]), Some(&Rgb::new(2, 1, 7)));
        assert_eq!(to_image_buffer(&img).unwrap(), buf);
    }

    #[test]
    fn gray_float_buffer_round_trips() {
        let buf: ImageBuffer<image::Luma<f32>, Vec<f32>> =
            ImageBuffer::from_fn(2, 2, |x, y| image::Luma([x as f32 * 0.5 + y as f32]));
        let img = from_image_buffer::<f32>(&buf).unwrap();
        assert_eq!(img.pixels(), &[0.0, 0.5, 1.0, 1.5]);
        assert_eq!(to_image_buffer(&img).unwrap(), buf);
    }

    #[test]
    fn dynamic_images_convert_through_the_image_crate() {
        let gray = image::GrayImage::from_pixel(1, 1, image::Luma([9]));
        let gray = DynamicImage::ImageLuma8(gray);
        let rgba = <Rgba<u8>>::buffer_from_dynamic(&gray);
        assert_eq!(rgba.get_pixel(0, 0), &image::Rgba([9, 9, 9, 255]));
    }
}
