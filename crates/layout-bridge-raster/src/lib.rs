//! Typed images and their conversion to and from planar arrays.
//!
//! An [`Image<P, D>`] stores pixels of a compile-time type `P` row-major with
//! channels interleaved, plus region, origin and spacing. A
//! [`PlanarArray`](layout_bridge_core::PlanarArray) stores the same data
//! column-major with one plane per channel.
//!
//! ## Quickstart
//!
//! ```
//! use layout_bridge_raster::{array_to_image, image_to_array, Image, Rgb};
//!
//! # fn main() -> Result<(), layout_bridge_core::BridgeError> {
//! let img = Image::<Rgb<u8>, 2>::from_pixels(
//!     [2, 1],
//!     vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)],
//! )?;
//!
//! let planar = image_to_array(&img)?;
//! assert_eq!(planar.dims(), [1, 2, 3, 1]);
//!
//! let back = array_to_image::<Rgb<u8>, 2>(&planar, false)?;
//! assert_eq!(back, img);
//! # Ok(())
//! # }
//! ```

mod bridge;
mod convert;
mod image;
mod pixel;

pub use bridge::{array_to_image, image_to_array};
pub use convert::convert_pixel_buffer;
pub use image::{Image, Region};
pub use pixel::{Component, Pixel, Rgb, Rgba};
