//! High-level facade for the `layout-bridge-*` workspace.
//!
//! This crate provides:
//! - re-exports of the planar array core, the typed image bridge and the
//!   interleaved matrix bridge,
//! - (feature `image`) decoding image files straight into planar arrays,
//!   conversions to and from `image::ImageBuffer`, and an end-to-end round
//!   trip check used by the `layout-bridge` CLI.
//!
//! ## Quickstart
//!
//! ```no_run
//! use layout_bridge::load::load_array;
//! use layout_bridge::raster::{array_to_image, image_to_array, Image, Rgb};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let array = load_array("photo.png")?;
//! let image: Image<Rgb<u8>, 2> = array_to_image(&array, false)?;
//! assert_eq!(image_to_array(&image)?, array);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `layout_bridge::core`: element types, `PlanarArray`, errors, logging.
//! - `layout_bridge::raster`: pixel types, `Image<P, D>`, array <-> image.
//! - `layout_bridge::mat`: `Mat`, array <-> interleaved matrix.
//! - `layout_bridge::io`: JSON config, report and summary types.
//! - `layout_bridge::load`, `interop`, `roundtrip` (feature `image`).

pub use layout_bridge_core as core;
pub use layout_bridge_mat as mat;
pub use layout_bridge_raster as raster;

pub use layout_bridge_core::{BridgeError, ElementType, PlanarArray};
pub use layout_bridge_mat::Mat;
pub use layout_bridge_raster::{Image, Pixel};

pub mod io;

#[cfg(feature = "image")]
pub mod interop;
#[cfg(feature = "image")]
pub mod load;
#[cfg(feature = "image")]
pub mod roundtrip;
