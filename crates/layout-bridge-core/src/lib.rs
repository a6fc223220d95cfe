//! Core types shared by the `layout-bridge-*` crates.
//!
//! This crate knows nothing about pixel types or matrices. It provides:
//! - [`ElementType`]/[`ElementBuffer`]: the closed set of runtime element types
//!   and their flat storage, with [`with_element_type!`] as the dispatch table,
//! - [`PlanarArray`]: a column-major, channel-planar array of up to 4 axes,
//! - [`BridgeError`]: the error kinds every conversion reports,
//! - a small stderr logger.

mod array;
mod dtype;
mod error;
mod logger;

pub use array::{Dims, PlanarArray};
pub use dtype::{Element, ElementBuffer, ElementType};
pub use error::{check_channels, checked_product, try_filled, try_vec, BridgeError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
