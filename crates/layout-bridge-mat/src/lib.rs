//! Row-major interleaved gray/colour matrices and their planar-array form.
//!
//! A [`Mat`] is the classic computer-vision matrix layout: rows of
//! interleaved channel values, optionally padded to a row step.
//! [`mat_to_array`] slices it into per-channel planes and [`array_to_mat`]
//! interleaves the planes back.

mod bridge;
mod mat;

pub use bridge::{array_to_mat, mat_to_array, mats_to_array, MAX_MAT_CHANNELS};
pub use mat::Mat;
