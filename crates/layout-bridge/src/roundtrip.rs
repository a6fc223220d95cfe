//! Decode a file and push it through every layout conversion, counting
//! mismatches along the way.

use crate::interop::{from_image_buffer, BridgePixel};
use crate::io::{ArraySummary, BridgeIoError, RoundtripConfig, RoundtripReport, StageTimings};
use crate::load::dynamic_to_array;
use crate::mat::{array_to_mat, mat_to_array};
use crate::raster::{array_to_image, image_to_array, Rgb, Rgba};
use image::{DynamicImage, ImageReader};
use layout_bridge_core::{BridgeError, ElementType, PlanarArray};
use log::{debug, info};
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Debug, Default)]
struct Counts {
    image: usize,
    array: usize,
    mat: usize,
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1e3
}

fn pixel_name(dtype: ElementType, channels: usize) -> String {
    let kind = match channels {
        1 => "gray",
        3 => "rgb",
        4 => "rgba",
        _ => "unknown",
    };
    format!("{kind}<{dtype}>")
}

fn check<P: BridgePixel>(
    array: &PlanarArray,
    decoded: &DynamicImage,
    transpose: bool,
    timings: &mut StageTimings,
) -> Result<Counts, BridgeError> {
    let input = if transpose {
        array.transpose()?
    } else {
        array.clone()
    };

    let start = Instant::now();
    let image = array_to_image::<P, 2>(&input, transpose)?;
    timings.array_to_image_ms = elapsed_ms(start);

    let reference = from_image_buffer::<P>(&P::buffer_from_dynamic(decoded))?;
    let image_mismatches = if reference.size() == image.size() {
        image
            .pixels()
            .iter()
            .zip(reference.pixels())
            .filter(|(a, b)| a != b)
            .count()
    } else {
        image.pixels().len().max(reference.pixels().len())
    };

    let start = Instant::now();
    let back = image_to_array(&image)?;
    timings.image_to_array_ms = elapsed_ms(start);

    let start = Instant::now();
    let mat = array_to_mat(&input, transpose)?;
    let from_mat = mat_to_array(&mat, true)?;
    timings.mat_round_trip_ms = elapsed_ms(start);

    Ok(Counts {
        image: image_mismatches,
        array: array.count_mismatches(&back),
        mat: array.count_mismatches(&from_mat),
    })
}

fn dispatch(
    array: &PlanarArray,
    decoded: &DynamicImage,
    transpose: bool,
    timings: &mut StageTimings,
) -> Result<Counts, BridgeError> {
    match (array.dtype(), array.channels()) {
        (ElementType::U8, 1) => check::<u8>(array, decoded, transpose, timings),
        (ElementType::U8, 3) => check::<Rgb<u8>>(array, decoded, transpose, timings),
        (ElementType::U8, 4) => check::<Rgba<u8>>(array, decoded, transpose, timings),
        (ElementType::U16, 1) => check::<u16>(array, decoded, transpose, timings),
        (ElementType::U16, 3) => check::<Rgb<u16>>(array, decoded, transpose, timings),
        (ElementType::U16, 4) => check::<Rgba<u16>>(array, decoded, transpose, timings),
        (ElementType::F32, 1) => check::<f32>(array, decoded, transpose, timings),
        (ElementType::F32, 3) => check::<Rgb<f32>>(array, decoded, transpose, timings),
        (ElementType::F32, 4) => check::<Rgba<f32>>(array, decoded, transpose, timings),
        (ElementType::U8 | ElementType::U16 | ElementType::F32, channels) => {
            Err(BridgeError::UnsupportedChannelCount { channels })
        }
        (dtype, _) => Err(BridgeError::UnsupportedElementType { dtype }),
    }
}

/// Run the round trip described by `config`.
///
/// Failing to read or decode the file is an error. Conversion failures are
/// recorded in [`RoundtripReport::error`] so the report can still be written.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(config), fields(path = %config.image_path))
)]
pub fn run_roundtrip(config: &RoundtripConfig) -> Result<RoundtripReport, BridgeIoError> {
    let start = Instant::now();
    let decoded = ImageReader::open(&config.image_path)?
        .with_guessed_format()?
        .decode()?;
    let array = dynamic_to_array(&decoded)?;
    let mut timings = StageTimings {
        load_ms: elapsed_ms(start),
        ..StageTimings::default()
    };
    debug!("loaded {:?} {} array", array.dims(), array.dtype());

    let (counts, error) = match dispatch(&array, &decoded, config.transpose, &mut timings) {
        Ok(counts) => (counts, None),
        Err(err) => (Counts::default(), Some(err.to_string())),
    };

    let report = RoundtripReport {
        image_path: config.image_path.clone(),
        transpose: config.transpose,
        source: ArraySummary::of(&array),
        pixel: pixel_name(array.dtype(), array.channels()),
        image_mismatches: counts.image,
        array_mismatches: counts.array,
        mat_mismatches: counts.mat,
        timings,
        error,
    };
    info!(
        "{} as {}: image {} / array {} / mat {} mismatches",
        report.image_path,
        report.pixel,
        report.image_mismatches,
        report.array_mismatches,
        report.mat_mismatches
    );
    Ok(report)
}
