//! JSON configuration, report and summary types.

use layout_bridge_core::{BridgeError, ElementType, PlanarArray};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum BridgeIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

fn load_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T, BridgeIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), BridgeIoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Configuration for a round trip run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundtripConfig {
    pub image_path: String,
    /// Hand the converters a `(width, height, channels)` array and ask them
    /// to transpose it.
    #[serde(default)]
    pub transpose: bool,
    #[serde(default)]
    pub report_path: Option<String>,
}

impl RoundtripConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            transpose: false,
            report_path: None,
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, BridgeIoError> {
        load_json(path)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), BridgeIoError> {
        write_json(self, path)
    }

    /// Resolve the output report path.
    pub fn report_path(&self) -> PathBuf {
        self.report_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("roundtrip_report.json"))
    }
}

/// Value range of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: f64,
    pub max: f64,
}

/// Shape, element type and per-channel ranges of an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySummary {
    pub dims: [usize; 4],
    pub dtype: ElementType,
    pub channels: Vec<ChannelRange>,
}

impl ArraySummary {
    pub fn of(array: &PlanarArray) -> Self {
        let dims = array.dims();
        if array.is_empty() {
            return Self {
                dims,
                dtype: array.dtype(),
                channels: Vec::new(),
            };
        }

        let plane = dims[0] * dims[1];
        let mut channels = vec![
            ChannelRange {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            };
            dims[2]
        ];
        let data = array.data();
        for i in 0..array.elements() {
            if let Some(v) = data.get_f64(i) {
                let range = &mut channels[(i / plane) % dims[2]];
                range.min = range.min.min(v);
                range.max = range.max.max(v);
            }
        }
        Self {
            dims,
            dtype: array.dtype(),
            channels,
        }
    }
}

/// Wall-clock time of each round trip stage, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimings {
    pub load_ms: f64,
    pub array_to_image_ms: f64,
    pub image_to_array_ms: f64,
    pub mat_round_trip_ms: f64,
}

/// Outcome of a round trip run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundtripReport {
    pub image_path: String,
    pub transpose: bool,
    pub source: ArraySummary,
    /// Pixel type the array was converted to, e.g. `rgb<u8>`.
    pub pixel: String,
    /// Pixels differing from the `image` crate's own decode.
    pub image_mismatches: usize,
    /// Elements differing after array -> image -> array.
    pub array_mismatches: usize,
    /// Elements differing after array -> matrix -> array.
    pub mat_mismatches: usize,
    pub timings: StageTimings,
    #[serde(default)]
    pub error: Option<String>,
}

impl RoundtripReport {
    pub fn passed(&self) -> bool {
        self.error.is_none()
            && self.image_mismatches == 0
            && self.array_mismatches == 0
            && self.mat_mismatches == 0
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, BridgeIoError> {
        load_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), BridgeIoError> {
        write_json(self, path)
    }
}
