//! Extraction settings.
//!
//! Defaults reproduce the tuned constants of the browser demo. Every field can
//! be overridden from JSON because the struct deserializes with
//! `#[serde(default)]`.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Longest side of the processed raster, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 512;

/// Sigma equivalent to a 3×3 Gaussian kernel with automatic sigma.
pub const DEFAULT_BLUR_SIGMA: f32 = 0.8;

/// Adaptive threshold neighbourhood, in pixels (odd).
pub const DEFAULT_THRESHOLD_BLOCK: u16 = 11;

/// Constant subtracted from the local mean before thresholding.
pub const DEFAULT_THRESHOLD_OFFSET: i16 = 2;

/// Canny hysteresis thresholds.
pub const DEFAULT_CANNY_LOW: f32 = 20.0;
pub const DEFAULT_CANNY_HIGH: f32 = 100.0;

/// Contours enclosing less than this fraction of the raster area are noise.
pub const DEFAULT_MIN_AREA_RATIO: f64 = 0.000_01;

/// Fill colour written on every extracted path.
pub const DEFAULT_FILL: &str = "black";

/// Which image feeds the Canny edge detector.
///
/// The demo computed an adaptive threshold and a morphologically cleaned copy
/// of it, but the edge map it traced came from a single buffer. These variants
/// make the choice explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSource {
    /// The blurred grayscale image.
    #[default]
    Blurred,
    /// The adaptive-threshold output.
    Thresholded,
    /// The adaptive-threshold output after open + close.
    Cleaned,
}

/// Settings for [`crate::extract()`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub max_dimension: u32,
    pub blur_sigma: f32,
    pub threshold_block: u16,
    pub threshold_offset: i16,
    pub canny_low: f32,
    pub canny_high: f32,
    pub min_area_ratio: f64,
    pub edge_source: EdgeSource,
    pub fill: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            blur_sigma: DEFAULT_BLUR_SIGMA,
            threshold_block: DEFAULT_THRESHOLD_BLOCK,
            threshold_offset: DEFAULT_THRESHOLD_OFFSET,
            canny_low: DEFAULT_CANNY_LOW,
            canny_high: DEFAULT_CANNY_HIGH,
            min_area_ratio: DEFAULT_MIN_AREA_RATIO,
            edge_source: EdgeSource::default(),
            fill: DEFAULT_FILL.to_owned(),
        }
    }
}

impl ExtractConfig {
    /// Gaussian sigma for the adaptive-threshold neighbourhood.
    ///
    /// Uses the usual automatic-sigma rule for a square kernel of side
    /// `threshold_block`: `0.3 · ((block − 1) / 2 − 1) + 0.8`.
    #[must_use]
    pub fn threshold_sigma(&self) -> f32 {
        let block = f32::from(self.threshold_block.max(1));
        0.3 * ((block - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Canny thresholds ordered so that `low <= high`.
    #[must_use]
    pub fn canny_thresholds(&self) -> (f32, f32) {
        (self.canny_low.min(self.canny_high), self.canny_low.max(self.canny_high))
    }
}
