//! The raster-to-vector pipeline.
//!
//! Stages run in a fixed order over the whole raster:
//!
//! 1. resize to fit [`ExtractConfig::max_dimension`] (never upscaling)
//! 2. flatten onto white
//! 3. grayscale
//! 4. Gaussian blur
//! 5. edge source per [`EdgeSource`] (blurred, thresholded, or thresholded + open/close)
//! 6. Canny
//! 7. external contours with chain compression
//! 8. minimum-area filter
//! 9. one closed path per surviving contour

use image::{DynamicImage, GenericImageView, GrayImage};

use crate::config::{EdgeSource, ExtractConfig};
use crate::contour::{self, Contour};
use crate::document::PathDocument;
use crate::{ExtractError, raster};

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;

/// Contours traced from one raster, with the processed raster size.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    pub width: u32,
    pub height: u32,
    pub contours: Vec<Contour>,
}

/// Run stages 1–8 and return the surviving contours in discovery order.
///
/// # Errors
///
/// Returns [`ExtractError::EmptyImage`] when `image` has no pixels.
pub fn trace(image: &DynamicImage, config: &ExtractConfig) -> Result<ContourSet, ExtractError> {
    let (source_w, source_h) = image.dimensions();
    if source_w == 0 || source_h == 0 {
        return Err(ExtractError::EmptyImage);
    }

    let resized = raster::resize_to_fit(image, config.max_dimension);
    let (width, height) = resized.dimensions();
    let flattened = raster::flatten_on_white(&resized);
    drop(resized);
    let gray = raster::grayscale(&flattened);
    drop(flattened);

    let edges = edge_map(&gray, config);
    let traced = contour::external_contours(&edges);
    let found = traced.len();

    let min_area = config.min_area_ratio * f64::from(width) * f64::from(height);
    let contours = contour::filter_by_area(traced, min_area);
    tracing::debug!(
        source_w,
        source_h,
        width,
        height,
        found,
        kept = contours.len(),
        edge_source = ?config.edge_source,
        "traced contours"
    );
    Ok(ContourSet { width, height, contours })
}

/// Convert a decoded raster into a [`PathDocument`].
///
/// # Errors
///
/// Returns [`ExtractError::EmptyImage`] when `image` has no pixels.
pub fn extract(image: &DynamicImage, config: &ExtractConfig) -> Result<PathDocument, ExtractError> {
    let set = trace(image, config)?;
    let document = PathDocument::from_contours(set.width, set.height, &set.contours, &config.fill);
    tracing::info!(paths = document.paths.len(), width = set.width, height = set.height, "extracted vector paths");
    Ok(document)
}

/// Decode PNG or JPEG bytes, then [`extract`].
///
/// # Errors
///
/// Returns [`ExtractError::Decode`] when the bytes are not a supported image
/// and [`ExtractError::EmptyImage`] when it has no pixels.
pub fn extract_bytes(bytes: &[u8], config: &ExtractConfig) -> Result<PathDocument, ExtractError> {
    let image = image::load_from_memory(bytes)?;
    extract(&image, config)
}

/// Blur, pick the configured edge source, and run Canny on it.
fn edge_map(gray: &GrayImage, config: &ExtractConfig) -> GrayImage {
    let blurred = raster::blur(gray, config.blur_sigma);
    let source = match config.edge_source {
        EdgeSource::Blurred => blurred,
        EdgeSource::Thresholded => {
            raster::adaptive_threshold(&blurred, config.threshold_sigma(), config.threshold_offset)
        }
        EdgeSource::Cleaned => {
            let binary = raster::adaptive_threshold(&blurred, config.threshold_sigma(), config.threshold_offset);
            raster::open_close(&binary)
        }
    };
    let (low, high) = config.canny_thresholds();
    raster::canny(&source, low, high)
}
