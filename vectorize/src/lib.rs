//! Raster-to-vector path extraction for the extrusion viewer.
//!
//! This crate turns a decoded raster into a [`PathDocument`]: a small vector
//! document made of closed straight-line paths, one per detected outline. The
//! same document type is also parsed from user-supplied SVG text, so it is the
//! interchange format between extraction and scene building.
//!
//! Nothing here touches the browser. Every intermediate buffer is an owned
//! image that drops at the end of the call that created it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`extract`] | The fixed pipeline: resize, flatten, gray, blur, edges, contours, filter |
//! | [`raster`] | Whole-image filters used by the pipeline |
//! | [`contour`] | External contour tracing, chain compression, area filter |
//! | [`document`] | [`PathDocument`] model, SVG serialization and parsing |
//! | [`geometry`] | 2-D points and polygon helpers shared with the scene builder |
//! | [`config`] | [`ExtractConfig`] and its defaults |

pub mod config;
pub mod contour;
pub mod document;
pub mod extract;
pub mod geometry;
pub mod raster;

pub use config::{EdgeSource, ExtractConfig};
pub use document::{FillRule, PathDocument, PathElement, Subpath};
pub use extract::{ContourSet, extract, extract_bytes, trace};
pub use geometry::Point2;

/// Error returned by [`extract()`] and [`extract_bytes()`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The input bytes are not a decodable PNG or JPEG image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// The decoded image has zero width or height.
    #[error("image has zero width or height")]
    EmptyImage,
}

/// Error returned by [`PathDocument::parse`].
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The markup itself is malformed.
    #[error("malformed vector markup: {0}")]
    Markup(String),
    /// No `<svg>` root element was found.
    #[error("document has no <svg> root element")]
    MissingRoot,
    /// A numeric attribute on the root element could not be parsed.
    #[error("invalid number for {attribute}: {value:?}")]
    InvalidNumber { attribute: String, value: String },
}
