//! The vector document exchanged between extraction and scene building.
//!
//! A [`PathDocument`] is a canvas size plus a list of filled paths. Each path
//! holds one or more subpaths of straight segments. Serialization writes SVG
//! with the `svg` crate; parsing reads the same subset back and additionally
//! accepts relative commands, `H`/`V`, and flattens `C`/`Q` curves so that
//! hand-made SVG files load too.
//!
//! Coordinates are `f64` in memory but pass through `f32` on the way to and
//! from markup, since the `svg` crate's path data is single precision.

use std::collections::HashMap;

use svg::Document;
use svg::node::Value;
use svg::node::element::Path;
use svg::node::element::path::{Command, Data, Position};
use svg::node::element::tag::Type;
use svg::parser::Event;

use crate::DocumentError;
use crate::contour::Contour;
use crate::geometry::Point2;

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

/// Line segments used to approximate one curve command.
pub const CURVE_SEGMENTS: usize = 12;

/// Fill used when a path carries no `fill` attribute.
const IMPLICIT_FILL: &str = "black";

/// One run of connected segments started by a move-to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    pub points: Vec<Point2>,
    /// Ended by an explicit close command.
    pub closed: bool,
}

/// How the subpaths of one path decide which regions are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Filled where the winding number is not zero. The SVG default.
    #[default]
    NonZero,
    /// Filled where a ray crosses an odd number of edges.
    EvenOdd,
}

impl FillRule {
    /// Read a `fill-rule` attribute value; anything but `evenodd` is nonzero.
    #[must_use]
    pub fn from_attribute(raw: &str) -> Self {
        if raw.trim() == "evenodd" { Self::EvenOdd } else { Self::NonZero }
    }
}

/// A single `<path>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub subpaths: Vec<Subpath>,
    pub fill: String,
    pub fill_rule: FillRule,
}

/// A vector document: canvas size and filled paths in paint order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathDocument {
    pub width: f64,
    pub height: f64,
    pub paths: Vec<PathElement>,
}

impl PathDocument {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, paths: Vec::new() }
    }

    /// One closed single-subpath element per contour, in the given order.
    #[must_use]
    pub fn from_contours(width: u32, height: u32, contours: &[Contour], fill: &str) -> Self {
        let paths = contours
            .iter()
            .filter(|c| !c.points.is_empty())
            .map(|c| PathElement {
                subpaths: vec![Subpath { points: c.points.clone(), closed: true }],
                fill: fill.to_owned(),
                fill_rule: FillRule::NonZero,
            })
            .collect();
        Self { width: f64::from(width), height: f64::from(height), paths }
    }

    /// Whether the document contains no drawable subpath.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths
            .iter()
            .all(|p| p.subpaths.iter().all(|s| s.points.is_empty()))
    }

    /// Serialize as SVG markup.
    ///
    /// The root carries `width`, `height` and a matching `viewBox`. Each path
    /// is written as absolute `M`/`L` commands, with `Z` on closed subpaths,
    /// plus its `fill` attribute. `fill-rule` is written only for even-odd.
    ///
    /// Coordinates are rounded to `f32`, the precision [`parse`](Self::parse)
    /// reads back.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut document = Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0.0, 0.0, self.width, self.height));
        for element in &self.paths {
            if element.subpaths.iter().all(|s| s.points.is_empty()) {
                continue;
            }
            let mut path = Path::new()
                .set("d", path_data(&element.subpaths))
                .set("fill", element.fill.as_str());
            if element.fill_rule == FillRule::EvenOdd {
                path = path.set("fill-rule", "evenodd");
            }
            document = document.add(path);
        }
        document.to_string()
    }

    /// Parse SVG markup.
    ///
    /// Size comes from the root `width`/`height` (a `px` suffix is accepted),
    /// falling back to the `viewBox` and then to zero. Every `<path>` is read
    /// regardless of nesting, with its `fill` (default black) and `fill-rule`
    /// (default nonzero). A path whose data is malformed or uses an
    /// unsupported command (`A`, `S`, `T`) is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Markup`] for malformed markup,
    /// [`DocumentError::MissingRoot`] when there is no `<svg>` element and
    /// [`DocumentError::InvalidNumber`] for an unparsable root dimension.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let mut document: Option<Self> = None;
        let mut skipped = 0_usize;
        for event in svg::Parser::new(text) {
            match event {
                Event::Error(err) => return Err(DocumentError::Markup(err.to_string())),
                Event::Tag("svg", Type::Start | Type::Empty, attributes) => {
                    if document.is_none() {
                        document = Some(root_from_attributes(&attributes)?);
                    }
                }
                Event::Tag("path", Type::Start | Type::Empty, attributes) => {
                    let Some(doc) = document.as_mut() else {
                        continue;
                    };
                    let Some(d) = attributes.get("d") else {
                        continue;
                    };
                    match parse_path_data(&d.to_string()) {
                        Ok(subpaths) => {
                            let fill = attributes
                                .get("fill")
                                .map_or_else(|| IMPLICIT_FILL.to_owned(), ToString::to_string);
                            let fill_rule = attributes
                                .get("fill-rule")
                                .map_or(FillRule::NonZero, |raw| FillRule::from_attribute(raw));
                            doc.paths.push(PathElement { subpaths, fill, fill_rule });
                        }
                        Err(err) => {
                            skipped += 1;
                            tracing::warn!(error = %err, "skipping path");
                        }
                    }
                }
                _ => {}
            }
        }
        let document = document.ok_or(DocumentError::MissingRoot)?;
        tracing::debug!(paths = document.paths.len(), skipped, "parsed vector document");
        Ok(document)
    }
}

/// Absolute path data for `subpaths`, narrowed to the `f32` the `svg` crate stores.
#[allow(clippy::cast_possible_truncation)]
fn path_data(subpaths: &[Subpath]) -> Data {
    let mut data = Data::new();
    for subpath in subpaths {
        let Some((first, rest)) = subpath.points.split_first() else {
            continue;
        };
        data = data.move_to((first.x as f32, first.y as f32));
        for p in rest {
            data = data.line_to((p.x as f32, p.y as f32));
        }
        if subpath.closed {
            data = data.close();
        }
    }
    data
}

fn root_from_attributes(attributes: &HashMap<String, Value>) -> Result<PathDocument, DocumentError> {
    let view_box = match attributes.get("viewBox") {
        Some(raw) => parse_view_box(&raw.to_string())?,
        None => None,
    };
    let width = match attributes.get("width") {
        Some(raw) => parse_length("width", &raw.to_string())?,
        None => view_box.map_or(0.0, |(w, _)| w),
    };
    let height = match attributes.get("height") {
        Some(raw) => parse_length("height", &raw.to_string())?,
        None => view_box.map_or(0.0, |(_, h)| h),
    };
    Ok(PathDocument::new(width, height))
}

fn parse_length(attribute: &str, raw: &str) -> Result<f64, DocumentError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number.trim().parse::<f64>().map_err(|_| DocumentError::InvalidNumber {
        attribute: attribute.to_owned(),
        value: raw.to_owned(),
    })
}

/// Width and height from a `viewBox`, if it has four numbers.
fn parse_view_box(raw: &str) -> Result<Option<(f64, f64)>, DocumentError> {
    let parts: Vec<&str> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 4 {
        return Ok(None);
    }
    let width = parse_length("viewBox", parts[2])?;
    let height = parse_length("viewBox", parts[3])?;
    Ok(Some((width, height)))
}

/// Why a single path's data was rejected.
#[derive(Debug, thiserror::Error)]
pub enum PathDataError {
    #[error("invalid path data: {0}")]
    Syntax(String),
    #[error("unsupported path command {0:?}")]
    Unsupported(char),
}

/// Decode a `d` attribute into subpaths of absolute points.
///
/// # Errors
///
/// Returns [`PathDataError::Syntax`] when the data does not parse and
/// [`PathDataError::Unsupported`] for arc and smooth-curve commands.
pub fn parse_path_data(d: &str) -> Result<Vec<Subpath>, PathDataError> {
    let data = Data::parse(d).map_err(|err| PathDataError::Syntax(err.to_string()))?;
    let mut pen = Pen::default();
    for command in data.iter() {
        match command {
            Command::Move(position, params) => {
                let relative = is_relative(position);
                for (i, pair) in params.chunks_exact(2).enumerate() {
                    let p = pen.resolve(relative, pair[0], pair[1]);
                    if i == 0 {
                        pen.move_to(p);
                    } else {
                        pen.line_to(p);
                    }
                }
            }
            Command::Line(position, params) => {
                let relative = is_relative(position);
                for pair in params.chunks_exact(2) {
                    let p = pen.resolve(relative, pair[0], pair[1]);
                    pen.line_to(p);
                }
            }
            Command::HorizontalLine(position, params) => {
                for &x in params.iter() {
                    let x = f64::from(x);
                    let p = if is_relative(position) {
                        Point2::new(pen.current.x + x, pen.current.y)
                    } else {
                        Point2::new(x, pen.current.y)
                    };
                    pen.line_to(p);
                }
            }
            Command::VerticalLine(position, params) => {
                for &y in params.iter() {
                    let y = f64::from(y);
                    let p = if is_relative(position) {
                        Point2::new(pen.current.x, pen.current.y + y)
                    } else {
                        Point2::new(pen.current.x, y)
                    };
                    pen.line_to(p);
                }
            }
            Command::CubicCurve(position, params) => {
                let relative = is_relative(position);
                for group in params.chunks_exact(6) {
                    let c1 = pen.resolve(relative, group[0], group[1]);
                    let c2 = pen.resolve(relative, group[2], group[3]);
                    let end = pen.resolve(relative, group[4], group[5]);
                    pen.cubic_to(c1, c2, end);
                }
            }
            Command::QuadraticCurve(position, params) => {
                let relative = is_relative(position);
                for group in params.chunks_exact(4) {
                    let control = pen.resolve(relative, group[0], group[1]);
                    let end = pen.resolve(relative, group[2], group[3]);
                    pen.quadratic_to(control, end);
                }
            }
            Command::SmoothCubicCurve(..) => return Err(PathDataError::Unsupported('S')),
            Command::SmoothQuadraticCurve(..) => return Err(PathDataError::Unsupported('T')),
            Command::EllipticalArc(..) => return Err(PathDataError::Unsupported('A')),
            Command::Close => pen.close(),
        }
    }
    Ok(pen.finish())
}

fn is_relative(position: &Position) -> bool {
    matches!(position, Position::Relative)
}

/// Cursor state while walking path commands.
#[derive(Default)]
struct Pen {
    done: Vec<Subpath>,
    points: Vec<Point2>,
    current: Point2,
    start: Point2,
}

impl Pen {
    fn resolve(&self, relative: bool, x: f32, y: f32) -> Point2 {
        let (x, y) = (f64::from(x), f64::from(y));
        if relative {
            Point2::new(self.current.x + x, self.current.y + y)
        } else {
            Point2::new(x, y)
        }
    }

    fn flush_open(&mut self) {
        if !self.points.is_empty() {
            let points = std::mem::take(&mut self.points);
            self.done.push(Subpath { points, closed: false });
        }
    }

    fn move_to(&mut self, p: Point2) {
        self.flush_open();
        self.points.push(p);
        self.current = p;
        self.start = p;
    }

    fn line_to(&mut self, p: Point2) {
        if self.points.is_empty() {
            self.points.push(self.current);
        }
        self.points.push(p);
        self.current = p;
    }

    #[allow(clippy::cast_precision_loss)]
    fn cubic_to(&mut self, c1: Point2, c2: Point2, end: Point2) {
        let p0 = self.current;
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f64 / CURVE_SEGMENTS as f64;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            self.line_to(Point2::new(
                a * p0.x + b * c1.x + c * c2.x + d * end.x,
                a * p0.y + b * c1.y + c * c2.y + d * end.y,
            ));
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn quadratic_to(&mut self, control: Point2, end: Point2) {
        let p0 = self.current;
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f64 / CURVE_SEGMENTS as f64;
            let u = 1.0 - t;
            let (a, b, c) = (u * u, 2.0 * u * t, t * t);
            self.line_to(Point2::new(
                a * p0.x + b * control.x + c * end.x,
                a * p0.y + b * control.y + c * end.y,
            ));
        }
    }

    fn close(&mut self) {
        if !self.points.is_empty() {
            let points = std::mem::take(&mut self.points);
            self.done.push(Subpath { points, closed: true });
        }
        self.current = self.start;
    }

    fn finish(mut self) -> Vec<Subpath> {
        self.flush_open();
        self.done
    }
}
