//! External contour tracing over a binary edge map.

use image::GrayImage;
use imageproc::contours::{self, BorderType};

use crate::geometry::{Point2, signed_area};

#[cfg(test)]
#[path = "contour_test.rs"]
mod contour_test;

/// A closed outline traced around one connected edge region.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Vertices in tracing order; the closing edge back to the first is implied.
    pub points: Vec<Point2>,
    /// Enclosed area (absolute shoelace value) in square pixels.
    pub area: f64,
}

impl Contour {
    /// Build a contour from its vertices, computing the enclosed area.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        let area = signed_area(&points).abs();
        Self { points, area }
    }
}

/// Trace the outermost borders of every foreground region.
///
/// Any non-zero pixel is foreground. Borders nested inside another region
/// (holes and everything within them) are skipped. Contours are returned in
/// discovery order, i.e. raster order of their first pixel. Each chain is
/// compressed with [`compress_chain`].
#[must_use]
pub fn external_contours(edges: &GrayImage) -> Vec<Contour> {
    contours::find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.parent.is_none() && matches!(c.border_type, BorderType::Outer))
        .map(|c| {
            let chain: Vec<(i32, i32)> = c.points.iter().map(|p| (p.x, p.y)).collect();
            let points = compress_chain(&chain)
                .into_iter()
                .map(|(x, y)| Point2::new(f64::from(x), f64::from(y)))
                .collect();
            Contour::new(points)
        })
        .collect()
}

/// Compress a closed pixel chain to the endpoints of its straight runs.
///
/// A vertex is dropped when the step into it equals the step out of it, so
/// horizontal, vertical and diagonal runs collapse to their two ends. Chains
/// shorter than three points are returned unchanged.
#[must_use]
pub fn compress_chain(chain: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let n = chain.len();
    if n < 3 {
        return chain.to_vec();
    }
    let step = |from: (i32, i32), to: (i32, i32)| ((to.0 - from.0).signum(), (to.1 - from.1).signum());
    let kept: Vec<(i32, i32)> = (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let here = chain[i];
            let next = chain[(i + 1) % n];
            step(prev, here) != step(here, next)
        })
        .map(|i| chain[i])
        .collect();
    if kept.is_empty() { chain[..1].to_vec() } else { kept }
}

/// Keep contours whose area is at least `min_area`, preserving order.
#[must_use]
pub fn filter_by_area(contours: Vec<Contour>, min_area: f64) -> Vec<Contour> {
    contours.into_iter().filter(|c| c.area >= min_area).collect()
}
