//! Planar points and polygon helpers.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in document space (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Signed shoelace area of a closed polygon.
///
/// The closing edge from the last point back to the first is implied. The
/// sign follows the winding in a y-up frame: counter-clockwise is positive.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

/// Even-odd point-in-polygon test (ray cast along +x).
#[must_use]
pub fn contains(polygon: &[Point2], point: Point2) -> bool {
    let mut inside = false;
    let n = polygon.len();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + n - 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Drop consecutive duplicates and a trailing point equal to the first.
#[must_use]
pub fn dedup_ring(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if ring.last().is_none_or(|last| last.distance(p) > tolerance) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring[0].distance(ring[ring.len() - 1]) <= tolerance {
        ring.pop();
    }
    ring
}
