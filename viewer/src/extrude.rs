//! Bevelled extrusion of planar shapes into triangle meshes.
//!
//! A [`Shape`] is an outer ring plus zero or more hole rings in the xy plane.
//! [`extrude`] sweeps it along +z by `depth`, adding `segments` bevel layers
//! at each end. Layer `b` of the front bevel sits at
//! `z = -thickness · cos(t·π/2)` and is offset outward by
//! `size · sin(t·π/2) + offset`, with `t = b / segments`. The back bevel
//! mirrors it past `depth`. Caps are ear-clipped on the original contour and
//! placed on the outermost layers; side walls are quads between
//! consecutive layers.

use std::f64::consts::FRAC_PI_2;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::consts::{BEVEL_OFFSET, BEVEL_SEGMENTS, BEVEL_SIZE, BEVEL_THICKNESS, SHOWCASE_DEPTH};

#[cfg(test)]
#[path = "extrude_test.rs"]
mod extrude_test;

/// Squared length limit of a bevel miter vector.
const MAX_MITER_SQ: f64 = 2.0;

/// Extrusion depth and bevel profile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtrudeOptions {
    pub depth: f64,
    pub bevel_enabled: bool,
    pub bevel_thickness: f64,
    pub bevel_size: f64,
    pub bevel_offset: f64,
    pub bevel_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: SHOWCASE_DEPTH,
            bevel_enabled: true,
            bevel_thickness: BEVEL_THICKNESS,
            bevel_size: BEVEL_SIZE,
            bevel_offset: BEVEL_OFFSET,
            bevel_segments: BEVEL_SEGMENTS,
        }
    }
}

impl ExtrudeOptions {
    /// The `(z, outward offset)` of every layer, front to back.
    #[must_use]
    pub fn layers(&self) -> Vec<(f64, f64)> {
        if !self.bevel_enabled || self.bevel_segments == 0 {
            return vec![(0.0, 0.0), (self.depth, 0.0)];
        }
        let segments = self.bevel_segments;
        let bevel = |b: u32| {
            let t = f64::from(b) / f64::from(segments);
            let z = self.bevel_thickness * (t * FRAC_PI_2).cos();
            let offset = self.bevel_size * (t * FRAC_PI_2).sin() + self.bevel_offset;
            (z, offset)
        };
        let full = self.bevel_size + self.bevel_offset;
        let mut layers = Vec::with_capacity(2 * segments as usize + 2);
        layers.extend((0..segments).map(|b| {
            let (z, offset) = bevel(b);
            (-z, offset)
        }));
        layers.push((0.0, full));
        layers.push((self.depth, full));
        layers.extend((0..segments).rev().map(|b| {
            let (z, offset) = bevel(b);
            (self.depth + z, offset)
        }));
        layers
    }
}

/// A planar region: one outer ring and any number of holes.
///
/// Rings are open (the closing edge is implied). Winding is normalized by
/// [`extrude`], so callers may pass either orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub outer: Vec<DVec2>,
    pub holes: Vec<Vec<DVec2>>,
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub positions: Vec<DVec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// The three corners of triangle `i`.
    #[must_use]
    pub fn triangle(&self, i: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[i];
        [self.positions[a as usize], self.positions[b as usize], self.positions[c as usize]]
    }
}

/// Why a shape could not be extruded.
#[derive(Debug, thiserror::Error)]
pub enum ExtrudeError {
    #[error("outer ring needs at least 3 points, got {0}")]
    Degenerate(usize),
    #[error("cap triangulation failed: {0}")]
    Triangulation(String),
    #[error("shape has too many vertices for 32-bit indices")]
    TooLarge,
}

/// Extrude `shape` into a closed solid.
///
/// # Errors
///
/// Returns [`ExtrudeError::Degenerate`] for an outer ring with fewer than three
/// points, [`ExtrudeError::Triangulation`] when the cap cannot be
/// triangulated, and [`ExtrudeError::TooLarge`] past `u32` indices.
pub fn extrude(shape: &Shape, options: &ExtrudeOptions) -> Result<Mesh, ExtrudeError> {
    if shape.outer.len() < 3 {
        return Err(ExtrudeError::Degenerate(shape.outer.len()));
    }

    // Outer counter-clockwise, holes clockwise: edge right-hand normals then face away from the solid.
    let mut rings = vec![oriented(&shape.outer, true)];
    rings.extend(shape.holes.iter().filter(|h| h.len() >= 3).map(|h| oriented(h, false)));

    let cap = triangulate_cap(&rings)?;
    let miters: Vec<Vec<DVec2>> = rings.iter().map(|r| miter_vectors(r)).collect();
    let ring_len: usize = rings.iter().map(Vec::len).sum();
    let layers = options.layers();
    if ring_len * layers.len() > u32::MAX as usize {
        return Err(ExtrudeError::TooLarge);
    }

    let mut mesh = Mesh::default();
    for &(z, offset) in &layers {
        for (ring, miter) in rings.iter().zip(&miters) {
            for (p, m) in ring.iter().zip(miter) {
                let q = *p + *m * offset;
                mesh.positions.push(DVec3::new(q.x, q.y, z));
            }
        }
    }

    let index = |layer: usize, vertex: usize| to_u32(layer * ring_len + vertex);
    let last = layers.len() - 1;
    for tri in cap.chunks_exact(3) {
        mesh.triangles.push([index(0, tri[2]), index(0, tri[1]), index(0, tri[0])]);
        mesh.triangles.push([index(last, tri[0]), index(last, tri[1]), index(last, tri[2])]);
    }

    let mut start = 0;
    for ring in &rings {
        let n = ring.len();
        for layer in 0..last {
            for j in 0..n {
                let k = (j + 1) % n;
                let a = index(layer, start + j);
                let b = index(layer, start + k);
                let c = index(layer + 1, start + k);
                let d = index(layer + 1, start + j);
                mesh.triangles.push([a, b, d]);
                mesh.triangles.push([b, c, d]);
            }
        }
        start += n;
    }
    Ok(mesh)
}

fn to_u32(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

fn ring_area(ring: &[DVec2]) -> f64 {
    let n = ring.len();
    (0..n).map(|i| ring[i].perp_dot(ring[(i + 1) % n])).sum::<f64>() * 0.5
}

fn oriented(ring: &[DVec2], counter_clockwise: bool) -> Vec<DVec2> {
    let mut out = ring.to_vec();
    if (ring_area(&out) > 0.0) != counter_clockwise {
        out.reverse();
    }
    out
}

/// Per-vertex bevel directions: the miter of the two adjacent edge normals,
/// scaled so that each edge moves by exactly one unit.
///
/// A miter longer than `sqrt(2)` is shortened to that length, so sharp
/// corners are clipped instead of spiking out.
fn miter_vectors(ring: &[DVec2]) -> Vec<DVec2> {
    let n = ring.len();
    let normal = |a: DVec2, b: DVec2| {
        let d = (b - a).normalize_or_zero();
        DVec2::new(d.y, -d.x)
    };
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let here = ring[i];
            let next = ring[(i + 1) % n];
            let n1 = normal(prev, here);
            let n2 = normal(here, next);
            let denom = 1.0 + n1.dot(n2);
            if denom < 1e-6 {
                return n1;
            }
            let miter = (n1 + n2) / denom;
            let len_sq = miter.length_squared();
            if len_sq > MAX_MITER_SQ { miter / (len_sq / MAX_MITER_SQ).sqrt() } else { miter }
        })
        .collect()
}

fn triangulate_cap(rings: &[Vec<DVec2>]) -> Result<Vec<usize>, ExtrudeError> {
    let mut flat = Vec::new();
    let mut hole_starts = Vec::new();
    for (i, ring) in rings.iter().enumerate() {
        if i > 0 {
            hole_starts.push(flat.len() / 2);
        }
        for p in ring {
            flat.push(p.x);
            flat.push(p.y);
        }
    }
    earcutr::earcut(&flat, &hole_starts, 2).map_err(|err| ExtrudeError::Triangulation(format!("{err:?}")))
}
