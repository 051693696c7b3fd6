#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn square(x: f64, y: f64, side: f64) -> Vec<DVec2> {
    vec![
        DVec2::new(x, y),
        DVec2::new(x + side, y),
        DVec2::new(x + side, y + side),
        DVec2::new(x, y + side),
    ]
}

fn bounds(mesh: &Mesh) -> (DVec3, DVec3) {
    let min = mesh.positions.iter().fold(DVec3::splat(f64::INFINITY), |m, p| m.min(*p));
    let max = mesh.positions.iter().fold(DVec3::splat(f64::NEG_INFINITY), |m, p| m.max(*p));
    (min, max)
}

fn flat() -> ExtrudeOptions {
    ExtrudeOptions { depth: 10.0, bevel_enabled: false, ..ExtrudeOptions::default() }
}

// --- ExtrudeOptions ---

#[test]
fn default_options_match_showcase_profile() {
    let opts = ExtrudeOptions::default();
    assert_eq!(opts.depth, 70.0);
    assert!(opts.bevel_enabled);
    assert_eq!(opts.bevel_thickness, 1.0);
    assert_eq!(opts.bevel_size, 1.0);
    assert_eq!(opts.bevel_offset, 0.0);
    assert_eq!(opts.bevel_segments, 3);
}

#[test]
fn bevelled_layers_run_front_to_back() {
    let layers = ExtrudeOptions::default().layers();
    assert_eq!(layers.len(), 8);
    assert!(approx_eq(layers[0].0, -1.0));
    assert!(approx_eq(layers[0].1, 0.0));
    assert!(approx_eq(layers[1].0, -(std::f64::consts::FRAC_PI_6.cos())));
    assert!(approx_eq(layers[1].1, 0.5));
    assert_eq!(layers[3], (0.0, 1.0));
    assert_eq!(layers[4], (70.0, 1.0));
    assert!(approx_eq(layers[7].0, 71.0));
    assert!(approx_eq(layers[7].1, 0.0));
    assert!(layers.windows(2).all(|w| w[0].0 <= w[1].0));
}

#[test]
fn unbevelled_layers_are_just_the_two_faces() {
    assert_eq!(flat().layers(), vec![(0.0, 0.0), (10.0, 0.0)]);
}

// --- extrude ---

#[test]
fn flat_square_has_eight_vertices_and_twelve_triangles() {
    let mesh = extrude(&Shape { outer: square(0.0, 0.0, 10.0), holes: vec![] }, &flat()).expect("mesh");
    assert_eq!(mesh.positions.len(), 8);
    assert_eq!(mesh.triangles.len(), 12);
}

#[test]
fn bevelled_square_grows_by_bevel_size_and_thickness() {
    let mesh = extrude(&Shape { outer: square(0.0, 0.0, 100.0), holes: vec![] }, &ExtrudeOptions::default())
        .expect("mesh");
    let (min, max) = bounds(&mesh);
    assert!(approx_eq(min.x, -1.0) && approx_eq(min.y, -1.0) && approx_eq(min.z, -1.0));
    assert!(approx_eq(max.x, 101.0) && approx_eq(max.y, 101.0) && approx_eq(max.z, 71.0));
}

#[test]
fn sharp_corner_bevel_is_clipped() {
    let sliver = vec![DVec2::new(0.0, 0.0), DVec2::new(100.0, 0.0), DVec2::new(0.0, 1.0)];
    let mesh = extrude(&Shape { outer: sliver, holes: vec![] }, &ExtrudeOptions::default()).expect("mesh");
    let (min, max) = bounds(&mesh);
    assert!(min.is_finite() && max.is_finite());
    let limit = std::f64::consts::SQRT_2 + EPSILON;
    assert!(max.x <= 100.0 + limit, "max x {}", max.x);
    assert!(min.x >= -limit && min.y >= -limit && max.y <= 1.0 + limit);
    assert!(max.x - min.x < 103.0, "width {}", max.x - min.x);
}

#[test]
fn winding_of_input_does_not_change_the_solid() {
    let mut reversed = square(0.0, 0.0, 100.0);
    reversed.reverse();
    let a = extrude(&Shape { outer: square(0.0, 0.0, 100.0), holes: vec![] }, &ExtrudeOptions::default())
        .expect("mesh");
    let b = extrude(&Shape { outer: reversed, holes: vec![] }, &ExtrudeOptions::default()).expect("mesh");
    assert_eq!(bounds(&a), bounds(&b));
    assert_eq!(a.triangles.len(), b.triangles.len());
}

#[test]
fn square_with_hole_triangulates_caps_and_both_walls() {
    let shape = Shape { outer: square(0.0, 0.0, 100.0), holes: vec![square(40.0, 40.0, 20.0)] };
    let mesh = extrude(&shape, &flat()).expect("mesh");
    assert_eq!(mesh.positions.len(), 16);
    // 8 cap triangles per face, 8 edges × 2 triangles of wall.
    assert_eq!(mesh.triangles.len(), 32);
}

#[test]
fn bevel_pushes_hole_walls_into_the_hole() {
    let shape = Shape { outer: square(0.0, 0.0, 100.0), holes: vec![square(40.0, 40.0, 20.0)] };
    let mesh = extrude(&shape, &ExtrudeOptions::default()).expect("mesh");
    let found = mesh
        .positions
        .iter()
        .any(|p| approx_eq(p.x, 41.0) && approx_eq(p.y, 41.0) && approx_eq(p.z, 0.0));
    assert!(found);
}

#[test]
fn every_index_is_in_range() {
    let shape = Shape { outer: square(0.0, 0.0, 50.0), holes: vec![square(10.0, 10.0, 5.0)] };
    let mesh = extrude(&shape, &ExtrudeOptions::default()).expect("mesh");
    let n = u32::try_from(mesh.positions.len()).expect("fits");
    assert!(mesh.triangles.iter().flatten().all(|&i| i < n));
}

#[test]
fn degenerate_outer_ring_is_rejected() {
    let shape = Shape { outer: vec![DVec2::ZERO, DVec2::X], holes: vec![] };
    assert!(matches!(extrude(&shape, &flat()), Err(ExtrudeError::Degenerate(2))));
}

#[test]
fn triangle_accessor_returns_corner_positions() {
    let mesh = extrude(&Shape { outer: square(0.0, 0.0, 10.0), holes: vec![] }, &flat()).expect("mesh");
    let [a, b, c] = mesh.triangle(0);
    assert!(a.z == 0.0 && b.z == 0.0 && c.z == 0.0);
}
