#![allow(clippy::float_cmp)]

use super::*;

use vectorize::geometry::Point2;
use vectorize::{FillRule, PathDocument, PathElement, Subpath};

use crate::extrude::ExtrudeOptions;
use crate::scene;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_eq(a: DVec3, b: DVec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn square_model(side: f64, options: &ExtrudeOptions) -> Model3D {
    let mut doc = PathDocument::new(side, side);
    doc.paths.push(PathElement {
        subpaths: vec![Subpath {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(side, 0.0),
                Point2::new(side, side),
                Point2::new(0.0, side),
            ],
            closed: true,
        }],
        fill: "black".to_owned(),
        fill_rule: FillRule::NonZero,
    });
    scene::build(&doc, options).expect("model")
}

fn flat(depth: f64) -> ExtrudeOptions {
    ExtrudeOptions { depth, bevel_enabled: false, ..ExtrudeOptions::default() }
}

fn xy_only() -> FramingPolicy {
    FramingPolicy { include_depth: false, ..FramingPolicy::default() }
}

// --- FramingPolicy ---

#[test]
fn default_policy_lifts_and_counts_depth() {
    let p = FramingPolicy::default();
    assert_eq!(p.target_size, 200.0);
    assert!(p.include_depth);
    assert_eq!(p.centering, Centering::Lift);
    assert_eq!(p.empty_model, EmptyModelPolicy::Reject);
}

#[test]
fn max_extent_respects_depth_switch() {
    let size = DVec3::new(100.0, 80.0, 150.0);
    assert_eq!(FramingPolicy::default().max_extent(size), 150.0);
    assert_eq!(xy_only().max_extent(size), 100.0);
}

// --- scale ---

#[test]
fn bevelled_square_scales_by_its_bevelled_width() {
    let model = square_model(100.0, &ExtrudeOptions::default());
    let view = frame(&model, &FramingPolicy::default()).expect("frame");
    assert!(approx_eq(view.max_size, 102.0));
    assert!(approx_eq(view.scale, 200.0 / 102.0));
}

#[test]
fn square_without_depth_scales_by_two() {
    let model = square_model(100.0, &flat(70.0));
    let view = frame(&model, &xy_only()).expect("frame");
    assert!(approx_eq(view.scale, 2.0));
}

#[test]
fn deep_extrusion_dominates_when_depth_counts() {
    let model = square_model(100.0, &flat(150.0));
    let with_depth = frame(&model, &FramingPolicy::default()).expect("frame");
    let without = frame(&model, &xy_only()).expect("frame");
    assert!(approx_eq(with_depth.scale, 200.0 / 150.0));
    assert!(approx_eq(without.scale, 2.0));
}

#[test]
fn placed_model_fits_target_size() {
    for (options, policy) in [
        (ExtrudeOptions::default(), FramingPolicy::default()),
        (flat(20.0), xy_only()),
        (flat(300.0), FramingPolicy { centering: Centering::Origin, ..FramingPolicy::default() }),
    ] {
        let mut model = square_model(37.0, &options);
        frame_and_place(&mut model, &policy).expect("frame");
        let size = model.world_bounds().expect("bounds").size();
        assert!((policy.max_extent(size) - 200.0).abs() < 1e-6);
    }
}

#[test]
fn framing_ignores_previous_placement() {
    let mut model = square_model(100.0, &flat(70.0));
    let first = frame_and_place(&mut model, &xy_only()).expect("frame");
    let second = frame_and_place(&mut model, &xy_only()).expect("frame");
    assert_eq!(first, second);
}

// --- centering ---

#[test]
fn lift_raises_by_half_scaled_depth() {
    let mut model = square_model(100.0, &flat(70.0));
    let view = frame_and_place(&mut model, &xy_only()).expect("frame");
    assert!(vec_eq(view.translation, DVec3::new(0.0, 70.0, 0.0)));
    assert!(vec_eq(model.position, view.translation));
    assert!(approx_eq(model.scale, 2.0));
}

#[test]
fn origin_centers_the_scaled_box() {
    let policy = FramingPolicy { centering: Centering::Origin, ..xy_only() };
    let mut model = square_model(100.0, &flat(70.0));
    let view = frame_and_place(&mut model, &policy).expect("frame");
    assert!(vec_eq(view.center, DVec3::ZERO));
    assert!(vec_eq(model.world_bounds().expect("bounds").center(), DVec3::ZERO));
}

// --- pan limits ---

#[test]
fn pan_box_is_skewed_around_group_position() {
    let view = frame(&square_model(100.0, &flat(70.0)), &xy_only()).expect("frame");
    assert!(vec_eq(view.pan_limits.min, DVec3::new(-40.0, 30.0, -70.0)));
    assert!(vec_eq(view.pan_limits.max, DVec3::new(100.0, 170.0, 70.0)));
}

#[test]
fn pan_clamp_moves_outside_points_to_the_faces() {
    let limits = PanLimits { min: DVec3::new(-1.0, -2.0, -3.0), max: DVec3::new(1.0, 2.0, 3.0) };
    let p = limits.clamp(DVec3::new(10.0, -10.0, 0.5));
    assert_eq!(p, DVec3::new(1.0, -2.0, 0.5));
    assert!(limits.contains(p));
}

#[test]
fn pan_clamp_leaves_inside_points_alone() {
    let limits = PanLimits { min: DVec3::splat(-5.0), max: DVec3::splat(5.0) };
    for p in [DVec3::ZERO, DVec3::splat(5.0), DVec3::new(-5.0, 4.9, 0.1)] {
        assert_eq!(limits.clamp(p), p);
    }
}

// --- camera ---

#[test]
fn camera_sits_above_and_in_front_of_center() {
    let view = frame(&square_model(100.0, &flat(70.0)), &xy_only()).expect("frame");
    assert!(vec_eq(view.center, DVec3::new(100.0, 170.0, 70.0)));
    assert!(vec_eq(view.camera.target, view.center));
    assert!(vec_eq(view.camera.position, DVec3::new(100.0, 470.0, 470.0)));
}

// --- empty models ---

#[test]
fn empty_model_is_rejected_by_default() {
    let model = Model3D::new("svgGroup");
    assert!(matches!(frame(&model, &FramingPolicy::default()), Err(FrameError::EmptyModel)));
}

#[test]
fn empty_model_leaves_placement_untouched_on_error() {
    let mut model = Model3D::new("svgGroup");
    model.scale = 3.0;
    assert!(frame_and_place(&mut model, &FramingPolicy::default()).is_err());
    assert_eq!(model.scale, 3.0);
}

#[test]
fn empty_model_gets_unit_scale_when_allowed() {
    let policy = FramingPolicy { empty_model: EmptyModelPolicy::UnitScale, ..FramingPolicy::default() };
    let view = frame(&Model3D::new("svgGroup"), &policy).expect("frame");
    assert_eq!(view.scale, 1.0);
    assert!(view.camera.position.is_finite());
    assert!(view.camera.position.z > view.center.z);
}

#[test]
fn policy_deserializes_with_defaults() {
    let p: FramingPolicy = serde_json::from_str(r#"{"centering":"origin","include_depth":false}"#).expect("json");
    assert_eq!(p.centering, Centering::Origin);
    assert!(!p.include_depth);
    assert_eq!(p.target_size, 200.0);
}
