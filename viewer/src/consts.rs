//! Shared numeric constants for the viewer crate.

use std::f64::consts::PI;

// ── Scene ───────────────────────────────────────────────────────

/// Name of the group holding the active model.
pub const MODEL_GROUP_NAME: &str = "svgGroup";

/// Clear colour behind the model.
pub const BACKGROUND_COLOR: u32 = 0x00dc_dcdc;

// ── Extrusion ───────────────────────────────────────────────────

pub const SHOWCASE_DEPTH: f64 = 70.0;
pub const TURNTABLE_DEPTH: f64 = 20.0;
pub const BEVEL_THICKNESS: f64 = 1.0;
pub const BEVEL_SIZE: f64 = 1.0;
pub const BEVEL_OFFSET: f64 = 0.0;
pub const BEVEL_SEGMENTS: u32 = 3;

// ── Material ────────────────────────────────────────────────────

pub const MATERIAL_COLOR: u32 = 0x00ff_6b35;
pub const MATERIAL_SPECULAR: u32 = 0x0011_1111;
pub const MATERIAL_SHININESS: f64 = 35.0;

// ── Framing ─────────────────────────────────────────────────────

/// Largest extent of a framed model, in world units.
pub const TARGET_SIZE: f64 = 200.0;

/// Pan-box margins as fractions of the scaled model size.
pub const PAN_MARGIN_NEAR: f64 = 0.2;
pub const PAN_MARGIN_FAR: f64 = 0.5;
pub const PAN_MARGIN_DEPTH: f64 = 0.5;

/// Camera offset from the framed center, in multiples of the max extent.
pub const CAMERA_ELEVATION: f64 = 1.5;
pub const CAMERA_DISTANCE: f64 = 2.0;

// ── Camera ──────────────────────────────────────────────────────

pub const CAMERA_FOV_DEG: f64 = 45.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 2000.0;
pub const CAMERA_START: [f64; 3] = [200.0, 300.0, 200.0];

// ── Controls ────────────────────────────────────────────────────

pub const DAMPING_FACTOR: f64 = 0.1;
pub const PAN_SPEED: f64 = 0.5;
pub const ROTATE_SPEED: f64 = 0.5;
pub const MIN_DISTANCE: f64 = 50.0;
pub const SHOWCASE_MAX_DISTANCE: f64 = 400.0;
pub const TURNTABLE_MAX_DISTANCE: f64 = 1000.0;
pub const SHOWCASE_ZOOM_SPEED: f64 = 1.0;
pub const TURNTABLE_ZOOM_SPEED: f64 = 0.5;
pub const MIN_POLAR_ANGLE: f64 = 0.6;
pub const MAX_POLAR_ANGLE: f64 = 2.5;

/// Azimuth half-range when panning is enabled (π/3).
pub const AZIMUTH_LIMIT: f64 = PI / 3.0;

/// Per-notch wheel zoom factor before applying zoom speed.
pub const ZOOM_STEP: f64 = 0.95;

/// Keeps the polar angle away from the poles.
pub const POLAR_EPSILON: f64 = 1e-6;

// ── Lights ──────────────────────────────────────────────────────

pub const AMBIENT_COLOR: u32 = 0x0040_4040;
pub const AMBIENT_INTENSITY: f64 = 0.6;
pub const KEY_LIGHT_INTENSITY: f64 = 1.2;
pub const KEY_LIGHT_POSITION: [f64; 3] = [100.0, 200.0, 100.0];
pub const FILL_LIGHT_INTENSITY: f64 = 0.4;
pub const FILL_LIGHT_POSITION: [f64; 3] = [-100.0, 100.0, 100.0];
pub const SHADOW_MAP_SIZE: u32 = 2048;
pub const SHADOW_NEAR: f64 = 0.5;
pub const SHADOW_FAR: f64 = 500.0;
pub const SHADOW_EXTENT: f64 = 200.0;
