//! Damped orbit controls.
//!
//! The camera orbits a target on a sphere described by [`Spherical`]
//! (radius, azimuth `theta` about +y, polar `phi` from +y). Input handlers only
//! accumulate deltas. [`OrbitControls::update`] runs once per frame and applies
//! a `damping` fraction of every pending delta before decaying the rest, so
//! motion eases out over several frames.
//!
//! Clamps applied on every update, in order:
//!
//! | Quantity | Range |
//! |----------|-------|
//! | azimuth  | `±azimuth_limit` when [`PanMode::Limited`], free otherwise |
//! | polar    | `[min_polar, max_polar]`, never touching the poles |
//! | distance | `[min_distance, max_distance]` |

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::camera::PerspectiveCamera;
use crate::consts::{
    AZIMUTH_LIMIT, DAMPING_FACTOR, MAX_POLAR_ANGLE, MIN_DISTANCE, MIN_POLAR_ANGLE, PAN_SPEED, POLAR_EPSILON,
    ROTATE_SPEED, SHOWCASE_MAX_DISTANCE, SHOWCASE_ZOOM_SPEED, TURNTABLE_MAX_DISTANCE, TURNTABLE_ZOOM_SPEED, ZOOM_STEP,
};
use crate::frame::{CameraPose, PanLimits};

#[cfg(test)]
#[path = "controls_test.rs"]
mod controls_test;

/// Movement below this is treated as no change.
const CHANGE_EPSILON: f64 = 1e-6;

/// Panning and the azimuth limit switch together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanMode {
    /// Panning on; azimuth kept within `±azimuth_limit`.
    #[default]
    Limited,
    /// Panning off; azimuth free.
    Disabled,
}

/// Orbit-control settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub damping: f64,
    pub pan_speed: f64,
    pub rotate_speed: f64,
    pub zoom_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar: f64,
    pub max_polar: f64,
    pub pan_mode: PanMode,
    pub azimuth_limit: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self::showcase()
    }
}

impl ControlsConfig {
    /// Pan on, limited azimuth, close zoom range.
    #[must_use]
    pub fn showcase() -> Self {
        Self {
            damping: DAMPING_FACTOR,
            pan_speed: PAN_SPEED,
            rotate_speed: ROTATE_SPEED,
            zoom_speed: SHOWCASE_ZOOM_SPEED,
            min_distance: MIN_DISTANCE,
            max_distance: SHOWCASE_MAX_DISTANCE,
            min_polar: MIN_POLAR_ANGLE,
            max_polar: MAX_POLAR_ANGLE,
            pan_mode: PanMode::Limited,
            azimuth_limit: AZIMUTH_LIMIT,
        }
    }

    /// Pan off, free azimuth, wide and slower zoom.
    #[must_use]
    pub fn turntable() -> Self {
        Self {
            zoom_speed: TURNTABLE_ZOOM_SPEED,
            max_distance: TURNTABLE_MAX_DISTANCE,
            pan_mode: PanMode::Disabled,
            ..Self::showcase()
        }
    }

    #[must_use]
    pub fn pan_enabled(&self) -> bool {
        self.pan_mode == PanMode::Limited
    }

    /// Allowed azimuth interval, or `None` when the azimuth is free.
    #[must_use]
    pub fn azimuth_range(&self) -> Option<(f64, f64)> {
        match self.pan_mode {
            PanMode::Limited => Some((-self.azimuth_limit, self.azimuth_limit)),
            PanMode::Disabled => None,
        }
    }

    /// Dolly factor for one wheel notch or drag step.
    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        ZOOM_STEP.powf(self.zoom_speed)
    }
}

/// Spherical coordinates with +y as the pole.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    pub radius: f64,
    /// Azimuth about +y, measured from +z toward +x.
    pub theta: f64,
    /// Polar angle from +y.
    pub phi: f64,
}

impl Spherical {
    #[must_use]
    pub fn from_offset(offset: DVec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self { radius, theta: offset.x.atan2(offset.z), phi: (offset.y / radius).clamp(-1.0, 1.0).acos() }
    }

    #[must_use]
    pub fn to_offset(self) -> DVec3 {
        let ring = self.phi.sin() * self.radius;
        DVec3::new(ring * self.theta.sin(), self.phi.cos() * self.radius, ring * self.theta.cos())
    }
}

/// Wrap an angle into `(-π, π]`.
fn wrap_angle(a: f64) -> f64 {
    let wrapped = (a + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Orbit state between frames.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub config: ControlsConfig,
    pub target: DVec3,
    /// Pending azimuth/polar change; `radius` is unused.
    delta: Spherical,
    /// Pending dolly factor.
    scale: f64,
    /// Pending target translation.
    pan_offset: DVec3,
}

impl OrbitControls {
    #[must_use]
    pub fn new(config: ControlsConfig) -> Self {
        Self { config, target: DVec3::ZERO, delta: Spherical::default(), scale: 1.0, pan_offset: DVec3::ZERO }
    }

    /// Move camera and target to `pose`, drop pending motion, and settle once.
    pub fn reset(&mut self, camera: &mut PerspectiveCamera, pose: &CameraPose) {
        self.delta = Spherical::default();
        self.scale = 1.0;
        self.pan_offset = DVec3::ZERO;
        self.target = pose.target;
        camera.position = pose.position;
        camera.look_at(pose.target);
        self.update(camera);
    }

    /// Whether any motion is still pending.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.delta.theta.abs() > CHANGE_EPSILON
            || self.delta.phi.abs() > CHANGE_EPSILON
            || self.pan_offset.length() > CHANGE_EPSILON
            || (self.scale - 1.0).abs() > CHANGE_EPSILON
    }

    // --- Input ---

    /// Queue an orbit for a pointer drag of `(dx, dy)` CSS pixels.
    pub fn rotate_by_pixels(&mut self, dx: f64, dy: f64, viewport_height: f64) {
        if viewport_height <= 0.0 {
            return;
        }
        self.delta.theta -= TAU * dx / viewport_height * self.config.rotate_speed;
        self.delta.phi -= TAU * dy / viewport_height * self.config.rotate_speed;
    }

    /// Queue a screen-space pan for a pointer drag of `(dx, dy)` CSS pixels.
    ///
    /// Ignored when panning is disabled.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64, camera: &PerspectiveCamera, viewport_height: f64) {
        if !self.config.pan_enabled() || viewport_height <= 0.0 {
            return;
        }
        let distance = (camera.position - self.target).length() * (camera.fov_deg.to_radians() / 2.0).tan();
        let per_pixel = 2.0 * distance / viewport_height * self.config.pan_speed;
        self.pan_offset += -camera.right() * (dx * per_pixel) + camera.screen_up() * (dy * per_pixel);
    }

    /// Queue a dolly for a vertical drag of `dy` pixels. Down moves away.
    pub fn dolly_by_pixels(&mut self, dy: f64) {
        if dy > 0.0 {
            self.dolly_out();
        } else if dy < 0.0 {
            self.dolly_in();
        }
    }

    /// Queue a dolly for a wheel event. Negative `delta_y` moves closer.
    pub fn on_wheel(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.dolly_in();
        } else if delta_y > 0.0 {
            self.dolly_out();
        }
    }

    fn dolly_in(&mut self) {
        self.scale *= self.config.zoom_scale();
    }

    fn dolly_out(&mut self) {
        self.scale /= self.config.zoom_scale();
    }

    // --- Per frame ---

    /// Clamp the target componentwise into `limits`.
    pub fn clamp_target(&mut self, limits: &PanLimits) {
        self.target = limits.clamp(self.target);
    }

    /// Apply damped pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = (camera.position, camera.target);
        let damping = self.config.damping;

        let mut s = Spherical::from_offset(camera.position - self.target);
        s.theta += self.delta.theta * damping;
        s.phi += self.delta.phi * damping;

        if let Some((lo, hi)) = self.config.azimuth_range() {
            s.theta = wrap_angle(s.theta).max(lo).min(hi);
        }
        s.phi = s.phi.max(self.config.min_polar).min(self.config.max_polar).max(POLAR_EPSILON).min(PI - POLAR_EPSILON);
        s.radius = (s.radius * self.scale).max(self.config.min_distance).min(self.config.max_distance);

        self.target += self.pan_offset * damping;
        camera.position = self.target + s.to_offset();
        camera.look_at(self.target);

        self.delta.theta *= 1.0 - damping;
        self.delta.phi *= 1.0 - damping;
        self.pan_offset *= 1.0 - damping;
        self.scale = 1.0;

        camera.position.distance_squared(before.0) > CHANGE_EPSILON
            || camera.target.distance_squared(before.1) > CHANGE_EPSILON
    }
}
