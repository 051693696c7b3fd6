use glam::{DMat4, DVec3, DVec4};

use crate::consts::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_START};

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// A point in screen space (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A world point after projection onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position in CSS pixels.
    pub screen: Point,
    /// Distance in front of the camera along its view axis.
    pub depth: f64,
}

/// Perspective camera looking from `position` at `target`.
///
/// `fov_deg` is the vertical field of view. `aspect` is width / height.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub fov_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            aspect: 1.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: DVec3::from_array(CAMERA_START),
            target: DVec3::ZERO,
            up: DVec3::Y,
        }
    }
}

impl PerspectiveCamera {
    /// Update the aspect ratio from viewport size. Zero-sized viewports are ignored.
    pub fn set_aspect(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Point the camera at `target` without moving it.
    pub fn look_at(&mut self, target: DVec3) {
        self.target = target;
    }

    /// Unit vector from the camera toward its target.
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Unit vector pointing to screen-right.
    #[must_use]
    pub fn right(&self) -> DVec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// Unit vector pointing to screen-up.
    #[must_use]
    pub fn screen_up(&self) -> DVec3 {
        self.right().cross(self.forward())
    }

    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    /// Project a world point into a `viewport_w` × `viewport_h` viewport.
    ///
    /// Returns `None` for points closer than the near plane (including
    /// everything behind the camera).
    #[must_use]
    pub fn project(&self, world: DVec3, viewport_w: f64, viewport_h: f64) -> Option<Projected> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if !depth.is_finite() || depth < self.near {
            return None;
        }
        let clip = self.projection_matrix() * DVec4::new(view.x, view.y, view.z, 1.0);
        if clip.w.abs() < f64::EPSILON {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(Projected {
            screen: Point::new((ndc_x + 1.0) * 0.5 * viewport_w, (1.0 - ndc_y) * 0.5 * viewport_h),
            depth,
        })
    }
}
