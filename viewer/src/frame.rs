//! Framing: fit a model to a fixed world size and derive the camera pose and
//! pan box that go with it.
//!
//! The model is scaled uniformly so its largest counted extent equals
//! `target_size`, then placed by the [`Centering`] policy. The pan box is
//! anchored on the resulting group position and skewed toward the far side of
//! the object: −20%/+50% of the scaled size on x and y, ±50% on z.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_DISTANCE, CAMERA_ELEVATION, PAN_MARGIN_DEPTH, PAN_MARGIN_FAR, PAN_MARGIN_NEAR, TARGET_SIZE};
use crate::scene::{Aabb, Model3D};

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

/// Where the scaled model is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Centering {
    /// Move the scaled box center onto the world origin.
    Origin,
    /// Keep the model's own offset and raise it along +y by half its scaled depth.
    #[default]
    Lift,
}

/// What to do with a model whose extent is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyModelPolicy {
    /// Fail with [`FrameError::EmptyModel`].
    #[default]
    Reject,
    /// Frame it anyway with a scale of 1.
    UnitScale,
}

/// Tunables for [`frame`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FramingPolicy {
    /// Largest extent after scaling, in world units.
    pub target_size: f64,
    /// Whether the extrusion axis (z) counts toward the largest extent.
    pub include_depth: bool,
    pub centering: Centering,
    pub empty_model: EmptyModelPolicy,
}

impl Default for FramingPolicy {
    fn default() -> Self {
        Self {
            target_size: TARGET_SIZE,
            include_depth: true,
            centering: Centering::default(),
            empty_model: EmptyModelPolicy::default(),
        }
    }
}

impl FramingPolicy {
    /// Largest extent of `size` over the axes this policy counts.
    #[must_use]
    pub fn max_extent(&self, size: DVec3) -> f64 {
        if self.include_depth { size.max_element() } else { size.x.max(size.y) }
    }
}

/// Axis-aligned box the orbit target is kept inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanLimits {
    pub min: DVec3,
    pub max: DVec3,
}

impl PanLimits {
    /// Componentwise clamp of `p` into the box.
    #[must_use]
    pub fn clamp(&self, p: DVec3) -> DVec3 {
        p.max(self.min).min(self.max)
    }

    #[must_use]
    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Camera position and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub target: DVec3,
}

/// Result of framing one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    /// Center of the model's box after scaling and translation.
    pub center: DVec3,
    /// Largest counted extent before scaling.
    pub max_size: f64,
    /// Uniform scale for the group.
    pub scale: f64,
    /// Group position.
    pub translation: DVec3,
    pub pan_limits: PanLimits,
    pub camera: CameraPose,
}

/// Error returned by [`frame`].
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The model has no extent to scale.
    #[error("model has zero extent and cannot be framed")]
    EmptyModel,
}

/// Compute the framing for `model` without touching it.
///
/// The model's current scale and position are ignored; framing always starts
/// from mesh space.
///
/// # Errors
///
/// Returns [`FrameError::EmptyModel`] when the model has no meshes or a zero
/// extent and the policy is [`EmptyModelPolicy::Reject`].
pub fn frame(model: &Model3D, policy: &FramingPolicy) -> Result<ViewFrame, FrameError> {
    let bounds = model.local_bounds().unwrap_or(Aabb { min: DVec3::ZERO, max: DVec3::ZERO });
    let size = bounds.size();
    let max_size = policy.max_extent(size);

    let scale = if max_size.is_finite() && max_size > 0.0 {
        policy.target_size / max_size
    } else {
        match policy.empty_model {
            EmptyModelPolicy::Reject => return Err(FrameError::EmptyModel),
            EmptyModelPolicy::UnitScale => {
                tracing::warn!(max_size, "framing empty model at unit scale");
                1.0
            }
        }
    };

    let translation = match policy.centering {
        Centering::Origin => -bounds.center() * scale,
        Centering::Lift => DVec3::new(0.0, size.z * scale * 0.5, 0.0),
    };

    let scaled = size * scale;
    let pan_limits = PanLimits {
        min: translation
            - DVec3::new(scaled.x * PAN_MARGIN_NEAR, scaled.y * PAN_MARGIN_NEAR, scaled.z * PAN_MARGIN_DEPTH),
        max: translation
            + DVec3::new(scaled.x * PAN_MARGIN_FAR, scaled.y * PAN_MARGIN_FAR, scaled.z * PAN_MARGIN_DEPTH),
    };

    let placed = bounds.transformed(scale, translation);
    let center = placed.center();
    let mut reach = policy.max_extent(placed.size());
    if reach <= 0.0 {
        reach = policy.target_size;
    }
    let camera = CameraPose {
        position: center + DVec3::new(0.0, reach * CAMERA_ELEVATION, reach * CAMERA_DISTANCE),
        target: center,
    };

    tracing::debug!(scale, max_size, ?center, "framed model");
    Ok(ViewFrame { center, max_size, scale, translation, pan_limits, camera })
}

/// Frame `model` and write the resulting scale and position onto it.
///
/// # Errors
///
/// Same as [`frame`]. The model is left untouched on error.
pub fn frame_and_place(model: &mut Model3D, policy: &FramingPolicy) -> Result<ViewFrame, FrameError> {
    let view = frame(model, policy)?;
    model.scale = view.scale;
    model.position = view.translation;
    Ok(view)
}
