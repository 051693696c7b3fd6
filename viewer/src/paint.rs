//! Painter's-algorithm face list.
//!
//! Every triangle of the active model is moved to world space, lit, and
//! projected. Triangles with any corner behind the near plane are dropped.
//! The survivors come back sorted far to near so they can be filled in order.

use crate::camera::{PerspectiveCamera, Point};
use crate::light::Lighting;
use crate::scene::Model3D;

#[cfg(test)]
#[path = "paint_test.rs"]
mod paint_test;

/// One projected, shaded triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corners in CSS pixels.
    pub corners: [Point; 3],
    /// Mean view depth of the corners.
    pub depth: f64,
    pub color: [u8; 3],
}

/// Project and shade all triangles of `model`, farthest first.
///
/// Back faces are culled unless the material is double-sided.
#[must_use]
pub fn faces(
    model: &Model3D,
    camera: &PerspectiveCamera,
    lighting: &Lighting,
    viewport_w: f64,
    viewport_h: f64,
) -> Vec<Face> {
    let mut out = Vec::with_capacity(model.triangle_count());
    for mesh in &model.meshes {
        for i in 0..mesh.triangles.len() {
            let [a, b, c] = mesh.triangle(i).map(|p| model.to_world(p));
            let normal = (b - a).cross(c - a).normalize_or_zero();
            if normal == glam::DVec3::ZERO {
                continue;
            }
            let to_eye = (camera.position - (a + b + c) / 3.0).normalize_or_zero();
            if !model.material.double_sided && normal.dot(to_eye) <= 0.0 {
                continue;
            }
            let (Some(pa), Some(pb), Some(pc)) = (
                camera.project(a, viewport_w, viewport_h),
                camera.project(b, viewport_w, viewport_h),
                camera.project(c, viewport_w, viewport_h),
            ) else {
                continue;
            };
            out.push(Face {
                corners: [pa.screen, pb.screen, pc.screen],
                depth: (pa.depth + pb.depth + pc.depth) / 3.0,
                color: lighting.shade(&model.material, normal, to_eye),
            });
        }
    }
    out.sort_by(|x, y| y.depth.total_cmp(&x.depth));
    out
}
