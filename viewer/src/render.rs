//! Rendering: draws the scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads the scene, camera and lights and produces pixels. It does not
//! mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::PerspectiveCamera;
use crate::consts::BACKGROUND_COLOR;
use crate::light::{self, Lighting};
use crate::paint::{self, Face};
use crate::scene::SceneGraph;

/// Outline width that hides hairline gaps between neighbouring faces, in CSS pixels.
const SEAM_WIDTH_PX: f64 = 0.5;

/// Draw the background and the active model.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &SceneGraph,
    camera: &PerspectiveCamera,
    lighting: &Lighting,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: reset transform and clear to the background colour.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(&light::css_hex(BACKGROUND_COLOR));
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    // Layer 2: model faces, far to near.
    if let Some(model) = scene.active() {
        ctx.set_line_width(SEAM_WIDTH_PX);
        ctx.set_line_join("round");
        for face in paint::faces(model, camera, lighting, viewport_w, viewport_h) {
            draw_face(ctx, &face);
        }
    }

    Ok(())
}

// =============================================================
// Faces
// =============================================================

fn draw_face(ctx: &CanvasRenderingContext2d, face: &Face) {
    let [a, b, c] = face.corners;
    let color = light::css_rgb(face.color);
    ctx.begin_path();
    ctx.move_to(a.x, a.y);
    ctx.line_to(b.x, b.y);
    ctx.line_to(c.x, c.y);
    ctx.close_path();
    ctx.set_fill_style_str(&color);
    ctx.fill();
    ctx.set_stroke_style_str(&color);
    ctx.stroke();
}
