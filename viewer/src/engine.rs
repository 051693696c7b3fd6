use vectorize::PathDocument;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{PerspectiveCamera, Point};
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::frame::{self, FrameError, ViewFrame};
use crate::input::{Button, Gesture, InputState, Modifiers, WheelDelta};
use crate::light::Lighting;
use crate::render;
use crate::scene::{self, Model3D, SceneError, SceneGraph};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    SetCursor(String),
}

/// Why a document could not become the active model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Engine state that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub scene: SceneGraph,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    /// Framing of the active model; its pan box bounds the orbit target.
    pub view: Option<ViewFrame>,
    pub lighting: Lighting,
    pub config: ViewerConfig,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        let mut camera = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(config.controls);
        controls.target = camera.target;
        controls.update(&mut camera);
        Self {
            scene: SceneGraph::new(),
            camera,
            controls,
            view: None,
            lighting: Lighting::default(),
            config,
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Data inputs ---

    /// Build, frame and install `doc` as the active model.
    ///
    /// On error the previous model, framing and camera are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Scene`] if a shape cannot be extruded and
    /// [`ModelError::Frame`] if the model cannot be framed.
    pub fn load_document(&mut self, doc: &PathDocument) -> Result<ViewFrame, ModelError> {
        let model = scene::build(doc, &self.config.extrude)?;
        self.install(model).map_err(ModelError::from)
    }

    /// Frame `model`, make it the active model, and point the camera at it.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] if the model cannot be framed.
    pub fn install(&mut self, mut model: Model3D) -> Result<ViewFrame, FrameError> {
        let view = frame::frame_and_place(&mut model, &self.config.framing)?;
        tracing::info!(
            meshes = model.meshes.len(),
            scale = view.scale,
            profile = self.config.profile.name(),
            "installed model"
        );
        self.scene.replace(model);
        self.view = Some(view);
        self.input = InputState::Idle;
        self.controls.reset(&mut self.camera, &view.camera);
        Ok(view)
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.camera.set_aspect(width_css, height_css);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let Some(gesture) = Gesture::for_button(button, modifiers, self.controls.config.pan_enabled()) else {
            return vec![Action::None];
        };
        self.input = InputState::begin(gesture, screen_pt);
        vec![Action::SetCursor(cursor_for(Some(gesture)).to_owned())]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let h = self.viewport_height;
        match &mut self.input {
            InputState::Idle => return vec![Action::None],
            InputState::Rotating { last_screen } => {
                self.controls.rotate_by_pixels(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y, h);
                *last_screen = screen_pt;
            }
            InputState::Panning { last_screen } => {
                self.controls.pan_by_pixels(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y, &self.camera, h);
                *last_screen = screen_pt;
            }
            InputState::Dollying { last_screen } => {
                self.controls.dolly_by_pixels(screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
            }
        }
        vec![Action::None]
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::Idle) {
            return vec![Action::None];
        }
        self.input = InputState::Idle;
        vec![Action::SetCursor(cursor_for(None).to_owned())]
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.controls.on_wheel(delta.dy);
        vec![Action::None]
    }

    // --- Per frame ---

    /// Clamp the orbit target into the pan box, then apply damped control motion.
    ///
    /// Returns whether the camera moved.
    pub fn tick(&mut self) -> bool {
        if let Some(view) = &self.view {
            self.controls.clamp_target(&view.pan_limits);
        }
        self.controls.update(&mut self.camera)
    }

    // --- Queries ---

    #[must_use]
    pub fn active_model(&self) -> Option<&Model3D> {
        self.scene.active()
    }

    #[must_use]
    pub fn camera(&self) -> PerspectiveCamera {
        self.camera
    }
}

fn cursor_for(gesture: Option<Gesture>) -> &'static str {
    match gesture {
        None => "grab",
        Some(Gesture::Rotate) => "grabbing",
        Some(Gesture::Pan) => "move",
        Some(Gesture::Dolly) => "ns-resize",
    }
}

/// The full viewer engine. Wraps `EngineCore` and owns the canvas and its 2D context.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: ViewerConfig) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, core: EngineCore::new(config) })
    }

    // --- Delegated data inputs ---

    /// See [`EngineCore::load_document`].
    ///
    /// # Errors
    ///
    /// Same as [`EngineCore::load_document`].
    pub fn load_document(&mut self, doc: &PathDocument) -> Result<ViewFrame, ModelError> {
        self.core.load_document(doc)
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        let dpr = self.core.dpr;
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    // --- Render ---

    /// One animation frame: advance the controls, then draw.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn frame(&mut self) -> Result<(), JsValue> {
        self.core.tick();
        self.render()
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        render::draw(
            &self.ctx,
            &self.core.scene,
            &self.core.camera,
            &self.core.lighting,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }
}
