//! 3-D viewer for extruded vector artwork.
//!
//! This crate turns a [`vectorize::PathDocument`] into bevelled solids, fits
//! them to a fixed world size, and lets the user orbit, pan and zoom around
//! them. Everything except [`engine::Engine`] and [`render`] is plain Rust and
//! testable natively. The host layer feeds DOM events and animation frames
//! into the engine.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Path-to-shape classification, [`scene::Model3D`] and the model slot |
//! | [`extrude`] | Bevelled extrusion and cap triangulation |
//! | [`frame`] | Scale, placement, pan box and camera pose for a model |
//! | [`controls`] | Damped orbit controls |
//! | [`camera`] | Perspective camera and projection |
//! | [`input`] | Input event types and the drag gesture state machine |
//! | [`light`] | Scene lights and face shading |
//! | [`paint`] | Projected, depth-sorted face list |
//! | [`render`] | Canvas 2D drawing |
//! | [`config`] | Named profiles and the combined [`config::ViewerConfig`] |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod controls;
pub mod engine;
pub mod extrude;
pub mod frame;
pub mod input;
pub mod light;
pub mod paint;
pub mod render;
pub mod scene;

pub use config::{Profile, ViewerConfig};
pub use engine::{Action, Engine, EngineCore, ModelError};
pub use extrude::{ExtrudeError, ExtrudeOptions};
pub use frame::{FrameError, FramingPolicy, ViewFrame};
pub use scene::{Model3D, SceneError};
