//! Browser host for the extrusion viewer.
//!
//! The page carries one file input (`#upload`) and one full-window canvas
//! (`#viewport`). Uploaded SVG text, or a PNG/JPEG traced into paths by
//! [`vectorize`], becomes a bevelled solid in the [`viewer`] engine, which the
//! user can orbit, pan and zoom.
//!
//! Everything outside [`app`] is plain Rust and tested natively. `app` is
//! compiled only with the `browser` feature and owns all DOM wiring.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | `app` | WASM entry point, DOM listeners, upload task, animation loop |
//! | [`convert`] | Uploaded bytes to [`vectorize::PathDocument`] to installed model |
//! | [`upload`] | Extension dispatch and upload tickets |
//! | [`config`] | Profile selection from the page query and `data-config` |
//! | [`gate`] | One-shot readiness gate |

#[cfg(feature = "browser")]
mod app;
pub mod config;
pub mod convert;
pub mod gate;
pub mod upload;

pub use config::{ConfigError, resolve};
pub use convert::{LoadError, load_into, to_document};
pub use gate::{GateError, ReadyGate};
pub use upload::{FileKind, Ticket, UploadError, UploadTickets, classify};
