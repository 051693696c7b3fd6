//! Uploaded bytes to an installed model.

use vectorize::{DocumentError, ExtractConfig, ExtractError, PathDocument};
use viewer::{EngineCore, FrameError, ModelError, SceneError, ViewFrame};

use crate::upload::FileKind;

#[cfg(test)]
#[path = "convert_test.rs"]
mod convert_test;

/// Why an upload did not become the active model.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("vector file is not UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    /// The browser failed to hand over the file contents.
    #[error("failed to read file: {0}")]
    Read(String),
}

impl From<ModelError> for LoadError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Scene(err) => Self::Scene(err),
            ModelError::Frame(err) => Self::Frame(err),
        }
    }
}

/// Turn the raw contents of an upload into a [`PathDocument`].
///
/// # Errors
///
/// Vector files fail with [`LoadError::Encoding`] or [`LoadError::Document`];
/// raster files fail with [`LoadError::Extract`].
pub fn to_document(kind: FileKind, bytes: &[u8], config: &ExtractConfig) -> Result<PathDocument, LoadError> {
    let doc = match kind {
        FileKind::Vector => PathDocument::parse(std::str::from_utf8(bytes)?)?,
        FileKind::Raster => vectorize::extract_bytes(bytes, config)?,
    };
    tracing::debug!(?kind, bytes = bytes.len(), paths = doc.paths.len(), "converted upload");
    Ok(doc)
}

/// Convert an upload and install it as the active model of `core`.
///
/// On error the previous model stays on screen.
///
/// # Errors
///
/// Any [`LoadError`] from conversion, scene building or framing.
pub fn load_into(core: &mut EngineCore, kind: FileKind, bytes: &[u8]) -> Result<ViewFrame, LoadError> {
    let doc = to_document(kind, bytes, &core.config.extract)?;
    Ok(core.load_document(&doc)?)
}
