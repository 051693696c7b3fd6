//! Upload dispatch and sequencing.
//!
//! Files are routed by extension alone. Each accepted upload takes a
//! [`Ticket`]; only the newest ticket may install its result, so a slow
//! conversion that finishes after a newer upload is dropped.

use std::cell::Cell;

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

/// How an uploaded file is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// SVG markup, parsed directly.
    Vector,
    /// PNG or JPEG, traced into paths first.
    Raster,
}

/// Error returned when an upload cannot be dispatched.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported file extension {0:?}")]
    UnsupportedExtension(String),
    #[error("no file selected")]
    MissingFile,
}

/// Classify `file_name` by its extension, case-insensitively.
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedExtension`] for anything other than
/// `svg`, `png`, `jpg` or `jpeg`, including names with no extension.
pub fn classify(file_name: &str) -> Result<FileKind, UploadError> {
    let ext = file_name.rsplit_once('.').map_or("", |(_, ext)| ext).to_ascii_lowercase();
    match ext.as_str() {
        "svg" => Ok(FileKind::Vector),
        "png" | "jpg" | "jpeg" => Ok(FileKind::Raster),
        _ => Err(UploadError::UnsupportedExtension(ext)),
    }
}

/// Generation number of one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues upload tickets and remembers the newest one.
#[derive(Debug, Default)]
pub struct UploadTickets {
    latest: Cell<u64>,
}

impl UploadTickets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new upload. Every ticket issued before this one goes stale.
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Ticket(next)
    }

    /// Whether `ticket` is still the newest upload.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }
}
