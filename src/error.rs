//! Error types for ocrlayout library.

use std::io;
use thiserror::Error;

/// Result type alias for ocrlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document reconstruction.
///
/// Content problems (bad polygons, unexpected input shapes) never escape the
/// reconstruction pipeline as `Err`; they are collected and surfaced as
/// `Error`-kind nodes in the returned [`Document`](crate::Document). Only the
/// outer entry points that touch the filesystem or parse JSON text return
/// these errors directly.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not syntactically valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A polygon has an odd number of coordinates or fewer than four.
    #[error("Malformed geometry: expected an even number of at least 4 coordinates, got {coordinates}")]
    MalformedGeometry {
        /// Number of coordinate values actually present
        coordinates: usize,
    },

    /// Required top-level fields are absent or have the wrong container kind.
    #[error("Invalid ingestion shape: {0}")]
    InvalidIngestionShape(String),

    /// A single record (fragment, paragraph or table) could not be decoded.
    #[error("Invalid {kind} at index {index}: {reason}")]
    InvalidRecord {
        /// What kind of record failed ("fragment", "paragraph", "table")
        kind: &'static str,
        /// Zero-based position of the record in its source sequence
        index: usize,
        /// Human-readable reason
        reason: String,
    },

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build an [`Error::InvalidRecord`] from any displayable reason.
    pub fn invalid_record(kind: &'static str, index: usize, reason: impl ToString) -> Self {
        Error::InvalidRecord {
            kind,
            index,
            reason: reason.to_string(),
        }
    }
}
