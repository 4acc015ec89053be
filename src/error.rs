//! Error types for docalign library.
//!
//! Only ingestion and rendering can fail. Extraction, alignment, diffing and
//! bbox mapping are total and return plain values.

use std::io;
use thiserror::Error;

/// Result type alias for docalign operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering comparisons.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not syntactically valid JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is valid JSON but not a layout document.
    #[error("Invalid document structure: {0}")]
    InvalidDocument(String),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}
