//! Error types for context operations.

use std::path::PathBuf;

/// Errors returned by the context manager and its stores.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// Malformed input to a store operation, rejected before any mutation.
    #[error("validation error: {0}")]
    Validation(String),
    /// Checkpoint source does not exist.
    #[error("checkpoint not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Checkpoint content is not a well-formed document.
    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),
    /// Checkpoint document carries a format version this build cannot read.
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u32),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
