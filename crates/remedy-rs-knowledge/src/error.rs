//! Error types for reference lookups.

/// Errors returned by knowledge source queries.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    /// Transport-level failure reaching a source.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A source answered with a non-success status.
    #[error("unexpected status from source: {0}")]
    Status(u16),
}
