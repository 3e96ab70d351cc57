//! Error types for model calls.

/// Errors returned by model clients.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// No API key was provided.
    #[error("missing api key")]
    MissingApiKey,
    /// Transport-level failure reaching the model API.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with an error status.
    #[error("api error (status={status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        message: String,
    },
    /// The API answered successfully but produced no text.
    #[error("model returned an empty response")]
    EmptyResponse,
}
