//! Hosted model collaborator: prompt in, text out.
//!
//! The context manager never builds prompts or interprets model output; this
//! crate owns that boundary. The [`ModelClient`] trait keeps the hosted API
//! substitutable with test doubles.

pub mod client;
pub mod error;
pub mod prompt;

/// Model client trait and the Anthropic-backed implementation.
pub use client::{
    AnthropicModel, CompletionRequest, CompletionResponse, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    ModelClient,
};
/// Model call error type.
pub use error::ModelError;
