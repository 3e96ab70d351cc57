//! Configuration schema and loading for Remedy.

pub mod error;
pub mod loader;
pub mod model;

/// Config error type.
pub use error::ConfigError;
/// Config schema and builder.
pub use model::{
    ContextConfig, KnowledgeConfig, ModelConfig, RemedyConfig, RemedyConfigBuilder,
};
