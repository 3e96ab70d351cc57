//! Error types for configuration loading.

/// Errors returned while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading a config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file content failed to parse.
    #[error("parse error: {0}")]
    Parse(String),
}
