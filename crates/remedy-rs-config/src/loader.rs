//! Config file loading.

use crate::error::ConfigError;
use crate::model::RemedyConfig;
use log::{debug, info};
use std::path::Path;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "remedy.json5";

impl RemedyConfig {
    /// Load a config file from an explicit path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config (path={})", path.display());
        let body = std::fs::read_to_string(path)?;
        json5::from_str(&body).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Load `remedy.json5` from `dir` when present, defaults otherwise.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let candidate = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if candidate.exists() {
            Self::load_from_path(candidate)
        } else {
            debug!("no config file found, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DEFAULT_CONFIG_FILE;
    use crate::error::ConfigError;
    use crate::model::RemedyConfig;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_document_applies_defaults() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "{}").expect("write");

        let config = RemedyConfig::load_from_path(&path).expect("load");
        assert_eq!(config.context.window_size, 10);
    }

    #[test]
    fn json5_comments_and_partial_sections_parse() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{
                // shrink the window for short sessions
                context: { window_size: 4 },
            }"#,
        )
        .expect("write");

        let config = RemedyConfig::load_from_path(&path).expect("load");
        assert_eq!(config.context.window_size, 4);
        assert_eq!(config.model.max_tokens, 1500);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "{ context: ").expect("write");

        let err = RemedyConfig::load_from_path(&path).expect_err("parse");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let temp = tempdir().expect("tempdir");
        let config = RemedyConfig::load_or_default(temp.path()).expect("defaults");
        assert_eq!(config.model.name, "claude-3-5-sonnet-20241022");
    }
}
