//! Durable checkpoint documents and atomic file persistence.

use crate::error::ContextError;
use crate::tools::ToolUsageRecord;
use crate::turn::ConversationTurn;
use crate::value::ContextValue;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Version written into every checkpoint document.
pub const FORMAT_VERSION: u32 = 1;

/// The durable record: full turn log, state values, and tool usage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedContext {
    /// Schema version marker; unknown versions are rejected on load.
    pub format_version: u32,
    /// All turns, oldest first.
    pub turns: Vec<ConversationTurn>,
    /// State values keyed by state key.
    pub state: BTreeMap<String, ContextValue>,
    /// Usage records keyed by tool name.
    pub tool_usage: BTreeMap<String, ToolUsageRecord>,
}

/// Write `document` to `path`, via a temporary file and atomic rename.
///
/// Either the fully updated document is visible at `path` afterwards, or the
/// previous content is left intact.
pub(crate) fn write_checkpoint(path: &Path, document: &PersistedContext) -> Result<(), ContextError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let temp = temp_path(path);
    {
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&temp)?;
        let body = serde_json::to_vec_pretty(document)?;
        file.write_all(&body)?;
    }
    fs::rename(&temp, path)?;
    debug!(
        "checkpoint written (path={}, turns={}, state_keys={}, tools={})",
        path.display(),
        document.turns.len(),
        document.state.len(),
        document.tool_usage.len()
    );
    Ok(())
}

/// Read and validate a checkpoint document from `path`.
///
/// A missing file, a malformed document, and an unsupported version are three
/// distinct failures; no best-effort partial parse is attempted.
pub(crate) fn read_checkpoint(path: &Path) -> Result<PersistedContext, ContextError> {
    if !path.exists() {
        return Err(ContextError::NotFound(path.to_path_buf()));
    }
    let body = fs::read_to_string(path)?;
    let document: PersistedContext = serde_json::from_str(&body)?;
    if document.format_version != FORMAT_VERSION {
        return Err(ContextError::UnsupportedVersion(document.format_version));
    }
    Ok(document)
}

/// Sibling temporary path for the atomic write.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("context"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::{FORMAT_VERSION, PersistedContext, read_checkpoint, write_checkpoint};
    use crate::error::ContextError;
    use crate::turn::{ConversationTurn, Role};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_document() -> PersistedContext {
        PersistedContext {
            format_version: FORMAT_VERSION,
            turns: vec![ConversationTurn {
                role: Role::User,
                content: "fever and cough".to_string(),
                timestamp: Utc::now(),
                metadata: BTreeMap::new(),
            }],
            state: BTreeMap::new(),
            tool_usage: BTreeMap::new(),
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("context.json");
        let document = sample_document();

        write_checkpoint(&path, &document).expect("write");
        let loaded = read_checkpoint(&path).expect("read");
        assert_eq!(loaded, document);
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("dir").join("context.json");

        write_checkpoint(&path, &sample_document()).expect("write");
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = tempdir().expect("tempdir");
        let err = read_checkpoint(&temp.path().join("absent.json")).expect_err("not found");
        assert!(matches!(err, ContextError::NotFound(_)));
    }

    #[test]
    fn malformed_document_is_a_format_error() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("garbage.json");
        std::fs::write(&path, "{not json").expect("write");

        let err = read_checkpoint(&path).expect_err("format");
        assert!(matches!(err, ContextError::Format(_)));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("future.json");
        let mut document = sample_document();
        document.format_version = 99;
        let body = serde_json::to_string(&document).expect("serialize");
        std::fs::write(&path, body).expect("write");

        let err = read_checkpoint(&path).expect_err("version");
        assert!(matches!(err, ContextError::UnsupportedVersion(99)));
    }

    #[test]
    fn failed_write_leaves_prior_content_intact() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("context.json");
        write_checkpoint(&path, &sample_document()).expect("write");

        // A directory at the temp path makes the replacement write fail.
        std::fs::create_dir(temp.path().join("context.json.tmp")).expect("mkdir");
        let err = write_checkpoint(&path, &sample_document()).expect_err("io");
        assert!(matches!(err, ContextError::Io(_)));
        assert!(read_checkpoint(&path).is_ok());
    }

    #[test]
    fn document_uses_camel_case_field_names() {
        let json = serde_json::to_string(&sample_document()).expect("serialize");
        assert!(json.contains("\"formatVersion\""));
        assert!(json.contains("\"toolUsage\""));
    }
}
