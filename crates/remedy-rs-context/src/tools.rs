//! Usage counters for named analysis tools.

use crate::error::ContextError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Invocation summary for one tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolUsageRecord {
    /// Number of recorded invocations.
    pub count: u64,
    /// Timestamp of the most recent invocation.
    pub last_used_at: DateTime<Utc>,
}

/// Registry mapping tool names to usage counters.
///
/// This is a counter, not a set: repeated invocations accumulate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ToolUsageRegistry {
    records: BTreeMap<String, ToolUsageRecord>,
}

impl ToolUsageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation of `tool_name`, returning the new count.
    pub fn record(&mut self, tool_name: &str) -> Result<u64, ContextError> {
        if tool_name.trim().is_empty() {
            return Err(ContextError::Validation(
                "tool name must not be empty".to_string(),
            ));
        }
        let now = Utc::now();
        let record = self
            .records
            .entry(tool_name.to_string())
            .or_insert(ToolUsageRecord {
                count: 0,
                last_used_at: now,
            });
        record.count += 1;
        record.last_used_at = now;
        Ok(record.count)
    }

    /// Usage record for `tool_name`, if any invocation has been recorded.
    pub fn get(&self, tool_name: &str) -> Option<&ToolUsageRecord> {
        self.records.get(tool_name)
    }

    /// Point-in-time copy of all records, independent of the live registry.
    pub fn snapshot(&self) -> BTreeMap<String, ToolUsageRecord> {
        self.records.clone()
    }

    /// Number of distinct tools recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no invocation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace all records, used when restoring a checkpoint.
    pub(crate) fn replace(&mut self, records: BTreeMap<String, ToolUsageRecord>) {
        self.records = records;
    }
}

#[cfg(test)]
mod tests {
    use super::ToolUsageRegistry;
    use crate::error::ContextError;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_counts_every_invocation() {
        let mut registry = ToolUsageRegistry::new();
        registry.record("symptom_checker").expect("record");
        registry.record("symptom_checker").expect("record");
        let count = registry.record("symptom_checker").expect("record");

        assert_eq!(count, 3);
        let record = registry.get("symptom_checker").expect("record");
        assert_eq!(record.count, 3);
    }

    #[test]
    fn last_used_at_tracks_latest_invocation() {
        let mut registry = ToolUsageRegistry::new();
        registry.record("drug_lookup").expect("record");
        let first = registry.get("drug_lookup").expect("record").last_used_at;
        registry.record("drug_lookup").expect("record");
        let second = registry.get("drug_lookup").expect("record").last_used_at;

        assert!(second >= first);
    }

    #[test]
    fn empty_tool_name_is_rejected() {
        let mut registry = ToolUsageRegistry::new();
        let err = registry.record("").expect_err("validation");
        assert!(matches!(err, ContextError::Validation(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshot_is_independent_of_later_records() {
        let mut registry = ToolUsageRegistry::new();
        registry.record("symptom_checker").expect("record");
        let snapshot = registry.snapshot();
        registry.record("symptom_checker").expect("record");

        assert_eq!(snapshot.get("symptom_checker").expect("record").count, 1);
        assert_eq!(registry.get("symptom_checker").expect("record").count, 2);
    }
}
