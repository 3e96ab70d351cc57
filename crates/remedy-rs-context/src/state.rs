//! Mutable key-value system state with last-write-wins semantics.

use crate::error::ContextError;
use crate::value::ContextValue;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// One live system-state fact.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEntry {
    /// Last-written value.
    pub value: ContextValue,
    /// Timestamp of the most recent write.
    pub updated_at: DateTime<Utc>,
}

/// Key-value table holding at most one live entry per key.
///
/// Writes fully replace the prior value; there are no merge semantics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StateTable {
    entries: BTreeMap<String, StateEntry>,
}

impl StateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a value under `key`, replacing any prior entry.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Result<(), ContextError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ContextError::Validation(
                "state key must not be empty".to_string(),
            ));
        }
        self.entries.insert(
            key,
            StateEntry {
                value: value.into(),
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    /// Current value for `key`; absence is an outcome, not an error.
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Full entry for `key`, including its update timestamp.
    pub fn entry(&self, key: &str) -> Option<&StateEntry> {
        self.entries.get(key)
    }

    /// Point-in-time copy of keys and values, independent of the live table.
    pub fn snapshot(&self) -> BTreeMap<String, ContextValue> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace all entries from persisted values, used when restoring.
    ///
    /// The persisted document carries values only; restored entries are
    /// stamped with the restore time.
    pub(crate) fn replace(&mut self, values: BTreeMap<String, ContextValue>) {
        let restored_at = Utc::now();
        self.entries = values
            .into_iter()
            .map(|(key, value)| {
                (
                    key,
                    StateEntry {
                        value,
                        updated_at: restored_at,
                    },
                )
            })
            .collect();
    }
}
