//! Context manager façade owning the three leaf stores.

use crate::error::ContextError;
use crate::persist::{self, FORMAT_VERSION, PersistedContext};
use crate::state::StateTable;
use crate::tools::ToolUsageRegistry;
use crate::turn::{Role, TurnLog};
use crate::value::ContextValue;
use crate::window::{ContextWindow, DEFAULT_WINDOW_SIZE};
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::Path;

/// Single-session conversation context: turn log, state table, tool usage.
///
/// One instance serves one conversational session and is constructed
/// explicitly by the owning loop; there is no ambient singleton. Each leaf
/// store sits behind its own lock so turn appends, state writes, and tool
/// records do not serialize against each other. Persistence operations take
/// guards on all three stores, so no caller observes a torn snapshot.
///
/// Lock order is always turns, then state, then tools.
#[derive(Debug, Default)]
pub struct ContextManager {
    turns: RwLock<TurnLog>,
    state: RwLock<StateTable>,
    tools: RwLock<ToolUsageRegistry>,
}

impl ContextManager {
    /// Create a manager with all three stores empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a conversation turn, returning its sequence index.
    pub fn record_interaction(
        &self,
        role: Role,
        content: impl Into<String>,
        metadata: Option<BTreeMap<String, ContextValue>>,
    ) -> usize {
        let mut turns = self.turns.write();
        let index = turns.append(role, content, metadata);
        debug!("recorded interaction (role={}, index={})", role.as_str(), index);
        index
    }

    /// Upsert a system-state value.
    ///
    /// State changes are not logged as turns; callers decide whether a change
    /// is also worth recording conversationally.
    pub fn record_state_change(
        &self,
        key: impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Result<(), ContextError> {
        self.state.write().set(key, value)
    }

    /// Record one invocation of a named tool, returning the new count.
    pub fn record_tool_usage(&self, tool_name: &str) -> Result<u64, ContextError> {
        self.tools.write().record(tool_name)
    }

    /// Current value for a state key, if present.
    pub fn state(&self, key: &str) -> Option<ContextValue> {
        self.state.read().get(key).cloned()
    }

    /// Number of turns recorded so far.
    pub fn turn_count(&self) -> usize {
        self.turns.read().len()
    }

    /// Build a bounded window of recent turns plus full state and tool
    /// snapshots. `None` uses [`DEFAULT_WINDOW_SIZE`].
    pub fn context_window(&self, window_size: Option<usize>) -> ContextWindow {
        let size = window_size.unwrap_or(DEFAULT_WINDOW_SIZE);
        let turns = self.turns.read();
        let state = self.state.read();
        let tools = self.tools.read();
        ContextWindow::build(&turns, &state, &tools, size)
    }

    /// Serialize the full context to `path`, atomically replacing any prior
    /// checkpoint there.
    pub fn checkpoint(&self, path: impl AsRef<Path>) -> Result<(), ContextError> {
        let path = path.as_ref();
        let turns = self.turns.read();
        let state = self.state.read();
        let tools = self.tools.read();
        let document = PersistedContext {
            format_version: FORMAT_VERSION,
            turns: turns.all().to_vec(),
            state: state.snapshot(),
            tool_usage: tools.snapshot(),
        };
        persist::write_checkpoint(path, &document)?;
        info!(
            "context checkpointed (path={}, turns={})",
            path.display(),
            document.turns.len()
        );
        Ok(())
    }

    /// Load a checkpoint from `path`, replacing all in-memory stores.
    ///
    /// The document is read and validated before any store is touched, so a
    /// failed restore leaves the in-memory context unchanged. The swap holds
    /// write guards on all three stores at once.
    pub fn restore(&self, path: impl AsRef<Path>) -> Result<(), ContextError> {
        let path = path.as_ref();
        let document = persist::read_checkpoint(path)?;

        let mut turns = self.turns.write();
        let mut state = self.state.write();
        let mut tools = self.tools.write();
        turns.replace(document.turns);
        state.replace(document.state);
        tools.replace(document.tool_usage);
        info!(
            "context restored (path={}, turns={}, state_keys={}, tools={})",
            path.display(),
            turns.len(),
            state.len(),
            tools.len()
        );
        Ok(())
    }
}
