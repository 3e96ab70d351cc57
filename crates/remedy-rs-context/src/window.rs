//! Bounded context windows derived from the live stores.

use crate::state::StateTable;
use crate::tools::{ToolUsageRecord, ToolUsageRegistry};
use crate::turn::{ConversationTurn, TurnLog};
use crate::value::ContextValue;
use std::collections::BTreeMap;

/// Window size used when the caller does not request one.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// A bounded, point-in-time view of the conversation for model hand-off.
///
/// Derived on demand and never stored. The state and tool snapshots are always
/// full copies, even when zero turns are requested: current state is cheap and
/// always relevant to prompting.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextWindow {
    /// Most recent turns, oldest first.
    pub turns: Vec<ConversationTurn>,
    /// Full state snapshot at build time.
    pub state: BTreeMap<String, ContextValue>,
    /// Full tool usage snapshot at build time.
    pub tool_usage: BTreeMap<String, ToolUsageRecord>,
}

impl ContextWindow {
    /// Combine the last `size` turns with full state and tool snapshots.
    ///
    /// Performs no I/O; rebuilding is cheap enough to do once per model call.
    pub fn build(
        turns: &TurnLog,
        state: &StateTable,
        tools: &ToolUsageRegistry,
        size: usize,
    ) -> Self {
        Self {
            turns: turns.recent(size).to_vec(),
            state: state.snapshot(),
            tool_usage: tools.snapshot(),
        }
    }
}
