//! Conversation context bookkeeping for Remedy.
//!
//! This crate owns the session-local state of a conversation: the append-only
//! turn log, the key-value state table, the tool usage registry, the bounded
//! context window handed to the model collaborator, and durable checkpointing
//! of all three stores.

pub mod error;
pub mod manager;
pub mod persist;
pub mod state;
pub mod tools;
pub mod turn;
pub mod value;
pub mod window;

/// Context error type.
pub use error::ContextError;
/// Context manager façade.
pub use manager::ContextManager;
/// Persisted checkpoint document and format version.
pub use persist::{FORMAT_VERSION, PersistedContext};
/// Mutable key-value state table.
pub use state::{StateEntry, StateTable};
/// Tool usage counters.
pub use tools::{ToolUsageRecord, ToolUsageRegistry};
/// Conversation turns and the append-only log.
pub use turn::{ConversationTurn, Role, TurnLog};
/// Structured values for state and turn metadata.
pub use value::ContextValue;
/// Bounded context window.
pub use window::{ContextWindow, DEFAULT_WINDOW_SIZE};
