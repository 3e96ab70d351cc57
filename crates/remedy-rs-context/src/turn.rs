//! Conversation turns and the append-only turn log.

use crate::error::ContextError;
use crate::value::ContextValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Speaker role for a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User-authored turn.
    User,
    /// Assistant-authored turn.
    Assistant,
    /// System-generated turn.
    System,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl FromStr for Role {
    type Err = ContextError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(ContextError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// One role-tagged exchange unit in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    /// Role that produced the turn.
    pub role: Role,
    /// Turn content; empty content is a permitted no-op turn.
    pub content: String,
    /// Insertion timestamp, assigned by the log, never by the caller.
    pub timestamp: DateTime<Utc>,
    /// Structured metadata; an absent mapping deserializes to empty.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, ContextValue>,
}

/// Append-only ordered sequence of conversation turns.
///
/// Turns are never mutated or reordered after insertion. Sequence position is
/// the authoritative order; timestamps may tie.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TurnLog {
    turns: Vec<ConversationTurn>,
}

impl TurnLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn with a freshly assigned timestamp, returning its index.
    pub fn append(
        &mut self,
        role: Role,
        content: impl Into<String>,
        metadata: Option<BTreeMap<String, ContextValue>>,
    ) -> usize {
        let timestamp = self.next_timestamp();
        self.turns.push(ConversationTurn {
            role,
            content: content.into(),
            timestamp,
            metadata: metadata.unwrap_or_default(),
        });
        self.turns.len() - 1
    }

    /// Insertion timestamps never decrease, even if the wall clock does.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.turns.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }

    /// Full history, oldest first.
    pub fn all(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Last `min(n, len)` turns, oldest first within the slice.
    pub fn recent(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Number of turns recorded.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turns have been recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Replace the whole history, used when restoring a checkpoint.
    pub(crate) fn replace(&mut self, turns: Vec<ConversationTurn>) {
        self.turns = turns;
    }
}
