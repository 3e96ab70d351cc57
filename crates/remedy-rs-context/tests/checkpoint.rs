//! Checkpoint round-trip integration tests.

use pretty_assertions::assert_eq;
use remedy_rs_context::{ContextManager, ContextError, ContextValue, Role};
use std::collections::BTreeMap;
use tempfile::tempdir;

fn populated_context() -> ContextManager {
    let context = ContextManager::new();
    let mut metadata = BTreeMap::new();
    metadata.insert("channel".to_string(), ContextValue::from("repl"));
    context.record_interaction(Role::User, "fever and cough", Some(metadata));
    context.record_interaction(Role::Assistant, "recommend rest and fluids", None);
    context.record_interaction(Role::System, "", None);
    context.record_state_change("urgency", "moderate").expect("set");
    context
        .record_state_change("symptom_count", 2i64)
        .expect("set");
    context.record_tool_usage("symptom_checker").expect("record");
    context.record_tool_usage("symptom_checker").expect("record");
    context.record_tool_usage("drug_lookup").expect("record");
    context
}

#[test]
fn save_then_restore_reproduces_observable_state() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("context.json");
    let original = populated_context();
    original.checkpoint(&path).expect("checkpoint");

    let restored = ContextManager::new();
    restored.restore(&path).expect("restore");

    let before = original.context_window(Some(100));
    let after = restored.context_window(Some(100));
    assert_eq!(after.turns, before.turns);
    assert_eq!(after.state, before.state);
    assert_eq!(after.tool_usage, before.tool_usage);
}

#[test]
fn restore_replaces_rather_than_merges() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("context.json");
    populated_context().checkpoint(&path).expect("checkpoint");

    let other = ContextManager::new();
    other.record_interaction(Role::User, "unrelated conversation", None);
    other.record_state_change("urgency", "high").expect("set");
    other.record_tool_usage("guideline_search").expect("record");
    other.restore(&path).expect("restore");

    let window = other.context_window(Some(100));
    assert_eq!(window.turns.len(), 3);
    assert_eq!(window.turns[0].content, "fever and cough");
    assert_eq!(
        window.state.get("urgency"),
        Some(&ContextValue::from("moderate"))
    );
    assert!(window.tool_usage.get("guideline_search").is_none());
}

#[test]
fn failed_restore_leaves_memory_untouched() {
    let temp = tempdir().expect("tempdir");
    let context = populated_context();

    let err = context
        .restore(temp.path().join("absent.json"))
        .expect_err("not found");
    assert!(matches!(err, ContextError::NotFound(_)));

    let garbage = temp.path().join("garbage.json");
    std::fs::write(&garbage, "symptom notes, not a checkpoint").expect("write");
    let err = context.restore(&garbage).expect_err("format");
    assert!(matches!(err, ContextError::Format(_)));

    let window = context.context_window(Some(100));
    assert_eq!(window.turns.len(), 3);
    assert_eq!(window.tool_usage.get("symptom_checker").expect("record").count, 2);
}

#[test]
fn checkpoint_overwrites_previous_checkpoint_atomically() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("context.json");

    let first = ContextManager::new();
    first.record_interaction(Role::User, "first session", None);
    first.checkpoint(&path).expect("checkpoint");

    let second = populated_context();
    second.checkpoint(&path).expect("checkpoint");

    let restored = ContextManager::new();
    restored.restore(&path).expect("restore");
    assert_eq!(restored.turn_count(), 3);
    assert!(!path.with_file_name("context.json.tmp").exists());
}

#[test]
fn urgency_survives_a_process_boundary() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("ctx.json");

    let session = ContextManager::new();
    session.record_state_change("urgency", "moderate").expect("set");
    session.checkpoint(&path).expect("checkpoint");

    let next_session = ContextManager::new();
    next_session.restore(&path).expect("restore");
    assert_eq!(
        next_session.state("urgency"),
        Some(ContextValue::from("moderate"))
    );
}
