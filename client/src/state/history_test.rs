use super::*;
use crate::net::types::HistoryRole;

#[test]
fn history_default_is_empty() {
    let history = ConversationHistory::new();
    assert!(history.is_empty());
    assert!(history.snapshot().is_empty());
}

#[test]
fn push_exchange_keeps_order() {
    let mut history = ConversationHistory::new();
    history.push_exchange("a", "b");
    history.push_exchange("c", "d");

    let snapshot = history.snapshot();
    let contents: Vec<&str> = snapshot.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["a", "b", "c", "d"]);
    assert_eq!(snapshot[0].role, HistoryRole::User);
    assert_eq!(snapshot[1].role, HistoryRole::Assistant);
}

#[test]
fn push_past_cap_drops_oldest() {
    let mut history = ConversationHistory::new();
    for i in 0..60 {
        history.push(HistoryMessage::user(format!("m{i}")));
    }

    assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
    let snapshot = history.snapshot();
    assert_eq!(snapshot.first().map(|m| m.content.as_str()), Some("m10"));
    assert_eq!(snapshot.last().map(|m| m.content.as_str()), Some("m59"));
}

#[test]
fn exactly_at_cap_keeps_everything() {
    let mut history = ConversationHistory::new();
    for i in 0..25 {
        history.push_exchange(format!("q{i}"), format!("r{i}"));
    }
    assert_eq!(history.len(), 50);
    assert_eq!(history.snapshot()[0].content, "q0");
}

#[test]
fn snapshot_is_detached_from_buffer() {
    let mut history = ConversationHistory::new();
    history.push_exchange("a", "b");
    let before = history.snapshot();
    history.push_exchange("c", "d");
    assert_eq!(before.len(), 2);
    assert_eq!(history.len(), 4);
}

#[test]
fn clear_empties_buffer() {
    let mut history = ConversationHistory::new();
    history.push_exchange("a", "b");
    history.clear();
    assert!(history.is_empty());
}
