//! Conversation history buffer for chat turns.
//!
//! DESIGN
//! ======
//! A bounded FIFO of user/assistant entries. The buffer lives with the panel
//! session and is discarded on reload; each chat request carries a snapshot.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::net::types::HistoryMessage;

/// Maximum number of entries kept; oldest are dropped first.
pub const MAX_HISTORY_ENTRIES: usize = 50;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    entries: VecDeque<HistoryMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, evicting from the front past the cap.
    pub fn push(&mut self, message: HistoryMessage) {
        self.entries.push_back(message);
        while self.entries.len() > MAX_HISTORY_ENTRIES {
            self.entries.pop_front();
        }
    }

    /// Record a completed exchange as a user entry followed by the reply.
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.push(HistoryMessage::user(user));
        self.push(HistoryMessage::assistant(assistant));
    }

    /// Oldest-first copy for a request body.
    pub fn snapshot(&self) -> Vec<HistoryMessage> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
