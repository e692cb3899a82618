//! Assistant chat panel state machine.
//!
//! DESIGN
//! ======
//! Each send is a turn: `submit` optimistically appends the user message and
//! a pending placeholder, then hands back a `PendingTurn` describing the one
//! request to issue. When the request settles, `resolve` swaps that turn's
//! placeholder (found by id, same position, fresh id) for the reply or the
//! failure text. Turns never block each other; each carries its own sequence
//! number and placeholder id.
//!
//! STALE RESOLUTIONS
//! =================
//! `clear` advances an epoch. A turn issued before the clear resolves into
//! nothing, since its placeholder is gone and its epoch no longer matches.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::collections::{HashMap, VecDeque};
use std::fmt;

use super::auth::AuthState;
use super::history::ConversationHistory;
use crate::net::types::{
    AnalyzeCodeRequest, AssistantReply, AssistantRequest, ChatRequest, DEFAULT_LANGUAGE, GenerateCodeRequest,
};

pub const ASSISTANT_NAME: &str = "Viper";
pub const USER_SENDER: &str = "You";
pub const THINKING_TEXT: &str = "Viper is thinking...";
pub const FAILED_TEXT: &str = "Sorry, I encountered an error. Please try again.";
/// Settled turns whose phase stays queryable.
pub const SETTLED_TURNS_KEPT: usize = 32;
pub const GREETING_TEXT: &str =
    "Hello! I'm Viper, your AI assistant. I'm here to help with your Python questions. What are you working on today?";

/// Which endpoint a send goes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flavor {
    /// Conversational turn with history. Requires a signed-in session.
    #[default]
    Chat,
    /// Review of a pasted snippet.
    AnalyzeCode,
    /// Code from a description.
    GenerateCode,
}

impl Flavor {
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Chat)
    }
}

/// A message as rendered in the panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatDisplayMessage {
    pub id: String,
    pub sender: String,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,
    pub is_assistant: bool,
    pub is_pending: bool,
}

impl ChatDisplayMessage {
    fn user(content: &str, now: f64) -> Self {
        Self {
            id: new_id(),
            sender: USER_SENDER.to_owned(),
            content: content.to_owned(),
            timestamp: now,
            is_assistant: false,
            is_pending: false,
        }
    }

    fn assistant(content: &str, now: f64, is_pending: bool) -> Self {
        Self {
            id: new_id(),
            sender: ASSISTANT_NAME.to_owned(),
            content: content.to_owned(),
            timestamp: now,
            is_assistant: true,
            is_pending,
        }
    }
}

/// Where a submitted turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AssistantPending,
    AssistantResolved,
    AssistantFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Toast-style notice for the view to surface once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn info(title: &str, message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, title: title.to_owned(), message: message.into() }
    }

    fn error(title: &str, message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, title: title.to_owned(), message: message.into() }
    }
}

/// Why a send was refused. Refusals leave the message list untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitError {
    EmptyInput,
    AuthenticationRequired,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("input is empty"),
            Self::AuthenticationRequired => f.write_str("sign in to chat with Viper"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// A turn awaiting its network reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    pub seq: u64,
    pub epoch: u64,
    pub placeholder_id: String,
    pub request: AssistantRequest,
}

/// Bookkeeping for a turn still awaiting its reply. Dropped on settle.
#[derive(Clone, Debug)]
struct InFlightTurn {
    placeholder_id: String,
    flavor: Flavor,
    user_input: String,
}

/// State for the assistant panel.
#[derive(Clone, Debug)]
pub struct ChatPanelState {
    pub flavor: Flavor,
    pub language: String,
    pub messages: Vec<ChatDisplayMessage>,
    pub history: ConversationHistory,
    pub notifications: Vec<Notification>,
    /// Bumped on every change to `messages`; the view scrolls to the newest
    /// entry when it moves.
    pub scroll_revision: u64,
    in_flight: HashMap<u64, InFlightTurn>,
    settled: VecDeque<(u64, TurnPhase)>,
    next_seq: u64,
    epoch: u64,
}

impl ChatPanelState {
    /// Fresh panel showing only the greeting.
    pub fn new(now: f64) -> Self {
        Self {
            flavor: Flavor::default(),
            language: DEFAULT_LANGUAGE.to_owned(),
            messages: vec![ChatDisplayMessage::assistant(GREETING_TEXT, now, false)],
            history: ConversationHistory::new(),
            notifications: Vec::new(),
            scroll_revision: 0,
            in_flight: HashMap::new(),
            settled: VecDeque::new(),
            next_seq: 1,
            epoch: 0,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn set_flavor(&mut self, flavor: Flavor) {
        self.flavor = flavor;
    }

    /// Language sent with analyze/generate turns; blank resets to the default.
    pub fn set_language(&mut self, language: &str) {
        let language = language.trim();
        self.language = if language.is_empty() { DEFAULT_LANGUAGE } else { language }.to_owned();
    }

    /// Phase of a pending turn or one of the last [`SETTLED_TURNS_KEPT`]
    /// settled turns.
    pub fn phase(&self, seq: u64) -> Option<TurnPhase> {
        if self.in_flight.contains_key(&seq) {
            return Some(TurnPhase::AssistantPending);
        }
        self.settled
            .iter()
            .rev()
            .find(|(s, _)| *s == seq)
            .map(|(_, phase)| *phase)
    }

    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Start a turn for `input` under the active flavor.
    ///
    /// # Errors
    ///
    /// [`SubmitError::EmptyInput`] when the trimmed input is empty, and
    /// [`SubmitError::AuthenticationRequired`] when the flavor needs a session
    /// and `auth` has none; the latter also pushes an error notification.
    pub fn submit(&mut self, input: &str, auth: &AuthState, now: f64) -> Result<PendingTurn, SubmitError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.flavor.requires_auth() && !auth.is_signed_in() {
            self.notifications
                .push(Notification::error("Authentication required", "Sign in to chat with Viper."));
            return Err(SubmitError::AuthenticationRequired);
        }

        let request = match self.flavor {
            Flavor::Chat => AssistantRequest::Chat(ChatRequest {
                message: text.to_owned(),
                conversation_history: self.history.snapshot(),
            }),
            Flavor::AnalyzeCode => AssistantRequest::AnalyzeCode(AnalyzeCodeRequest {
                code: input.trim_matches(['\n', '\r']).to_owned(),
                language: self.language.clone(),
            }),
            Flavor::GenerateCode => AssistantRequest::GenerateCode(GenerateCodeRequest {
                description: text.to_owned(),
                language: self.language.clone(),
            }),
        };

        let placeholder = ChatDisplayMessage::assistant(THINKING_TEXT, now, true);
        let placeholder_id = placeholder.id.clone();
        self.messages.push(ChatDisplayMessage::user(text, now));
        self.messages.push(placeholder);
        self.bump_scroll();

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(
            seq,
            InFlightTurn { placeholder_id: placeholder_id.clone(), flavor: self.flavor, user_input: text.to_owned() },
        );

        Ok(PendingTurn { seq, epoch: self.epoch, placeholder_id, request })
    }

    /// Settle `turn` with its network outcome.
    ///
    /// Returns `false` when the turn is stale (cleared since it was issued)
    /// or already settled; nothing changes in that case.
    pub fn resolve(&mut self, turn: &PendingTurn, outcome: Result<AssistantReply, String>, now: f64) -> bool {
        if turn.epoch != self.epoch {
            return false;
        }
        let Some(index) = self.in_flight.get(&turn.seq).and_then(|record| {
            self.messages
                .iter()
                .position(|m| m.id == record.placeholder_id)
        }) else {
            return false;
        };
        let Some(record) = self.in_flight.remove(&turn.seq) else {
            return false;
        };

        let phase = match outcome {
            Ok(reply) => {
                if record.flavor == Flavor::Chat {
                    self.history
                        .push_exchange(record.user_input, reply.text.clone());
                }
                if reply.is_demo {
                    self.notifications.push(Notification::info(
                        "Demo mode",
                        "Viper is answering without a completion API key. Replies are canned.",
                    ));
                }
                self.messages[index] = ChatDisplayMessage::assistant(&reply.text, now, false);
                TurnPhase::AssistantResolved
            }
            Err(message) => {
                self.notifications
                    .push(Notification::error("Assistant unavailable", message));
                self.messages[index] = ChatDisplayMessage::assistant(FAILED_TEXT, now, false);
                TurnPhase::AssistantFailed
            }
        };
        self.settled.push_back((turn.seq, phase));
        while self.settled.len() > SETTLED_TURNS_KEPT {
            self.settled.pop_front();
        }
        self.bump_scroll();
        true
    }

    /// Reset to the greeting and forget history. Turns still in flight are
    /// ignored when they resolve.
    pub fn clear(&mut self, now: f64) {
        self.epoch += 1;
        self.in_flight.clear();
        self.settled.clear();
        self.history.clear();
        self.messages = vec![ChatDisplayMessage::assistant(GREETING_TEXT, now, false)];
        self.bump_scroll();
    }

    /// Hand queued notifications to the view.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn bump_scroll(&mut self) {
        self.scroll_revision += 1;
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
