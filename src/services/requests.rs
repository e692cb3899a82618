//! Request validation for the assistant endpoints.
//!
//! Bodies arrive as loose JSON. Each parser checks the primary field and
//! fills defaults so the gateway only ever sees well-formed requests.

use serde_json::Value;

use crate::llm::MAX_HISTORY_MESSAGES;
use crate::llm::types::{Message, Role};

pub const DEFAULT_LANGUAGE: &str = "python";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Message is required and must be a string")]
    Message,
    #[error("Code is required and must be a string")]
    Code,
    #[error("Description is required and must be a string")]
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeCodeRequest {
    pub code: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCodeRequest {
    pub description: String,
    pub language: String,
}

impl ChatRequest {
    /// Parse `{message, conversationHistory?}`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Message`] when `message` is absent, not a
    /// string, or empty.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let message = required_str(body, "message").ok_or(ValidationError::Message)?;
        let history = body
            .get("conversationHistory")
            .map(parse_history)
            .unwrap_or_default();
        Ok(Self { message, history })
    }
}

impl AnalyzeCodeRequest {
    /// Parse `{code, language?}`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Code`] when `code` is absent, not a string,
    /// or empty.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let code = required_str(body, "code").ok_or(ValidationError::Code)?;
        Ok(Self { code, language: language(body) })
    }
}

impl GenerateCodeRequest {
    /// Parse `{description, language?}`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Description`] when `description` is absent,
    /// not a string, or empty.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let description = required_str(body, "description").ok_or(ValidationError::Description)?;
        Ok(Self { description, language: language(body) })
    }
}

fn required_str(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn language(body: &Value) -> String {
    body.get("language")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}

/// Keep well-formed user/assistant entries, most recent last, capped.
fn parse_history(raw: &Value) -> Vec<Message> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    let mut history: Vec<Message> = items
        .iter()
        .filter_map(|item| {
            let role = item
                .get("role")
                .and_then(Value::as_str)
                .and_then(Role::parse)?;
            let content = item.get("content").and_then(Value::as_str)?;
            match role {
                Role::User => Some(Message::user(content)),
                Role::Assistant => Some(Message::assistant(content)),
                Role::System => None,
            }
        })
        .collect();
    let excess = history.len().saturating_sub(MAX_HISTORY_MESSAGES);
    history.drain(..excess);
    history
}

#[cfg(test)]
#[path = "requests_test.rs"]
mod tests;
