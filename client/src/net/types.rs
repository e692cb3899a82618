//! Wire DTOs for the `/api/ai/*` endpoints.
//!
//! DESIGN
//! ======
//! Request bodies mirror what the server validates (`camelCase` history key,
//! optional `language`); reply bodies are reduced to the text plus the demo
//! flag so the panel state never needs to know which endpoint answered.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Language sent when the user does not pick one.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Author of a history entry. System prompts never reach the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

/// One prior exchange entry forwarded with a chat turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: HistoryRole,
    pub content: String,
}

impl HistoryMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: HistoryRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: HistoryRole::Assistant, content: content.into() }
    }
}

/// Body of `POST /api/ai/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<HistoryMessage>,
}

/// Body of `POST /api/ai/analyze-code`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalyzeCodeRequest {
    pub code: String,
    pub language: String,
}

/// Body of `POST /api/ai/generate-code`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerateCodeRequest {
    pub description: String,
    pub language: String,
}

/// Exactly one network call a pending turn needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssistantRequest {
    Chat(ChatRequest),
    AnalyzeCode(AnalyzeCodeRequest),
    GenerateCode(GenerateCodeRequest),
}

impl AssistantRequest {
    /// Path of the endpoint serving this request.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Chat(_) => "/api/ai/chat",
            Self::AnalyzeCode(_) => "/api/ai/analyze-code",
            Self::GenerateCode(_) => "/api/ai/generate-code",
        }
    }

    /// JSON body for the request.
    pub fn body(&self) -> serde_json::Value {
        let value = match self {
            Self::Chat(req) => serde_json::to_value(req),
            Self::AnalyzeCode(req) => serde_json::to_value(req),
            Self::GenerateCode(req) => serde_json::to_value(req),
        };
        value.unwrap_or(serde_json::Value::Null)
    }

    /// Name of the reply field carrying the assistant text.
    pub fn reply_field(&self) -> &'static str {
        match self {
            Self::Chat(_) => "response",
            Self::AnalyzeCode(_) => "analysis",
            Self::GenerateCode(_) => "code",
        }
    }
}

/// Assistant text plus whether the server answered in demo mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub is_demo: bool,
}

/// Signed-in user as returned by the auth session endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Display name shown as the sender of the user's messages.
    pub name: String,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
}
