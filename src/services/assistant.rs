//! Assistant gateway: the demo/live strategy behind the AI endpoints.
//!
//! DESIGN
//! ======
//! `Assistant` is selected once at startup from the completion config. With
//! a usable API key the server runs `LiveAssistant`, which forwards to the
//! completion client; without one it runs `DemoAssistant`, which answers from
//! canned templates and never touches the network. Route handlers hold an
//! `Arc<dyn Assistant>` and never branch on the mode themselves.

use std::sync::Arc;

use tracing::{info, warn};

use super::demo::DemoAssistant;
use crate::llm::CompletionClient;
use crate::llm::config::LlmConfig;
use crate::llm::types::{LlmError, Message};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantMode {
    Demo,
    Live,
}

/// Text produced for one assistant request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub is_demo: bool,
}

impl AssistantReply {
    #[must_use]
    pub fn live(text: String) -> Self {
        Self { text, is_demo: false }
    }

    #[must_use]
    pub fn demo(text: String) -> Self {
        Self { text, is_demo: true }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error(transparent)]
    Llm(#[from] LlmError),
}

#[async_trait::async_trait]
pub trait Assistant: Send + Sync {
    fn mode(&self) -> AssistantMode;

    /// Conversational reply given prior user/assistant turns.
    ///
    /// # Errors
    ///
    /// Live mode only: returns the completion failure.
    async fn chat(&self, message: &str, history: &[Message]) -> Result<AssistantReply, AssistantError>;

    /// Review of a code snippet.
    ///
    /// # Errors
    ///
    /// Live mode only: returns the completion failure.
    async fn analyze_code(&self, code: &str, language: &str) -> Result<AssistantReply, AssistantError>;

    /// Code generated from a description.
    ///
    /// # Errors
    ///
    /// Live mode only: returns the completion failure.
    async fn generate_code(&self, description: &str, language: &str) -> Result<AssistantReply, AssistantError>;
}

// =============================================================================
// LIVE
// =============================================================================

pub struct LiveAssistant {
    client: CompletionClient,
}

impl LiveAssistant {
    #[must_use]
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Assistant for LiveAssistant {
    fn mode(&self) -> AssistantMode {
        AssistantMode::Live
    }

    async fn chat(&self, message: &str, history: &[Message]) -> Result<AssistantReply, AssistantError> {
        info!(message_len = message.len(), history_len = history.len(), "assistant: chat");
        let text = self.client.chat(message, history).await?;
        Ok(AssistantReply::live(text))
    }

    async fn analyze_code(&self, code: &str, language: &str) -> Result<AssistantReply, AssistantError> {
        info!(code_len = code.len(), %language, "assistant: analyze code");
        let text = self.client.analyze_code(code, language).await?;
        Ok(AssistantReply::live(text))
    }

    async fn generate_code(&self, description: &str, language: &str) -> Result<AssistantReply, AssistantError> {
        info!(description_len = description.len(), %language, "assistant: generate code");
        let text = self.client.generate_code(description, language).await?;
        Ok(AssistantReply::live(text))
    }
}

// =============================================================================
// SELECTION
// =============================================================================

/// Pick the assistant strategy for this process from parsed config.
///
/// Any configuration failure degrades to demo mode; it never aborts startup.
#[must_use]
pub fn select(config: Result<LlmConfig, LlmError>) -> Arc<dyn Assistant> {
    match config.and_then(|cfg| CompletionClient::from_config(&cfg)) {
        Ok(client) => {
            info!(model = client.model(), "completion client initialized, assistant live");
            Arc::new(LiveAssistant::new(client))
        }
        Err(e) => {
            warn!(error = %e, "completion client not configured, assistant running in demo mode");
            Arc::new(DemoAssistant)
        }
    }
}

/// [`select`] using the process environment.
#[must_use]
pub fn from_env() -> Arc<dyn Assistant> {
    select(LlmConfig::from_env())
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
