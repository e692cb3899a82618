//! LLM: completion client for the Viper assistant.
//!
//! DESIGN
//! ======
//! `CompletionClient` owns one `LlmChat` transport and exposes the three
//! assistant tasks (chat, analyze-code, generate-code). Each task picks its
//! system prompt and sampling settings, assembles the message array, issues
//! exactly one call, and substitutes a fixed fallback when the service
//! returns no text. The client is built once at startup and injected; there
//! is no process-global instance.

pub mod config;
pub mod openai;
pub mod prompts;
pub mod types;

use std::sync::Arc;

use config::LlmConfig;
pub use types::LlmChat;
use types::{CompletionOptions, LlmError, Message, Role};

/// Maximum number of prior messages forwarded with a chat turn.
pub const MAX_HISTORY_MESSAGES: usize = 50;

// =============================================================================
// COMPLETION CLIENT
// =============================================================================

pub struct CompletionClient {
    llm: Arc<dyn LlmChat>,
    model: String,
}

impl CompletionClient {
    /// Build a client backed by the OpenAI-compatible transport.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] if the configured key is unusable,
    /// so no request is ever sent with a placeholder credential, or an error
    /// if the HTTP client fails to build.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        config::parse_api_key(Some(&config.api_key))?;
        let transport = openai::OpenAiClient::new(config)?;
        let model = transport.model().to_string();
        Ok(Self::new(Arc::new(transport), model))
    }

    /// Wrap an existing transport (used by tests and alternative providers).
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, model: impl Into<String>) -> Self {
        Self { llm, model: model.into() }
    }

    /// Return the configured model name (e.g. `"deepseek-coder"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Conversational turn with prior history.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and body-parse failures.
    pub async fn chat(&self, message: &str, history: &[Message]) -> Result<String, LlmError> {
        let messages = build_chat_messages(message, history);
        self.complete(&messages, prompts::CHAT_OPTIONS, prompts::CHAT_FALLBACK)
            .await
    }

    /// Code review of a single snippet.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and body-parse failures.
    pub async fn analyze_code(&self, code: &str, language: &str) -> Result<String, LlmError> {
        let messages = [
            Message::system(prompts::ANALYZE_SYSTEM_PROMPT),
            Message::user(prompts::analyze_user_turn(code, language)),
        ];
        self.complete(&messages, prompts::ANALYZE_OPTIONS, prompts::ANALYZE_FALLBACK)
            .await
    }

    /// Code generation from a natural-language description.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and body-parse failures.
    pub async fn generate_code(&self, description: &str, language: &str) -> Result<String, LlmError> {
        let messages = [
            Message::system(prompts::GENERATE_SYSTEM_PROMPT),
            Message::user(prompts::generate_user_turn(description, language)),
        ];
        self.complete(&messages, prompts::GENERATE_OPTIONS, prompts::GENERATE_FALLBACK)
            .await
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: CompletionOptions,
        fallback: &str,
    ) -> Result<String, LlmError> {
        let response = self.llm.chat(messages, options).await?;
        tracing::debug!(
            model = %response.model,
            finish_reason = response.finish_reason.as_deref().unwrap_or("none"),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "llm: completion received"
        );
        Ok(response
            .content
            .unwrap_or_else(|| fallback.to_string()))
    }
}

/// Assemble `[system, ...history, user]` for a chat turn.
///
/// History keeps only user/assistant entries, in order, limited to the most
/// recent [`MAX_HISTORY_MESSAGES`].
#[must_use]
pub fn build_chat_messages(message: &str, history: &[Message]) -> Vec<Message> {
    let turns: Vec<&Message> = history
        .iter()
        .filter(|m| m.role() != Role::System)
        .collect();
    let skip = turns.len().saturating_sub(MAX_HISTORY_MESSAGES);

    let mut out = Vec::with_capacity(turns.len() - skip + 2);
    out.push(Message::system(prompts::CHAT_SYSTEM_PROMPT));
    out.extend(turns.into_iter().skip(skip).cloned());
    out.push(Message::user(message));
    out
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
