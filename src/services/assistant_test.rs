use super::*;
use crate::llm::config::{API_KEY_VAR, DEFAULT_BASE_URL, DEFAULT_MODEL, LlmTimeouts, PLACEHOLDER_API_KEY};
use crate::llm::types::{ChatResponse, CompletionOptions, LlmChat};

struct EchoLlm;

#[async_trait::async_trait]
impl LlmChat for EchoLlm {
    async fn chat(&self, messages: &[Message], _options: CompletionOptions) -> Result<ChatResponse, LlmError> {
        let last = messages.last().map(|m| m.content().to_string());
        Ok(ChatResponse { content: last, ..ChatResponse::default() })
    }
}

struct DownLlm;

#[async_trait::async_trait]
impl LlmChat for DownLlm {
    async fn chat(&self, _messages: &[Message], _options: CompletionOptions) -> Result<ChatResponse, LlmError> {
        Err(LlmError::ApiRequest("connection refused".into()))
    }
}

fn live(llm: Arc<dyn LlmChat>) -> LiveAssistant {
    LiveAssistant::new(CompletionClient::new(llm, "mock"))
}

fn config_with_key(key: &str) -> LlmConfig {
    LlmConfig {
        api_key: key.into(),
        base_url: DEFAULT_BASE_URL.into(),
        model: DEFAULT_MODEL.into(),
        timeouts: LlmTimeouts::default(),
    }
}

#[tokio::test]
async fn live_replies_are_not_demo() {
    let assistant = live(Arc::new(EchoLlm));
    let reply = assistant.chat("hello", &[]).await.unwrap();
    assert!(!reply.is_demo);
    assert_eq!(reply.text, "hello");

    let reply = assistant.generate_code("a parser", "python").await.unwrap();
    assert_eq!(reply.text, "Please generate python code for: a parser");
}

#[tokio::test]
async fn live_errors_surface_as_assistant_errors() {
    let assistant = live(Arc::new(DownLlm));
    let err = assistant.analyze_code("x", "python").await.unwrap_err();
    assert!(matches!(err, AssistantError::Llm(LlmError::ApiRequest(_))));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn select_missing_key_is_demo() {
    let assistant = select(Err(LlmError::MissingApiKey { var: API_KEY_VAR.into() }));
    assert_eq!(assistant.mode(), AssistantMode::Demo);
}

#[test]
fn select_placeholder_key_is_demo() {
    let assistant = select(Ok(config_with_key(PLACEHOLDER_API_KEY)));
    assert_eq!(assistant.mode(), AssistantMode::Demo);
}

#[test]
fn select_real_key_is_live() {
    let assistant = select(Ok(config_with_key("sk-live")));
    assert_eq!(assistant.mode(), AssistantMode::Live);
}
