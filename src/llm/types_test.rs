use super::*;

#[test]
fn role_serializes_lowercase() {
    let json = serde_json::to_value(Message::assistant("hi")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "assistant", "content": "hi" }));
}

#[test]
fn role_parse_known_and_unknown() {
    assert_eq!(Role::parse("system"), Some(Role::System));
    assert_eq!(Role::parse("user"), Some(Role::User));
    assert_eq!(Role::parse("assistant"), Some(Role::Assistant));
    assert_eq!(Role::parse("tool"), None);
    assert_eq!(Role::parse("User"), None);
}

#[test]
fn message_deserializes_from_wire() {
    let msg: Message = serde_json::from_str(r#"{"role":"user","content":"hello"}"#).unwrap();
    assert_eq!(msg.role(), Role::User);
    assert_eq!(msg.content(), "hello");
}

#[test]
fn api_response_error_mentions_status_and_body() {
    let err = LlmError::ApiResponse { status: 500, body: "boom".into() };
    let text = err.to_string();
    assert!(text.contains("500"));
    assert!(text.contains("boom"));
}

#[test]
fn missing_api_key_names_the_variable() {
    let err = LlmError::MissingApiKey { var: "DEEPSEEK_API_KEY".into() };
    assert!(err.to_string().contains("DEEPSEEK_API_KEY"));
}
