//! AI assistant routes.
//!
//! Each handler validates its body, calls the assistant strategy from
//! `AppState`, and translates the outcome to JSON. Demo and live mode look
//! identical here.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::services::assistant::AssistantError;
use crate::services::requests::{AnalyzeCodeRequest, ChatRequest, GenerateCodeRequest, ValidationError};
use crate::state::AppState;

// =============================================================================
// RESPONSE BODIES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyBody {
    pub response: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_demo: bool,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBody {
    pub analysis: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_demo: bool,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCodeBody {
    pub code: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_demo: bool,
    pub timestamp: String,
}

// =============================================================================
// ERRORS
// =============================================================================

pub const AI_LIMIT_MESSAGE: &str = "Too many AI requests";
pub const GENERAL_LIMIT_MESSAGE: &str = "Too many requests from this IP";

/// Route-level failure, rendered as `{error}` or `{error, message}`.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    /// The body could not be buffered (too large, or the stream failed).
    UnreadableBody { status: StatusCode, message: String },
    Upstream { error: &'static str, message: String },
    RateLimited { error: &'static str },
}

impl ApiError {
    fn upstream(error: &'static str, cause: &AssistantError) -> Self {
        error!(error = %cause, context = error, "ai: upstream failure");
        Self::Upstream { error, message: cause.to_string() }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response(),
            Self::UnreadableBody { status, message } => (status, Json(json!({ "error": message }))).into_response(),
            Self::Upstream { error, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": error, "message": message }))).into_response()
            }
            Self::RateLimited { error } => (StatusCode::TOO_MANY_REQUESTS, Json(json!({ "error": error }))).into_response(),
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/ai/chat`: conversational reply.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatReplyBody>, ApiError> {
    let req = ChatRequest::from_json(&request_body(body)?)?;
    let reply = state
        .assistant
        .chat(&req.message, &req.history)
        .await
        .map_err(|e| ApiError::upstream("Failed to get AI response", &e))?;
    Ok(Json(ChatReplyBody { response: reply.text, is_demo: reply.is_demo, timestamp: now_rfc3339() }))
}

/// `POST /api/ai/analyze-code`: code review.
pub async fn analyze_code(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisBody>, ApiError> {
    let req = AnalyzeCodeRequest::from_json(&request_body(body)?)?;
    let reply = state
        .assistant
        .analyze_code(&req.code, &req.language)
        .await
        .map_err(|e| ApiError::upstream("Failed to analyze code", &e))?;
    Ok(Json(AnalysisBody { analysis: reply.text, is_demo: reply.is_demo, timestamp: now_rfc3339() }))
}

/// `POST /api/ai/generate-code`: code from a description.
pub async fn generate_code(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GeneratedCodeBody>, ApiError> {
    let req = GenerateCodeRequest::from_json(&request_body(body)?)?;
    let reply = state
        .assistant
        .generate_code(&req.description, &req.language)
        .await
        .map_err(|e| ApiError::upstream("Failed to generate code", &e))?;
    Ok(Json(GeneratedCodeBody { code: reply.text, is_demo: reply.is_demo, timestamp: now_rfc3339() }))
}

/// Missing or non-JSON bodies validate like `{}`. A body that cannot be
/// buffered keeps its own status (413 past the size limit).
fn request_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::BytesRejection(e)) => {
            warn!(error = %e, status = %e.status(), "ai: request body not readable");
            Err(ApiError::UnreadableBody { status: e.status(), message: e.body_text() })
        }
        Err(rejection) => {
            warn!(error = %rejection, "ai: request body is not JSON");
            Ok(Value::Null)
        }
    }
}

pub(crate) fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

// =============================================================================
// RATE LIMIT MIDDLEWARE
// =============================================================================

/// Reject AI requests over the per-client or global window with 429.
pub async fn limit_ai_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = client_ip(&request);
    if let Err(e) = state.rate_limiter.check_and_record(client) {
        warn!(%client, error = %e, tracked_clients = state.rate_limiter.tracked_clients(), "ai: rate limited");
        return ApiError::RateLimited { error: AI_LIMIT_MESSAGE }.into_response();
    }
    next.run(request).await
}

pub(crate) fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |ConnectInfo(addr)| addr.ip())
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
