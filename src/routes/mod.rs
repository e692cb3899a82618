//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the AI assistant endpoints and the health check under one Axum
//! router. Every route passes the general per-IP limiter, which reports its
//! quota in `RateLimit-*` headers; AI routes additionally pass the AI limiter.
//! JSON bodies are accepted up to 10 MB.

pub mod ai;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rate_limit::Quota;
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Full application router.
pub fn app(state: AppState, allowed_origin: &str) -> Router {
    let ai_routes = Router::new()
        .route("/chat", post(ai::chat))
        .route("/analyze-code", post(ai::analyze_code))
        .route("/generate-code", post(ai::generate_code))
        .route_layer(middleware::from_fn_with_state(state.clone(), ai::limit_ai_requests));

    Router::new()
        .nest("/api/ai", ai_routes)
        .route("/api/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(state.clone(), limit_requests))
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    let headers = [CONTENT_TYPE, AUTHORIZATION];
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        Err(e) => {
            tracing::warn!(%allowed_origin, error = %e, "invalid APP_URL, allowing any origin without credentials");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers(headers)
        }
    }
}

/// Reject callers over the general per-IP window with 429.
pub async fn limit_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = ai::client_ip(&request);
    match state.general_limiter.check_and_record(client) {
        Ok(quota) => {
            let mut response = next.run(request).await;
            insert_quota_headers(response.headers_mut(), quota);
            response
        }
        Err(e) => {
            tracing::warn!(%client, error = %e, "rate limited");
            let mut response = ai::ApiError::RateLimited { error: ai::GENERAL_LIMIT_MESSAGE }.into_response();
            let quota = Quota { limit: state.general_limiter.per_client_limit(), remaining: 0 };
            insert_quota_headers(response.headers_mut(), quota);
            response
        }
    }
}

fn insert_quota_headers(headers: &mut HeaderMap, quota: Quota) {
    headers.insert("ratelimit-limit", HeaderValue::from(quota.limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(quota.remaining));
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "timestamp": ai::now_rfc3339() }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
