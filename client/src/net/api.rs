//! REST helpers for the assistant endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side: a stub returning an error, since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is flattened to a display string. The panel treats any
//! `Err` the same way (generic failure text plus an error notification), so
//! callers never need to match on transport detail.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AssistantReply, AssistantRequest};

/// Extract the assistant text and demo flag from a success body.
#[cfg(any(test, feature = "hydrate"))]
fn parse_reply(body: &serde_json::Value, field: &str) -> Result<AssistantReply, String> {
    let text = body
        .get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| format!("reply missing `{field}`"))?;
    let is_demo = body
        .get("isDemo")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    Ok(AssistantReply { text: text.to_owned(), is_demo })
}

/// Describe a non-success response, preferring the server's `message`.
#[cfg(any(test, feature = "hydrate"))]
fn error_message(status: u16, body: Option<&serde_json::Value>) -> String {
    let field = |key: &str| {
        body.and_then(|b| b.get(key))
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
    };
    match (field("error"), field("message")) {
        (Some(error), Some(message)) => format!("{error}: {message} ({status})"),
        (Some(error), None) => format!("{error} ({status})"),
        _ => format!("assistant request failed: {status}"),
    }
}

/// Issue the single POST a pending turn needs and decode the reply.
///
/// # Errors
///
/// Returns a display string on transport failure, non-success status, or a
/// body without the expected reply field.
pub async fn send_assistant_request(request: &AssistantRequest) -> Result<AssistantReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(request.endpoint())
            .json(&request.body())
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let body = resp.json::<serde_json::Value>().await.ok();
        if !resp.ok() {
            let message = error_message(resp.status(), body.as_ref());
            log::warn!("assistant request to {} failed: {message}", request.endpoint());
            return Err(message);
        }
        let body = body.ok_or_else(|| "assistant reply was not JSON".to_owned())?;
        parse_reply(&body, request.reply_field())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}
