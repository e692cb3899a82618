//! Completion service configuration parsed from environment variables.

use super::types::LlmError;

pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";
pub const PLACEHOLDER_API_KEY: &str = "your-deepseek-api-key";
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-coder";

/// Optional transport timeouts. `None` leaves the reqwest default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `DEEPSEEK_API_KEY` (the sample placeholder counts as unset)
    ///
    /// Optional:
    /// - `DEEPSEEK_BASE_URL`: default `https://api.deepseek.com`
    /// - `LLM_MODEL`: default `deepseek-coder`
    /// - `LLM_REQUEST_TIMEOUT_SECS`, `LLM_CONNECT_TIMEOUT_SECS`: unset by default
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when no usable key is configured.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when no usable key is configured.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let api_key = parse_api_key(lookup(API_KEY_VAR).as_deref())?;
        let base_url = lookup("DEEPSEEK_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = lookup("LLM_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeouts = LlmTimeouts {
            request_secs: parse_secs(lookup("LLM_REQUEST_TIMEOUT_SECS").as_deref()),
            connect_secs: parse_secs(lookup("LLM_CONNECT_TIMEOUT_SECS").as_deref()),
        };

        Ok(Self { api_key, base_url, model, timeouts })
    }
}

/// `true` when `raw` cannot authenticate against the completion service.
#[must_use]
pub fn is_unusable_key(raw: &str) -> bool {
    let key = raw.trim();
    key.is_empty() || key == PLACEHOLDER_API_KEY
}

pub(crate) fn parse_api_key(raw: Option<&str>) -> Result<String, LlmError> {
    match raw {
        Some(key) if !is_unusable_key(key) => Ok(key.trim().to_string()),
        _ => Err(LlmError::MissingApiKey { var: API_KEY_VAR.into() }),
    }
}

fn parse_secs(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
