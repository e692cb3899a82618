//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the assistant strategy chosen at startup and both rate limiters.

use std::sync::Arc;

use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::services::assistant::Assistant;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<dyn Assistant>,
    /// In-memory rate limiter for AI requests.
    pub rate_limiter: RateLimiter,
    /// Per-IP limiter applied to every route.
    pub general_limiter: RateLimiter,
}

impl AppState {
    /// State with the default general limit (100 requests per 15 minutes).
    #[must_use]
    pub fn new(assistant: Arc<dyn Assistant>, rate_limiter: RateLimiter) -> Self {
        Self { assistant, rate_limiter, general_limiter: RateLimiter::new(RateLimitConfig::general()) }
    }

    #[must_use]
    pub fn with_general_limiter(mut self, general_limiter: RateLimiter) -> Self {
        self.general_limiter = general_limiter;
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
