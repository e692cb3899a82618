//! In-memory rate limiting.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<IpAddr, VecDeque<Instant>>`.
//! The server runs two independent limiters:
//! - General: 100 requests per 15 minutes per caller IP, on every route
//! - AI: 20 requests/min per caller IP plus 200 requests/min overall, on
//!   `/api/ai/*` only
//!
//! EVICTION
//! ========
//! Windows are pruned on every check. When the map grows past
//! `max_tracked_clients`, every client whose window has emptied is dropped in
//! one sweep, so one-off callers do not accumulate.

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::env_parse;

const DEFAULT_PER_CLIENT_LIMIT: usize = 20;
const DEFAULT_WINDOW_SECS: u64 = 60;
const DEFAULT_GLOBAL_LIMIT: usize = 200;
const DEFAULT_MAX_TRACKED_CLIENTS: usize = 10_000;

const DEFAULT_GENERAL_PER_CLIENT_LIMIT: usize = 100;
const DEFAULT_GENERAL_WINDOW_SECS: u64 = 15 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_client_limit: usize,
    /// Cap across all clients; `None` disables the global window.
    pub global_limit: Option<usize>,
    pub window: Duration,
    pub max_tracked_clients: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_client_limit: DEFAULT_PER_CLIENT_LIMIT,
            global_limit: Some(DEFAULT_GLOBAL_LIMIT),
            window: Duration::from_secs(DEFAULT_WINDOW_SECS),
            max_tracked_clients: DEFAULT_MAX_TRACKED_CLIENTS,
        }
    }
}

impl RateLimitConfig {
    /// AI-route limits.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            per_client_limit: env_parse("RATE_LIMIT_AI_PER_CLIENT", DEFAULT_PER_CLIENT_LIMIT),
            global_limit: Some(env_parse("RATE_LIMIT_AI_GLOBAL", DEFAULT_GLOBAL_LIMIT)),
            window: Duration::from_secs(env_parse("RATE_LIMIT_AI_WINDOW_SECS", DEFAULT_WINDOW_SECS)),
            max_tracked_clients: env_parse("RATE_LIMIT_MAX_TRACKED_CLIENTS", DEFAULT_MAX_TRACKED_CLIENTS),
        }
    }

    /// Default per-IP limit applied to every route.
    #[must_use]
    pub fn general() -> Self {
        Self {
            per_client_limit: DEFAULT_GENERAL_PER_CLIENT_LIMIT,
            global_limit: None,
            window: Duration::from_secs(DEFAULT_GENERAL_WINDOW_SECS),
            max_tracked_clients: DEFAULT_MAX_TRACKED_CLIENTS,
        }
    }

    /// [`RateLimitConfig::general`] with `RATE_LIMIT_GENERAL_*` overrides.
    #[must_use]
    pub fn general_from_env() -> Self {
        Self {
            per_client_limit: env_parse("RATE_LIMIT_GENERAL_PER_CLIENT", DEFAULT_GENERAL_PER_CLIENT_LIMIT),
            window: Duration::from_secs(env_parse("RATE_LIMIT_GENERAL_WINDOW_SECS", DEFAULT_GENERAL_WINDOW_SECS)),
            max_tracked_clients: env_parse("RATE_LIMIT_MAX_TRACKED_CLIENTS", DEFAULT_MAX_TRACKED_CLIENTS),
            ..Self::general()
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("per-client rate limit exceeded (max {limit} requests/{window_secs}s)")]
    PerClientExceeded { limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} requests/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

/// Per-client allowance left after an admitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub limit: usize,
    pub remaining: usize,
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct RateLimiterInner {
    /// Per-client request timestamps.
    client_requests: HashMap<IpAddr, VecDeque<Instant>>,
    /// Global request timestamps.
    global_requests: VecDeque<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self { inner: Arc::new(Mutex::new(RateLimiterInner::default())), config }
    }

    /// Per-client limit this limiter enforces.
    #[must_use]
    pub fn per_client_limit(&self) -> usize {
        self.config.per_client_limit
    }

    /// Check both limits for `client` and record the request if allowed.
    ///
    /// # Errors
    ///
    /// Returns the first limit that would be exceeded; nothing is recorded.
    pub fn check_and_record(&self, client: IpAddr) -> Result<Quota, RateLimitError> {
        self.check_and_record_at(client, Instant::now())
    }

    pub(crate) fn check_and_record_at(&self, client: IpAddr, now: Instant) -> Result<Quota, RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;
        let window_secs = cfg.window.as_secs();

        if let Some(global_limit) = cfg.global_limit {
            prune_window(&mut inner.global_requests, now, cfg.window);
            if inner.global_requests.len() >= global_limit {
                return Err(RateLimitError::GlobalExceeded { limit: global_limit, window_secs });
            }
        }

        let client_count = inner.client_requests.get_mut(&client).map_or(0, |deque| {
            prune_window(deque, now, cfg.window);
            deque.len()
        });
        if client_count >= cfg.per_client_limit {
            return Err(RateLimitError::PerClientExceeded { limit: cfg.per_client_limit, window_secs });
        }

        inner
            .client_requests
            .entry(client)
            .or_default()
            .push_back(now);
        if cfg.global_limit.is_some() {
            inner.global_requests.push_back(now);
        }

        if inner.client_requests.len() > cfg.max_tracked_clients {
            sweep_idle(&mut inner.client_requests, now, cfg.window);
        }

        Ok(Quota { limit: cfg.per_client_limit, remaining: cfg.per_client_limit - client_count - 1 })
    }

    /// Number of clients with a live window entry.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .client_requests
            .len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) >= window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

fn sweep_idle(clients: &mut HashMap<IpAddr, VecDeque<Instant>>, now: Instant, window: Duration) {
    clients.retain(|_, deque| {
        prune_window(deque, now, window);
        !deque.is_empty()
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
