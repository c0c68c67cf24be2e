//! Fixed-window rate-limit arithmetic.
//!
//! The counter itself lives in a shared store (Redis, see the api crate);
//! this module holds the window configuration and the pure decision taken
//! from a post-increment count and the counter key's remaining TTL. Fixed
//! windows reset at discrete boundaries, so a burst of up to `2 * limit`
//! straddling a boundary is possible -- accepted imprecision for abuse
//! mitigation, not billing-grade accounting.

/// A per-key budget: at most `limit` requests inside each `window_ms` slice.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub limit: i64,
    pub window_ms: i64,
}

impl RateLimitConfig {
    pub const fn new(limit: i64, window_ms: i64) -> Self {
        Self { limit, window_ms }
    }

    /// `n` requests per minute.
    pub const fn per_minute(limit: i64) -> Self {
        Self::new(limit, 60_000)
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Milliseconds until the window resets. Positive even on allowed calls
    /// so callers can surface the reset time uniformly.
    pub retry_after_ms: i64,
}

impl RateLimitDecision {
    /// Seconds until reset, rounded up, for the `Retry-After` header.
    pub fn retry_after_secs(&self) -> i64 {
        (self.retry_after_ms + 999) / 1000
    }
}

/// Decide from a post-increment `count` and the key's remaining `ttl_ms`.
///
/// The count is compared to the limit *after* the increment, so the call
/// that takes the counter to exactly `limit` is the last one allowed. A
/// non-positive TTL means the store could not report one; the full window is
/// used as the retry hint.
pub fn evaluate(count: i64, ttl_ms: i64, config: &RateLimitConfig) -> RateLimitDecision {
    let retry_after_ms = if ttl_ms > 0 { ttl_ms } else { config.window_ms };
    RateLimitDecision {
        allowed: count <= config.limit,
        retry_after_ms,
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
