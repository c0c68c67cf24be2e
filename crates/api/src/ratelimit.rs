//! Redis-backed fixed-window rate limiter.
//!
//! One counter key per `action:identity` pair: `INCR` on every check, an
//! expiry of one window set on the first increment, and the decision taken
//! from the post-increment count (see `groove_core::ratelimit`). Counter
//! mutations are single-key atomic operations, so concurrent checks from
//! many handlers need no coordination beyond Redis itself.
//!
//! When the store is unreachable the limiter degrades per deployment: deny
//! in production (abuse protection must not silently vanish), allow
//! otherwise (local development runs without Redis).

use groove_core::ratelimit::{evaluate, RateLimitConfig, RateLimitDecision};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::AppError;

/* --------------------------------------------------------------------------
Per-route budgets
-------------------------------------------------------------------------- */

pub const REVIEWS_GET: RateLimitConfig = RateLimitConfig::per_minute(120);
pub const REVIEWS_CREATE: RateLimitConfig = RateLimitConfig::per_minute(20);
pub const REVIEWS_MODIFY: RateLimitConfig = RateLimitConfig::per_minute(30);
pub const LIKES_TOGGLE: RateLimitConfig = RateLimitConfig::per_minute(60);
pub const COMMENTS_GET: RateLimitConfig = RateLimitConfig::per_minute(120);
pub const COMMENTS_CREATE: RateLimitConfig = RateLimitConfig::per_minute(30);
pub const COMMENTS_MODIFY: RateLimitConfig = RateLimitConfig::per_minute(30);
pub const SEARCH_GET: RateLimitConfig = RateLimitConfig::per_minute(60);
pub const TRENDING_GET: RateLimitConfig = RateLimitConfig::per_minute(60);
pub const FEATURED_GET: RateLimitConfig = RateLimitConfig::per_minute(60);

/* --------------------------------------------------------------------------
Limiter
-------------------------------------------------------------------------- */

/// Fixed-window counter gate over the shared Redis store.
#[derive(Clone)]
pub struct RateLimiter {
    conn: Option<ConnectionManager>,
    fail_open: bool,
}

impl RateLimiter {
    pub fn new(conn: Option<ConnectionManager>, fail_open: bool) -> Self {
        Self { conn, fail_open }
    }

    /// Count this call against `key` and decide whether it is allowed.
    pub async fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitDecision {
        let Some(conn) = &self.conn else {
            return self.degraded(config);
        };

        let mut conn = conn.clone();
        match self.count(&mut conn, key, config).await {
            Ok(decision) => decision,
            Err(err) => {
                tracing::warn!(error = %err, key, "Rate-limit store unavailable");
                self.degraded(config)
            }
        }
    }

    /// Like [`check`](Self::check), but mapping a denial to [`AppError`].
    pub async fn enforce(&self, key: &str, config: &RateLimitConfig) -> Result<(), AppError> {
        let decision = self.check(key, config).await;
        if decision.allowed {
            Ok(())
        } else {
            Err(AppError::RateLimited {
                retry_after_ms: decision.retry_after_ms,
            })
        }
    }

    /// Enforce an IP-keyed budget, skipping when the client IP is unknown.
    ///
    /// Without a trusted proxy there is no meaningful per-client key; a
    /// single shared bucket would let one caller starve everyone, so the
    /// check is skipped instead.
    pub async fn enforce_ip(
        &self,
        action: &str,
        ip: Option<&str>,
        config: &RateLimitConfig,
    ) -> Result<(), AppError> {
        match ip {
            Some(ip) => self.enforce(&format!("{action}:{ip}"), config).await,
            None => Ok(()),
        }
    }

    async fn count(
        &self,
        conn: &mut ConnectionManager,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, redis::RedisError> {
        let count: i64 = conn.incr(key, 1).await?;
        if count == 1 {
            let _: bool = conn.pexpire(key, config.window_ms).await?;
        }
        let ttl_ms: i64 = conn.pttl(key).await?;
        Ok(evaluate(count, ttl_ms, config))
    }

    fn degraded(&self, config: &RateLimitConfig) -> RateLimitDecision {
        RateLimitDecision {
            allowed: self.fail_open,
            retry_after_ms: config.window_ms,
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
