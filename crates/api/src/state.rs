use std::sync::Arc;

use groove_catalog::CatalogClient;

use crate::config::ServerConfig;
use crate::ratelimit::RateLimiter;
use crate::views::ViewCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: groove_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Fixed-window rate limiter backed by the shared counter store.
    pub limiter: RateLimiter,
    /// Best-effort cache for dependent views (track aggregates, trending).
    pub cache: ViewCache,
    /// Third-party catalog client.
    pub catalog: Arc<CatalogClient>,
}
