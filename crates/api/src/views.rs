//! Best-effort cache for dependent views.
//!
//! Two kinds of entries live here: per-track aggregates (invalidated by a
//! push signal whenever a mutation changes what the track page shows) and
//! the trending feed (TTL-bounded, since its source is an external chart
//! that moves slowly). Every operation degrades to a miss when Redis is
//! absent or failing -- a cache problem must never fail the primary
//! response.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// TTL for per-track aggregate entries. Push invalidation is the primary
/// freshness mechanism; the TTL only bounds staleness if a delete is lost.
const TRACK_VIEW_TTL_SECS: u64 = 60 * 60;

/// TTL for the trending feed.
pub const TRENDING_TTL_SECS: u64 = 24 * 60 * 60;

/// Key for a track's cached aggregate (average rating).
pub fn track_avg_key(track_id: &str) -> String {
    format!("views:track-avg:{track_id}")
}

/// Key for the cached trending feed.
pub const TRENDING_KEY: &str = "views:trending";

/// Handle on the shared view cache. Cheap to clone.
#[derive(Clone)]
pub struct ViewCache {
    conn: Option<ConnectionManager>,
}

impl ViewCache {
    pub fn new(conn: Option<ConnectionManager>) -> Self {
        Self { conn }
    }

    /// Fetch and decode a cached value. Any miss, decode failure, or store
    /// error reads as `None`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.conn.clone()?;
        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).ok(),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, key, "View cache read failed");
                None
            }
        }
    }

    /// Store a value with a TTL. Failures are logged and swallowed.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, key, "View cache encode failed");
                return;
            }
        };
        if let Err(err) = conn.set_ex::<_, _, ()>(key, raw, ttl_secs).await {
            tracing::warn!(error = %err, key, "View cache write failed");
        }
    }

    /// Cache a track's average rating.
    pub async fn put_track_avg(&self, track_id: &str, avg: &Option<f64>) {
        self.put_json(&track_avg_key(track_id), avg, TRACK_VIEW_TTL_SECS)
            .await;
    }

    /// Push-invalidate the aggregate view for a track.
    ///
    /// Called after every successful mutation that changes what the track's
    /// page shows, so subsequent reads recompute instead of waiting out a
    /// TTL.
    pub async fn invalidate_track(&self, track_id: &str) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };
        if let Err(err) = conn.del::<_, ()>(track_avg_key(track_id)).await {
            tracing::warn!(error = %err, track_id, "View invalidation failed");
        }
    }
}
