//! Handler for the trending feed.
//!
//! Source order: Redis cache, then the catalog's chart endpoint, then the
//! locally cached popularity ranking. The feed degrades instead of failing:
//! an unreachable catalog yields whatever the tracks table remembers, and
//! an empty result is a valid (if dull) response.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use chrono::{Duration, Utc};
use groove_db::repositories::TrackRepo;

use crate::error::AppResult;
use crate::handlers::search::{summarize, warm_track_cache};
use crate::middleware::client_ip::ClientIp;
use crate::ratelimit::TRENDING_GET;
use crate::response::{ItemsResponse, TrackSummary};
use crate::state::AppState;
use crate::views::{TRENDING_KEY, TRENDING_TTL_SECS};

/// How many tracks the feed carries.
const TRENDING_LIMIT: i64 = 8;

/// How far back the popularity fallback looks.
const FALLBACK_WINDOW_DAYS: i64 = 7;

/// GET /trending
pub async fn trending(
    State(state): State<AppState>,
    ip: ClientIp,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce_ip("trending:get", ip.as_deref(), &TRENDING_GET)
        .await?;

    if let Some(items) = state.cache.get_json::<Vec<TrackSummary>>(TRENDING_KEY).await {
        if !items.is_empty() {
            return Ok(Json(ItemsResponse { items }));
        }
    }

    let mut items = match state.catalog.top_tracks(TRENDING_LIMIT).await {
        Ok(tracks) => {
            warm_track_cache(&state, &tracks).await;
            tracks.iter().map(summarize).collect()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Catalog chart fetch failed, using local ranking");
            Vec::new()
        }
    };

    // Top up a short chart from the local popularity ranking.
    if (items.len() as i64) < TRENDING_LIMIT {
        let cached_since = Utc::now() - Duration::days(FALLBACK_WINDOW_DAYS);
        let fallback =
            TrackRepo::popularity_ranking(&state.pool, cached_since, TRENDING_LIMIT).await?;
        for track in fallback {
            if (items.len() as i64) >= TRENDING_LIMIT {
                break;
            }
            if items.iter().any(|existing: &TrackSummary| existing.id == track.id) {
                continue;
            }
            items.push(TrackSummary {
                id: track.id,
                name: track.name,
                artists: track.artists,
                album: track.album,
                image: track.album_image,
            });
        }
    }

    if !items.is_empty() {
        state
            .cache
            .put_json(TRENDING_KEY, &items, TRENDING_TTL_SECS)
            .await;
    }

    Ok(Json(ItemsResponse { items }))
}
