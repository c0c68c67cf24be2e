//! Handler for the featured-reviews feed: a small random sample of recent
//! reviews for the landing page.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use groove_core::types::{DbId, Timestamp};
use groove_db::repositories::ReviewRepo;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::client_ip::ClientIp;
use crate::ratelimit::FEATURED_GET;
use crate::response::{ItemsResponse, TrackSummary};
use crate::state::AppState;

/// How many recent reviews to sample from.
const SAMPLE_POOL: i64 = 20;

/// How many reviews the feed shows.
const FEATURED_COUNT: usize = 3;

/// A featured review with its track.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedItem {
    pub id: DbId,
    pub rating: i32,
    pub title: Option<String>,
    pub body: String,
    pub author_id: String,
    pub created_at: Timestamp,
    pub track: TrackSummary,
}

/// GET /featured-reviews
pub async fn featured_reviews(
    State(state): State<AppState>,
    ip: ClientIp,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce_ip("featured:get", ip.as_deref(), &FEATURED_GET)
        .await?;

    let mut recent = ReviewRepo::recent_with_tracks(&state.pool, SAMPLE_POOL).await?;
    recent.shuffle(&mut rand::rng());
    recent.truncate(FEATURED_COUNT);

    let items = recent
        .into_iter()
        .map(|r| FeaturedItem {
            id: r.id,
            rating: r.rating,
            title: r.title,
            body: r.body,
            author_id: r.author_id,
            created_at: r.created_at,
            track: TrackSummary {
                id: r.track_id,
                name: r.track_name,
                artists: r.track_artists,
                album: r.track_album,
                image: r.track_image,
            },
        })
        .collect();

    Ok(Json(ItemsResponse { items }))
}
