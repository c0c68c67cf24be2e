//! Handler for catalog track search.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use futures::future::join_all;
use groove_catalog::CatalogTrack;
use groove_db::models::track::UpsertTrack;
use groove_db::repositories::TrackRepo;

use crate::error::AppResult;
use crate::middleware::client_ip::ClientIp;
use crate::query::SearchParams;
use crate::ratelimit::SEARCH_GET;
use crate::response::{SearchPage, TrackSummary};
use crate::state::AppState;

/// Default number of search results per page.
const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Maximum number of search results per page.
const MAX_SEARCH_LIMIT: i64 = 50;

/// Build the list-endpoint presentation of a catalog track.
pub fn summarize(track: &CatalogTrack) -> TrackSummary {
    TrackSummary {
        id: track.id.clone(),
        name: track.name.clone(),
        artists: track.artist_names(),
        album: track.album_name(),
        image: track.album_image(),
    }
}

/// Upsert catalog hits into the local track cache, best-effort.
///
/// A failed upsert must not fail the search response; it only means the
/// local popularity ranking lags the catalog.
pub async fn warm_track_cache(state: &AppState, tracks: &[CatalogTrack]) {
    let upserts = tracks.iter().map(|track| {
        let input = UpsertTrack {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: track.artist_names(),
            album: track.album_name(),
            album_image: track.album_image(),
            preview_url: track.preview_url.clone(),
            popularity: track.popularity,
        };
        let pool = state.pool.clone();
        async move {
            if let Err(err) = TrackRepo::upsert(&pool, &input).await {
                tracing::warn!(error = %err, track_id = %input.id, "Track cache upsert failed");
            }
        }
    });
    join_all(upserts).await;
}

/// GET /search?q=&limit=&page=
///
/// Pass-through to the catalog provider; hits are cached into the local
/// tracks table as a side effect. Upstream failure is a 502.
pub async fn search_tracks(
    State(state): State<AppState>,
    ip: ClientIp,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce_ip("search:get", ip.as_deref(), &SEARCH_GET)
        .await?;

    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);
    let page = params.page.unwrap_or(1).max(1);

    let Some(query) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(Json(SearchPage {
            items: Vec::<TrackSummary>::new(),
            total: 0,
            page,
            limit,
        }));
    };

    let results = state.catalog.search_tracks(query, limit, page).await?;

    warm_track_cache(&state, &results.items).await;

    Ok(Json(SearchPage {
        items: results.items.iter().map(summarize).collect(),
        total: results.total,
        page,
        limit,
    }))
}
