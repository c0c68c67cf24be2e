//! Route definitions for catalog search and the discovery feeds.

use axum::routing::get;
use axum::Router;

use crate::handlers::{featured, search, trending};
use crate::state::AppState;

/// Discovery routes mounted at the API root.
///
/// ```text
/// GET /search            -> search_tracks
/// GET /trending          -> trending
/// GET /featured-reviews  -> featured_reviews
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search_tracks))
        .route("/trending", get(trending::trending))
        .route("/featured-reviews", get(featured::featured_reviews))
}
