//! Route definitions for reviews and their nested social interactions.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{comments, likes, reviews};
use crate::state::AppState;

/// Review routes mounted at `/reviews`.
///
/// ```text
/// GET    /                  -> list_reviews
/// POST   /                  -> create_review
/// PATCH  /{id}              -> update_review (owner only)
/// DELETE /{id}              -> delete_review (owner only)
/// GET    /{id}/like         -> like_status
/// POST   /{id}/like         -> toggle_like
/// GET    /{id}/comments     -> list_comments
/// POST   /{id}/comments     -> create_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/{id}",
            patch(reviews::update_review).delete(reviews::delete_review),
        )
        .route(
            "/{id}/like",
            get(likes::like_status).post(likes::toggle_like),
        )
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}
