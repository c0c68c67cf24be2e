//! Handlers for the like toggle and its read side.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use groove_core::error::CoreError;
use groove_core::types::DbId;
use groove_db::repositories::{LikeRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::middleware::origin::TrustedOrigin;
use crate::ratelimit::LIKES_TOGGLE;
use crate::state::AppState;

/// GET /reviews/{id}/like
///
/// The like count is public; `liked` reflects the caller only when a valid
/// token is presented. A missing review reads as zero likes.
pub async fn like_status(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let status = LikeRepo::status(&state.pool, auth.user_id(), review_id).await?;
    Ok(Json(status))
}

/// POST /reviews/{id}/like
///
/// Flip the caller's like. The response carries the authoritative
/// post-toggle state, re-read inside the toggle transaction, so concurrent
/// togglers converge on the same displayed count regardless of what their
/// optimistic UI guessed.
pub async fn toggle_like(
    _origin: TrustedOrigin,
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce(&format!("likes:toggle:{}", auth.user_id), &LIKES_TOGGLE)
        .await?;

    let review = ReviewRepo::find_by_id(&state.pool, review_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Review",
                id: review_id.to_string(),
            })
        })?;

    let status = LikeRepo::toggle(&state.pool, &auth.user_id, review_id).await?;

    state.cache.invalidate_track(&review.track_id).await;

    tracing::info!(
        user_id = %auth.user_id,
        review_id,
        liked = status.liked,
        likes = status.likes,
        "Like toggled"
    );

    Ok(Json(status))
}
