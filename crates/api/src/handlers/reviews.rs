//! Handlers for review CRUD and the paginated review list.
//!
//! Every mutation walks the same gate order: origin, identity, rate limit,
//! payload validation, not-found, ownership, persistence, view
//! invalidation. Not-found is checked before ownership so a non-owner
//! cannot tell "exists, not yours" apart from "absent".

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use groove_core::error::CoreError;
use groove_core::pagination::{
    clamp_limit, parse_cursor, split_page, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use groove_core::review::{
    validate_rating, validate_review_body, validate_review_title, validate_track_id,
};
use groove_core::types::{DbId, Timestamp};
use groove_db::models::review::{CreateReview, Review, UpdateReview};
use groove_db::repositories::{ReviewRepo, TrackRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::client_ip::ClientIp;
use crate::middleware::origin::TrustedOrigin;
use crate::query::ReviewListParams;
use crate::ratelimit::{REVIEWS_CREATE, REVIEWS_GET, REVIEWS_MODIFY};
use crate::response::{cursor_token, OkResponse, ReviewEnvelope, ReviewPage};
use crate::state::AppState;
use crate::views::track_avg_key;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a review and verify the caller owns it.
async fn load_owned_review(
    pool: &sqlx::PgPool,
    review_id: DbId,
    user_id: &str,
) -> AppResult<Review> {
    let review = ReviewRepo::find_by_id(pool, review_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Review",
                id: review_id.to_string(),
            })
        })?;

    if review.author_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this review".into(),
        )));
    }

    Ok(review)
}

/// Resolve a wire cursor token into its `(created_at, id)` anchor.
///
/// A token naming no existing review is invalid input, never a position.
async fn resolve_cursor(
    pool: &sqlx::PgPool,
    cursor: Option<&str>,
) -> AppResult<Option<(Timestamp, DbId)>> {
    let Some(token) = cursor else {
        return Ok(None);
    };
    let id = parse_cursor(token)?;
    let created_at = ReviewRepo::cursor_anchor(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Invalid cursor '{token}'")))
    })?;
    Ok(Some((created_at, id)))
}

/// The track's average rating, via the view cache when warm.
async fn track_avg(state: &AppState, track_id: &str) -> AppResult<Option<f64>> {
    let key = track_avg_key(track_id);
    if let Some(avg) = state.cache.get_json::<Option<f64>>(&key).await {
        return Ok(avg);
    }
    let avg = ReviewRepo::avg_rating(&state.pool, track_id).await?;
    state.cache.put_track_avg(track_id, &avg).await;
    Ok(avg)
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /reviews?trackId=&limit=&cursor=
///
/// Anonymous, IP-rate-limited page of a track's reviews plus the average
/// rating. Without a `trackId` the envelope is empty rather than an error.
pub async fn list_reviews(
    State(state): State<AppState>,
    ip: ClientIp,
    Query(params): Query<ReviewListParams>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce_ip("reviews:get", ip.as_deref(), &REVIEWS_GET)
        .await?;

    let Some(track_id) = params.track_id.filter(|t| !t.is_empty()) else {
        return Ok(Json(ReviewPage {
            items: Vec::<Review>::new(),
            avg: None,
            next_cursor: None,
        }));
    };

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let anchor = resolve_cursor(&state.pool, params.cursor.as_deref()).await?;

    // The page and the aggregate are independent reads; fetch them together.
    let (rows, avg) = tokio::join!(
        ReviewRepo::page_for_track(&state.pool, &track_id, limit + 1, anchor),
        track_avg(&state, &track_id),
    );
    let (items, next) = split_page(rows?, limit, |r| r.id);

    Ok(Json(ReviewPage {
        items,
        avg: avg?,
        next_cursor: cursor_token(next),
    }))
}

/// POST /reviews
///
/// Create the caller's review for a track: at most one per (track, author).
pub async fn create_review(
    _origin: TrustedOrigin,
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateReview>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce(&format!("reviews:create:{}", auth.user_id), &REVIEWS_CREATE)
        .await?;

    validate_track_id(&input.track_id)?;
    validate_rating(input.rating)?;
    validate_review_body(&input.body)?;
    if let Some(ref title) = input.title {
        validate_review_title(title)?;
    }

    // Check-then-act; the unique constraint backstops the race (see DESIGN).
    if ReviewRepo::exists_for_track_author(&state.pool, &input.track_id, &auth.user_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Review already exists".into(),
        )));
    }

    // A review must reference a cached track row; stub one in if the track
    // has never been searched for.
    TrackRepo::ensure_exists(&state.pool, &input.track_id).await?;

    let review = ReviewRepo::create(&state.pool, &auth.user_id, &input).await?;

    state.cache.invalidate_track(&input.track_id).await;

    tracing::info!(
        user_id = %auth.user_id,
        track_id = %review.track_id,
        review_id = review.id,
        "Review created"
    );

    Ok(Json(ReviewEnvelope { review }))
}

/// PATCH /reviews/{id}
///
/// Owner-only update of rating, title, and/or body.
pub async fn update_review(
    _origin: TrustedOrigin,
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
    AppJson(input): AppJson<UpdateReview>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce(&format!("reviews:modify:{}", auth.user_id), &REVIEWS_MODIFY)
        .await?;

    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }
    if let Some(ref body) = input.body {
        validate_review_body(body)?;
    }
    if let Some(ref title) = input.title {
        validate_review_title(title)?;
    }

    let existing = load_owned_review(&state.pool, review_id, &auth.user_id).await?;

    let review = ReviewRepo::update(&state.pool, review_id, &input).await?;

    state.cache.invalidate_track(&existing.track_id).await;

    tracing::info!(user_id = %auth.user_id, review_id, "Review updated");

    Ok(Json(ReviewEnvelope { review }))
}

/// DELETE /reviews/{id}
///
/// Owner-only deletion; likes and comments go with the review.
pub async fn delete_review(
    _origin: TrustedOrigin,
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce(&format!("reviews:modify:{}", auth.user_id), &REVIEWS_MODIFY)
        .await?;

    let existing = load_owned_review(&state.pool, review_id, &auth.user_id).await?;

    ReviewRepo::delete(&state.pool, review_id).await?;

    state.cache.invalidate_track(&existing.track_id).await;

    tracing::info!(user_id = %auth.user_id, review_id, "Review deleted");

    Ok(Json(OkResponse::new()))
}
