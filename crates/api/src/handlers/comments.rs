//! Handlers for review comments.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use groove_core::error::CoreError;
use groove_core::pagination::{
    clamp_limit, parse_cursor, split_page, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use groove_core::review::validate_comment_body;
use groove_core::types::{DbId, Timestamp};
use groove_db::models::comment::CreateComment;
use groove_db::repositories::{CommentRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::client_ip::ClientIp;
use crate::middleware::origin::TrustedOrigin;
use crate::query::PageParams;
use crate::ratelimit::{COMMENTS_CREATE, COMMENTS_GET, COMMENTS_MODIFY};
use crate::response::{cursor_token, CommentEnvelope, CursorPage, OkResponse};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Resolve a wire cursor token into its `(created_at, id)` anchor.
async fn resolve_cursor(
    pool: &sqlx::PgPool,
    cursor: Option<&str>,
) -> AppResult<Option<(Timestamp, DbId)>> {
    let Some(token) = cursor else {
        return Ok(None);
    };
    let id = parse_cursor(token)?;
    let created_at = CommentRepo::cursor_anchor(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Invalid cursor '{token}'")))
    })?;
    Ok(Some((created_at, id)))
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /reviews/{id}/comments?limit=&cursor=
///
/// Anonymous, IP-rate-limited page of a review's comments, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    ip: ClientIp,
    Path(review_id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce_ip("comments:get", ip.as_deref(), &COMMENTS_GET)
        .await?;

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let anchor = resolve_cursor(&state.pool, params.cursor.as_deref()).await?;

    let rows = CommentRepo::page_for_review(&state.pool, review_id, limit + 1, anchor).await?;
    let (items, next) = split_page(rows, limit, |c| c.id);

    Ok(Json(CursorPage {
        items,
        next_cursor: cursor_token(next),
    }))
}

/// POST /reviews/{id}/comments
///
/// Any authenticated identity may comment on an existing review.
pub async fn create_comment(
    _origin: TrustedOrigin,
    auth: AuthUser,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
    AppJson(input): AppJson<CreateComment>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce(
            &format!("comments:create:{}", auth.user_id),
            &COMMENTS_CREATE,
        )
        .await?;

    let body = input.body.trim();
    validate_comment_body(body)?;

    let review = ReviewRepo::find_by_id(&state.pool, review_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Review",
                id: review_id.to_string(),
            })
        })?;

    let comment = CommentRepo::create(&state.pool, review_id, &auth.user_id, body).await?;

    state.cache.invalidate_track(&review.track_id).await;

    tracing::info!(
        user_id = %auth.user_id,
        review_id,
        comment_id = comment.id,
        "Comment created"
    );

    Ok(Json(CommentEnvelope { comment }))
}

/// DELETE /comments/{id}
///
/// Owner-only deletion.
pub async fn delete_comment(
    _origin: TrustedOrigin,
    auth: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state
        .limiter
        .enforce(
            &format!("comments:modify:{}", auth.user_id),
            &COMMENTS_MODIFY,
        )
        .await?;

    let comment = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: comment_id.to_string(),
            })
        })?;

    if comment.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this comment".into(),
        )));
    }

    // The parent review names the track whose page shows the comment count.
    let review = ReviewRepo::find_by_id(&state.pool, comment.review_id).await?;

    CommentRepo::delete(&state.pool, comment_id).await?;

    if let Some(review) = review {
        state.cache.invalidate_track(&review.track_id).await;
    }

    tracing::info!(user_id = %auth.user_id, comment_id, "Comment deleted");

    Ok(Json(OkResponse::new()))
}
