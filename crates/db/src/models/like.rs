//! Like join-row model and the toggle result.

use groove_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `likes` table -- the durable source of truth for
/// "did this user like this review". Existence is binary, never counted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub user_id: String,
    pub review_id: DbId,
    pub created_at: Timestamp,
}

/// Authoritative post-toggle state: the new flag and the re-read counter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes: i32,
}
