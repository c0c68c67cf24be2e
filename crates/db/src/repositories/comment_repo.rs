//! Repository for the `comments` table.

use groove_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::comment::Comment;

/// Column list for comments queries.
const COMMENT_COLUMNS: &str = "id, review_id, author_id, body, created_at";

/// Provides CRUD and pagination operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Find a comment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        review_id: DbId,
        author_id: &str,
        body: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (review_id, author_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(review_id)
            .bind(author_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Delete a comment by its ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Look up the total-order position of a cursor row.
    pub async fn cursor_anchor(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar("SELECT created_at FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one page of comments for a review, ordered by
    /// `(created_at DESC, id DESC)`, starting strictly after the anchor row.
    pub async fn page_for_review(
        pool: &PgPool,
        review_id: DbId,
        take: i64,
        anchor: Option<(Timestamp, DbId)>,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        match anchor {
            Some((created_at, id)) => {
                let query = format!(
                    "SELECT {COMMENT_COLUMNS} FROM comments
                     WHERE review_id = $1 AND (created_at, id) < ($2, $3)
                     ORDER BY created_at DESC, id DESC
                     LIMIT $4"
                );
                sqlx::query_as::<_, Comment>(&query)
                    .bind(review_id)
                    .bind(created_at)
                    .bind(id)
                    .bind(take)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COMMENT_COLUMNS} FROM comments
                     WHERE review_id = $1
                     ORDER BY created_at DESC, id DESC
                     LIMIT $2"
                );
                sqlx::query_as::<_, Comment>(&query)
                    .bind(review_id)
                    .bind(take)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
