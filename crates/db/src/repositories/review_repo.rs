//! Repository for the `reviews` table.

use groove_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::review::{CreateReview, FeaturedReview, Review, UpdateReview};

/// Column list for reviews queries.
const REVIEW_COLUMNS: &str = "id, track_id, author_id, rating, title, body, likes, created_at";

/// Provides CRUD and pagination operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Find a review by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether this author already reviewed this track.
    ///
    /// Check-then-act: not atomic with the insert. The
    /// `uq_reviews_track_author` constraint backstops the race window, so a
    /// losing concurrent insert surfaces as a unique violation.
    pub async fn exists_for_track_author(
        pool: &PgPool,
        track_id: &str,
        author_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM reviews WHERE track_id = $1 AND author_id = $2")
                .bind(track_id)
                .bind(author_id)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }

    /// Create a new review, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: &str,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (track_id, author_id, rating, title, body)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {REVIEW_COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.track_id)
            .bind(author_id)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Update a review's rating, title, and/or body.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                rating = COALESCE($1, rating),
                title = COALESCE($2, title),
                body = COALESCE($3, body)
             WHERE id = $4
             RETURNING {REVIEW_COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.body)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a review by its ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Look up the total-order position of a cursor row.
    ///
    /// Returns `None` for an id that matches no review, which callers treat
    /// as an invalid cursor rather than a position.
    pub async fn cursor_anchor(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar("SELECT created_at FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one page of reviews for a track, ordered by
    /// `(created_at DESC, id DESC)`, starting strictly after the anchor row.
    ///
    /// Callers pass `limit + 1` and split off the extra row to decide the
    /// next cursor.
    pub async fn page_for_track(
        pool: &PgPool,
        track_id: &str,
        take: i64,
        anchor: Option<(Timestamp, DbId)>,
    ) -> Result<Vec<Review>, sqlx::Error> {
        match anchor {
            Some((created_at, id)) => {
                let query = format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews
                     WHERE track_id = $1 AND (created_at, id) < ($2, $3)
                     ORDER BY created_at DESC, id DESC
                     LIMIT $4"
                );
                sqlx::query_as::<_, Review>(&query)
                    .bind(track_id)
                    .bind(created_at)
                    .bind(id)
                    .bind(take)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews
                     WHERE track_id = $1
                     ORDER BY created_at DESC, id DESC
                     LIMIT $2"
                );
                sqlx::query_as::<_, Review>(&query)
                    .bind(track_id)
                    .bind(take)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Average rating for a track, `None` when it has no reviews.
    pub async fn avg_rating(pool: &PgPool, track_id: &str) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar("SELECT AVG(rating)::float8 FROM reviews WHERE track_id = $1")
            .bind(track_id)
            .fetch_one(pool)
            .await
    }

    /// The most recent reviews joined with their tracks, newest first.
    pub async fn recent_with_tracks(
        pool: &PgPool,
        take: i64,
    ) -> Result<Vec<FeaturedReview>, sqlx::Error> {
        sqlx::query_as::<_, FeaturedReview>(
            "SELECT r.id, r.rating, r.title, r.body, r.author_id, r.created_at,
                    t.id AS track_id, t.name AS track_name, t.artists AS track_artists,
                    t.album AS track_album, t.album_image AS track_image
             FROM reviews r
             INNER JOIN tracks t ON t.id = r.track_id
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $1",
        )
        .bind(take)
        .fetch_all(pool)
        .await
    }
}
