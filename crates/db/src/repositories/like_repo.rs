//! Repository for the `likes` table and the denormalized `reviews.likes`
//! counter.
//!
//! The join row is the source of truth; the counter is a cached derived
//! value. Every mutation touches both inside one transaction, and the
//! counter moves only by relative increments, so concurrent toggles on the
//! same review serialize on the row locks without lost updates.

use groove_core::types::DbId;
use sqlx::PgPool;

use crate::models::like::LikeStatus;

/// Provides the like/unlike toggle and its read side.
pub struct LikeRepo;

impl LikeRepo {
    /// Flip the like state for `(user_id, review_id)`.
    ///
    /// Delete-first: a removed row means this call unlikes. Otherwise the
    /// insert uses `ON CONFLICT DO NOTHING` so a racing duplicate insert is
    /// a no-op instead of a double-counted like -- the counter only moves
    /// when the row mutation actually changed something. The returned count
    /// is re-read inside the same transaction, so it is the authoritative
    /// post-mutation value, not a client-side guess.
    pub async fn toggle(
        pool: &PgPool,
        user_id: &str,
        review_id: DbId,
    ) -> Result<LikeStatus, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND review_id = $2")
            .bind(user_id)
            .bind(review_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let liked = if removed > 0 {
            sqlx::query("UPDATE reviews SET likes = likes - 1 WHERE id = $1 AND likes > 0")
                .bind(review_id)
                .execute(&mut *tx)
                .await?;
            false
        } else {
            let inserted = sqlx::query(
                "INSERT INTO likes (user_id, review_id) VALUES ($1, $2)
                 ON CONFLICT (user_id, review_id) DO NOTHING",
            )
            .bind(user_id)
            .bind(review_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if inserted > 0 {
                sqlx::query("UPDATE reviews SET likes = likes + 1 WHERE id = $1")
                    .bind(review_id)
                    .execute(&mut *tx)
                    .await?;
            }
            true
        };

        let likes: i32 = sqlx::query_scalar("SELECT likes FROM reviews WHERE id = $1")
            .bind(review_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(LikeStatus { liked, likes })
    }

    /// Current like state for a review.
    ///
    /// The counter is returned for everyone; `liked` is only meaningful for
    /// an authenticated caller and is `false` without one. A review that
    /// does not exist reads as zero likes rather than an error, matching the
    /// public like-count endpoint's contract.
    pub async fn status(
        pool: &PgPool,
        user_id: Option<&str>,
        review_id: DbId,
    ) -> Result<LikeStatus, sqlx::Error> {
        let likes: Option<i32> = sqlx::query_scalar("SELECT likes FROM reviews WHERE id = $1")
            .bind(review_id)
            .fetch_optional(pool)
            .await?;

        let liked = match user_id {
            Some(user_id) => {
                let found: Option<i32> = sqlx::query_scalar(
                    "SELECT 1 FROM likes WHERE user_id = $1 AND review_id = $2",
                )
                .bind(user_id)
                .bind(review_id)
                .fetch_optional(pool)
                .await?;
                found.is_some()
            }
            None => false,
        };

        Ok(LikeStatus {
            liked,
            likes: likes.unwrap_or(0),
        })
    }
}
