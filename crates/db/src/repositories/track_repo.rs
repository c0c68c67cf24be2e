//! Repository for the `tracks` table (local catalog cache).

use groove_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::track::{Track, UpsertTrack};

/// Column list for tracks queries.
const TRACK_COLUMNS: &str =
    "id, name, artists, album, album_image, preview_url, popularity, cached_at";

/// Provides upsert and lookup operations for cached catalog tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Find a track by its catalog id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {TRACK_COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert catalog data for a track, refreshing `cached_at`.
    pub async fn upsert(pool: &PgPool, input: &UpsertTrack) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (id, name, artists, album, album_image, preview_url, popularity)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                artists = EXCLUDED.artists,
                album = EXCLUDED.album,
                album_image = EXCLUDED.album_image,
                preview_url = EXCLUDED.preview_url,
                popularity = EXCLUDED.popularity,
                cached_at = now()
             RETURNING {TRACK_COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.artists)
            .bind(&input.album)
            .bind(&input.album_image)
            .bind(&input.preview_url)
            .bind(input.popularity)
            .fetch_one(pool)
            .await
    }

    /// Insert a placeholder row if the track is not cached yet.
    ///
    /// Reviews reference tracks by foreign key, so a review on a track we
    /// have never searched for still needs a row; real catalog data fills it
    /// in on the next search hit.
    pub async fn ensure_exists(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO tracks (id, name, artists, album)
             VALUES ($1, 'Unknown', '{}', '')
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Locally cached popularity ranking, used when the catalog's chart
    /// endpoint is unavailable.
    pub async fn popularity_ranking(
        pool: &PgPool,
        cached_since: Timestamp,
        limit: i64,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let query = format!(
            "SELECT {TRACK_COLUMNS} FROM tracks
             WHERE popularity IS NOT NULL AND cached_at >= $1
             ORDER BY popularity DESC, cached_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(cached_since)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
