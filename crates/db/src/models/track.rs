//! Cached catalog track model and DTOs.
//!
//! Tracks are a local cache of the external catalog, upserted as a side
//! effect of search and trending lookups. The primary key is the catalog's
//! own id, which is the stable join key for reviews.

use groove_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub album_image: Option<String>,
    pub preview_url: Option<String>,
    pub popularity: Option<i32>,
    pub cached_at: Timestamp,
}

/// DTO for upserting a track from catalog data.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub album_image: Option<String>,
    pub preview_url: Option<String>,
    pub popularity: Option<i32>,
}
