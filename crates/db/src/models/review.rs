//! Review entity model and DTOs.

use groove_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
///
/// `likes` is a denormalized counter kept in sync by the like toggle; it is
/// never written by review mutations.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: DbId,
    pub track_id: String,
    pub author_id: String,
    pub rating: i32,
    pub title: Option<String>,
    pub body: String,
    pub likes: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a new review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub track_id: String,
    pub rating: i32,
    pub title: Option<String>,
    pub body: String,
}

/// DTO for updating an existing review. All fields optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReview {
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// A recent review joined with its track, for the featured feed.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedReview {
    pub id: DbId,
    pub rating: i32,
    pub title: Option<String>,
    pub body: String,
    pub author_id: String,
    pub created_at: Timestamp,
    pub track_id: String,
    pub track_name: String,
    pub track_artists: Vec<String>,
    pub track_album: String,
    pub track_image: Option<String>,
}
