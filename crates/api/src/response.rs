//! Shared response envelope types for API handlers.
//!
//! Wire field names are camelCase. Use these typed envelopes instead of
//! ad-hoc `serde_json::json!` bodies for compile-time safety and consistent
//! serialization.

use groove_core::types::DbId;
use serde::{Deserialize, Serialize};

/// A page of reviews plus the track's aggregate rating.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage<T: Serialize> {
    pub items: Vec<T>,
    pub avg: Option<f64>,
    pub next_cursor: Option<String>,
}

/// A plain cursor page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T: Serialize> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// An unpaginated item list.
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T: Serialize> {
    pub items: Vec<T>,
}

/// A page of catalog search results.
#[derive(Debug, Serialize)]
pub struct SearchPage<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// `{"review": ...}` envelope.
#[derive(Debug, Serialize)]
pub struct ReviewEnvelope<T: Serialize> {
    pub review: T,
}

/// `{"comment": ...}` envelope.
#[derive(Debug, Serialize)]
pub struct CommentEnvelope<T: Serialize> {
    pub comment: T,
}

/// `{"ok": true}` acknowledgement for deletions.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// A track as list endpoints present it (search, trending, featured).
///
/// Also round-trips through the trending cache, hence `Deserialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub image: Option<String>,
}

/// Render a next-cursor id as its opaque wire token.
pub fn cursor_token(cursor: Option<DbId>) -> Option<String> {
    cursor.map(|id| id.to_string())
}
