//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Generic cursor-pagination parameters (`?limit=&cursor=`).
///
/// `limit` is clamped in the handler via `clamp_limit`; `cursor` is the id
/// of the last row from the previous page, validated before use.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

/// Query parameters for the review list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListParams {
    pub track_id: Option<String>,
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

/// Query parameters for catalog search (`?q=&limit=&page=`).
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}
