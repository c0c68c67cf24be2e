//! Liveness/readiness endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /health
///
/// Reports process liveness and database reachability.
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    groove_db::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
