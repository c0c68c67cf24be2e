//! Route definitions for comment deletion.

use axum::routing::delete;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Comment routes mounted at `/comments`.
///
/// ```text
/// DELETE /{id}              -> delete_comment (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comments::delete_comment))
}
