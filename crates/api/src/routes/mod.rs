pub mod comments;
pub mod discovery;
pub mod health;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reviews                       list (public), create (auth + origin)
/// /reviews/{id}                  update, delete (owner only)
/// /reviews/{id}/like             status (public), toggle (auth + origin)
/// /reviews/{id}/comments         list (public), create (auth + origin)
/// /comments/{id}                 delete (owner only)
///
/// /search                        catalog search (public)
/// /trending                      trending feed (public)
/// /featured-reviews              featured feed (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Review CRUD plus nested likes and comments.
        .nest("/reviews", reviews::router())
        // Comment deletion (flat id space, not nested under reviews).
        .nest("/comments", comments::router())
        // Catalog search and the discovery feeds.
        .merge(discovery::router())
}
