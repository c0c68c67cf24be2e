//! Shared harness for router-level integration tests.
//!
//! Mirrors production wiring through `build_app_router` so tests exercise
//! the same middleware stack (CORS, request ID, timeout, body cap, panic
//! recovery) that the binary uses. Redis is absent, so the limiter runs
//! fail-open and the view cache is a pass-through; the catalog client
//! points at a closed local port so upstream calls fail fast.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::http::{Method, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use groove_api::auth::jwt::{generate_session_token, JwtConfig};
use groove_api::config::ServerConfig;
use groove_api::ratelimit::RateLimiter;
use groove_api::router::build_app_router;
use groove_api::state::AppState;
use groove_api::views::ViewCache;
use groove_catalog::{CatalogClient, CatalogConfig};

/// The origin the test config trusts.
pub const TRUSTED_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults and no external stores.
pub fn test_config() -> ServerConfig {
    let mut trusted_origins = HashSet::new();
    trusted_origins.insert(TRUSTED_ORIGIN.to_string());

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        production: false,
        trusted_origins,
        cors_origins: vec![TRUSTED_ORIGIN.to_string()],
        request_timeout_secs: 30,
        trust_proxy: false,
        redis_url: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_mins: 60,
        },
        // A closed port: any catalog call errors immediately.
        catalog: CatalogConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            token_url: "http://127.0.0.1:9/token".to_string(),
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            timeout_secs: 1,
        },
    }
}

/// Build the full application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        limiter: RateLimiter::new(None, true),
        cache: ViewCache::new(None),
        catalog: Arc::new(CatalogClient::new(config.catalog.clone())),
    };
    build_app_router(state, &config)
}

/// Mint a session token for a test identity.
pub fn auth_token(identity: &str) -> String {
    generate_session_token(identity, &test_config().jwt).expect("token generation")
}

/// Send a request. Mutating helpers below attach the trusted origin; this
/// low-level variant leaves every header to the caller.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
    origin: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(origin) = origin {
        builder = builder.header(ORIGIN, origin);
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Some(body),
        Some(token),
        Some(TRUSTED_ORIGIN),
    )
    .await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Method::PATCH,
        uri,
        Some(body),
        Some(token),
        Some(TRUSTED_ORIGIN),
    )
    .await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Method::DELETE,
        uri,
        None,
        Some(token),
        Some(TRUSTED_ORIGIN),
    )
    .await
}

/// Collect a response body as parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a review through the API, returning its JSON representation.
pub async fn create_review(
    pool: &PgPool,
    track_id: &str,
    identity: &str,
    rating: i64,
    body: &str,
) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/reviews",
        serde_json::json!({"trackId": track_id, "rating": rating, "body": body}),
        &auth_token(identity),
    )
    .await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::OK,
        "review creation should succeed"
    );
    body_json(response).await["review"].clone()
}
