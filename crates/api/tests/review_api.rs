//! HTTP-level integration tests for the review endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    auth_token, body_json, build_test_app, create_review, delete, get, patch_json, post_json,
    send, TRUSTED_ORIGIN,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_for_unreviewed_track_is_empty(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/reviews?trackId=T1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
    assert_eq!(json["avg"], serde_json::Value::Null);
    assert_eq!(json["nextCursor"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_without_track_id_is_empty(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/reviews").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_reflects_created_reviews_and_avg(pool: PgPool) {
    create_review(&pool, "T1", "user-1", 2, "meh").await;
    create_review(&pool, "T1", "user-2", 4, "nice").await;

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/reviews?trackId=T1").await;
    let json = body_json(response).await;

    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["avg"], serde_json::json!(3.0));
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_review_starts_with_zero_likes(pool: PgPool) {
    let review = create_review(&pool, "T1", "user-1", 5, "Great track").await;

    assert_eq!(review["trackId"], "T1");
    assert_eq!(review["authorId"], "user-1");
    assert_eq!(review["rating"], 5);
    assert_eq!(review["body"], "Great track");
    assert_eq!(review["likes"], 0);
    assert!(review["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_authentication(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send(
        app,
        Method::POST,
        "/api/v1/reviews",
        Some(serde_json::json!({"trackId": "T1", "rating": 5, "body": "x"})),
        None,
        Some(TRUSTED_ORIGIN),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_untrusted_origin(pool: PgPool) {
    let token = auth_token("user-1");
    let body = serde_json::json!({"trackId": "T1", "rating": 5, "body": "x"});

    // Wrong origin.
    let app = build_test_app(pool.clone());
    let response = send(
        app,
        Method::POST,
        "/api/v1/reviews",
        Some(body.clone()),
        Some(&token),
        Some("https://evil.example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Missing origin header entirely.
    let app = build_test_app(pool);
    let response = send(
        app,
        Method::POST,
        "/api/v1/reviews",
        Some(body),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_out_of_range_rating(pool: PgPool) {
    for rating in [0, 6] {
        let app = build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/reviews",
            serde_json::json!({"trackId": "T1", "rating": rating, "body": "x"}),
            &auth_token("user-1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "rating {rating}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_bad_bodies(pool: PgPool) {
    // Empty body.
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/reviews",
        serde_json::json!({"trackId": "T1", "rating": 3, "body": ""}),
        &auth_token("user-1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Over the 800-char cap.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/reviews",
        serde_json::json!({"trackId": "T1", "rating": 3, "body": "x".repeat(801)}),
        &auth_token("user-1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_oversized_payload(pool: PgPool) {
    // Raw payload past the 10,000-byte cap is refused before validation.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/reviews",
        serde_json::json!({"trackId": "T1", "rating": 3, "body": "x".repeat(10_500)}),
        &auth_token("user-1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_review_returns_conflict(pool: PgPool) {
    create_review(&pool, "T1", "user-1", 5, "first take").await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/reviews",
        serde_json::json!({"trackId": "T1", "rating": 1, "body": "second take"}),
        &auth_token("user-1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_same_author_may_review_different_tracks(pool: PgPool) {
    create_review(&pool, "T1", "user-1", 5, "one").await;
    create_review(&pool, "T2", "user-1", 4, "two").await;
}

// ---------------------------------------------------------------------------
// Update / delete and ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_owner_can_update_review(pool: PgPool) {
    let review = create_review(&pool, "T1", "user-1", 2, "early call").await;
    let id = review["id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/reviews/{id}"),
        serde_json::json!({"rating": 5, "body": "grew on me"}),
        &auth_token("user-1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["review"]["rating"], 5);
    assert_eq!(json["review"]["body"], "grew on me");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_owner_update_is_forbidden_not_missing(pool: PgPool) {
    let review = create_review(&pool, "T1", "user-1", 3, "mine").await;
    let id = review["id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/reviews/{id}"),
        serde_json::json!({"rating": 1}),
        &auth_token("user-2"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_nonexistent_review_is_not_found(pool: PgPool) {
    let app = build_test_app(pool);
    let response = patch_json(
        app,
        "/api/v1/reviews/999999",
        serde_json::json!({"rating": 1}),
        &auth_token("user-2"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_validates_patched_fields(pool: PgPool) {
    let review = create_review(&pool, "T1", "user-1", 3, "fine").await;
    let id = review["id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/reviews/{id}"),
        serde_json::json!({"rating": 9}),
        &auth_token("user-1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_owner_can_delete_review(pool: PgPool) {
    let review = create_review(&pool, "T1", "user-1", 3, "gone soon").await;
    let id = review["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/reviews/{id}"), &auth_token("user-1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/reviews?trackId=T1").await;
    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_owner_delete_is_forbidden(pool: PgPool) {
    let review = create_review(&pool, "T1", "user-1", 3, "mine").await;
    let id = review["id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let response = delete(app, &format!("/api/v1/reviews/{id}"), &auth_token("user-2")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_paging_covers_all_reviews_without_duplicates(pool: PgPool) {
    for n in 0..12 {
        create_review(&pool, "T1", &format!("user-{n}"), 3, &format!("take {n}")).await;
    }

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let uri = match &cursor {
            Some(cursor) => format!("/api/v1/reviews?trackId=T1&limit=5&cursor={cursor}"),
            None => "/api/v1/reviews?trackId=T1&limit=5".to_string(),
        };
        let app = build_test_app(pool.clone());
        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        for item in json["items"].as_array().unwrap() {
            seen.push(item["id"].as_i64().unwrap());
        }
        match json["nextCursor"].as_str() {
            Some(next) => cursor = Some(next.to_string()),
            None => break,
        }
    }

    assert_eq!(seen.len(), 12, "every review appears exactly once");
    let mut deduped = seen.clone();
    deduped.dedup();
    assert_eq!(deduped, seen);
    assert!(
        seen.windows(2).all(|w| w[0] > w[1]),
        "page order descends by id for same-timestamp-class rows"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_cursor_is_rejected(pool: PgPool) {
    create_review(&pool, "T1", "user-1", 3, "x").await;

    // Non-numeric token.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/reviews?trackId=T1&cursor=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Well-formed token naming no row.
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/reviews?trackId=T1&cursor=999999").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
