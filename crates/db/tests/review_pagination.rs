//! Cursor pagination properties over the reviews table: lossless
//! round-trips, stability under concurrent inserts, and duplicate-review
//! enforcement.

use groove_core::pagination::split_page;
use groove_core::types::DbId;
use groove_db::models::review::CreateReview;
use groove_db::repositories::{ReviewRepo, TrackRepo};
use sqlx::PgPool;

async fn seed_reviews(pool: &PgPool, track_id: &str, count: usize) -> Vec<DbId> {
    TrackRepo::ensure_exists(pool, track_id).await.unwrap();
    let mut ids = Vec::with_capacity(count);
    for n in 0..count {
        let review = ReviewRepo::create(
            pool,
            &format!("author-{n}"),
            &CreateReview {
                track_id: track_id.to_string(),
                rating: 3,
                title: None,
                body: format!("review {n}"),
            },
        )
        .await
        .unwrap();
        ids.push(review.id);
    }
    ids
}

/// Follow cursors until exhaustion, returning every id in page order.
async fn collect_all_pages(pool: &PgPool, track_id: &str, limit: i64) -> Vec<DbId> {
    let mut seen = Vec::new();
    let mut cursor: Option<DbId> = None;
    loop {
        let anchor = match cursor {
            Some(id) => {
                let created_at = ReviewRepo::cursor_anchor(pool, id)
                    .await
                    .unwrap()
                    .expect("cursor must name an existing row");
                Some((created_at, id))
            }
            None => None,
        };
        let rows = ReviewRepo::page_for_track(pool, track_id, limit + 1, anchor)
            .await
            .unwrap();
        let (items, next) = split_page(rows, limit, |r| r.id);
        seen.extend(items.iter().map(|r| r.id));
        match next {
            Some(next) => cursor = Some(next),
            None => return seen,
        }
    }
}

#[sqlx::test]
async fn round_trip_covers_every_row_once(pool: PgPool) {
    seed_reviews(&pool, "trk-1", 23).await;

    let paged = collect_all_pages(&pool, "trk-1", 5).await;
    let full = ReviewRepo::page_for_track(&pool, "trk-1", 100, None)
        .await
        .unwrap();

    assert_eq!(paged.len(), 23);
    let full_ids: Vec<DbId> = full.iter().map(|r| r.id).collect();
    assert_eq!(paged, full_ids, "pages must concatenate to the total order");
}

#[sqlx::test]
async fn order_is_newest_first_with_id_tiebreak(pool: PgPool) {
    seed_reviews(&pool, "trk-1", 8).await;

    let rows = ReviewRepo::page_for_track(&pool, "trk-1", 20, None)
        .await
        .unwrap();
    for pair in rows.windows(2) {
        let newer = (&pair[0].created_at, pair[0].id);
        let older = (&pair[1].created_at, pair[1].id);
        assert!(
            newer > older,
            "rows must descend in (created_at, id): {newer:?} vs {older:?}"
        );
    }
}

#[sqlx::test]
async fn page_is_stable_under_newer_inserts(pool: PgPool) {
    seed_reviews(&pool, "trk-1", 10).await;

    // Fetch page 1 and note what page 2 would start with.
    let rows = ReviewRepo::page_for_track(&pool, "trk-1", 6, None)
        .await
        .unwrap();
    let (page1, cursor) = split_page(rows, 5, |r| r.id);
    let cursor = cursor.unwrap();
    let expected_next: Vec<DbId> = {
        let anchor = ReviewRepo::cursor_anchor(&pool, cursor).await.unwrap().unwrap();
        let rows = ReviewRepo::page_for_track(&pool, "trk-1", 6, Some((anchor, cursor)))
            .await
            .unwrap();
        split_page(rows, 5, |r| r.id).0.iter().map(|r| r.id).collect()
    };

    // A newer review lands after page 1 was issued.
    TrackRepo::ensure_exists(&pool, "trk-1").await.unwrap();
    ReviewRepo::create(
        &pool,
        "late-author",
        &CreateReview {
            track_id: "trk-1".to_string(),
            rating: 5,
            title: None,
            body: "fresh take".to_string(),
        },
    )
    .await
    .unwrap();

    // Page 2 via the already-issued cursor is unchanged.
    let anchor = ReviewRepo::cursor_anchor(&pool, cursor).await.unwrap().unwrap();
    let rows = ReviewRepo::page_for_track(&pool, "trk-1", 6, Some((anchor, cursor)))
        .await
        .unwrap();
    let (page2, _) = split_page(rows, 5, |r| r.id);
    let page2_ids: Vec<DbId> = page2.iter().map(|r| r.id).collect();
    assert_eq!(page2_ids, expected_next);

    // And no row from page 1 reappears.
    for row in &page2 {
        assert!(!page1.iter().any(|p| p.id == row.id));
    }
}

#[sqlx::test]
async fn unknown_cursor_resolves_to_no_anchor(pool: PgPool) {
    seed_reviews(&pool, "trk-1", 3).await;
    let anchor = ReviewRepo::cursor_anchor(&pool, 999_999).await.unwrap();
    assert!(anchor.is_none());
}

#[sqlx::test]
async fn duplicate_review_violates_unique_constraint(pool: PgPool) {
    TrackRepo::ensure_exists(&pool, "trk-1").await.unwrap();
    let input = CreateReview {
        track_id: "trk-1".to_string(),
        rating: 5,
        title: None,
        body: "first".to_string(),
    };

    ReviewRepo::create(&pool, "author-1", &input).await.unwrap();

    // The application-level existence check is advisory; the constraint is
    // what closes the race window.
    assert!(ReviewRepo::exists_for_track_author(&pool, "trk-1", "author-1")
        .await
        .unwrap());

    let err = ReviewRepo::create(&pool, "author-1", &input)
        .await
        .expect_err("second insert for the same (track, author) must fail");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_reviews_track_author"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test]
async fn avg_rating_is_null_without_reviews_and_exact_with(pool: PgPool) {
    TrackRepo::ensure_exists(&pool, "trk-empty").await.unwrap();
    assert_eq!(ReviewRepo::avg_rating(&pool, "trk-empty").await.unwrap(), None);

    TrackRepo::ensure_exists(&pool, "trk-1").await.unwrap();
    for (n, rating) in [2, 4].into_iter().enumerate() {
        ReviewRepo::create(
            &pool,
            &format!("author-{n}"),
            &CreateReview {
                track_id: "trk-1".to_string(),
                rating,
                title: None,
                body: "x".to_string(),
            },
        )
        .await
        .unwrap();
    }
    assert_eq!(ReviewRepo::avg_rating(&pool, "trk-1").await.unwrap(), Some(3.0));
}
