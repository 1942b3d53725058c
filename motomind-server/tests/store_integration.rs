//! Repository tests against a real Postgres.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p motomind-server -- --ignored
//!
//! Each test resets the schema from `fixtures/schema.sql`, so they hold a
//! shared lock to avoid clobbering each other.

use std::sync::OnceLock;

use motomind_core::{average_rating, CandidateFilter, NewReview, Persona, ReviewerRole};
use motomind_server::db::repos::reviews::DETAIL_REVIEW_LIMIT;
use motomind_server::db::repos::{CommunityRepo, ListingRepo, ReviewRepo, UserRepo};
use motomind_server::{create_pool, DbConfig};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};

fn schema_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

async fn fresh_db() -> (PgPool, MutexGuard<'static, ()>) {
    let guard = schema_lock().lock().await;
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&DbConfig::new(url)).await.expect("pool creation failed");
    sqlx::raw_sql(include_str!("fixtures/schema.sql"))
        .execute(&pool)
        .await
        .expect("schema setup failed");
    (pool, guard)
}

async fn user(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (full_name, id_verified) VALUES ($1, true) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

struct Car {
    price: f64,
    year: i32,
    safety_grade: i32,
    reliability: f64,
    status: &'static str,
    stolen: Option<Option<bool>>,
}

impl Default for Car {
    fn default() -> Self {
        Self {
            price: 9000.0,
            year: 2019,
            safety_grade: 5,
            reliability: 8.0,
            status: "active",
            stolen: Some(Some(false)),
        }
    }
}

/// Insert a listing with model, oracle score, and (optionally) history.
async fn listing(pool: &PgPool, seller: i64, car: Car) -> i64 {
    let model_id: i64 = sqlx::query_scalar(
        "INSERT INTO car_models (make, model, vehicle_type, year) VALUES ('Toyota', 'Corolla', 'sedan', $1) RETURNING id",
    )
    .bind(car.year)
    .fetch_one(pool)
    .await
    .unwrap();

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO listings (car_model_id, seller_id, price, year, safety_grade, status, description_he, description_en)
        VALUES ($1, $2, $3::numeric, $4, $5, $6, 'תיאור', 'description')
        RETURNING id
        "#,
    )
    .bind(model_id)
    .bind(seller)
    .bind(car.price)
    .bind(car.year)
    .bind(car.safety_grade)
    .bind(car.status)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        INSERT INTO oracle_scores (listing_id, smart_score, reliability_score, projected_annual_maintenance_cost, negotiation_strategy)
        VALUES ($1, 7.0, $2::numeric, 4000, 'Offer below ask')
        "#,
    )
    .bind(id)
    .bind(car.reliability)
    .execute(pool)
    .await
    .unwrap();

    if let Some(stolen) = car.stolen {
        sqlx::query("INSERT INTO vehicle_history (listing_id, is_stolen, license_plate) VALUES ($1, $2, '12-345-67')")
            .bind(id)
            .bind(stolen)
            .execute(pool)
            .await
            .unwrap();
    }

    id
}

fn review(listing_id: i64, reviewer: i64, reviewee: i64, rating: i32) -> NewReview {
    review_as(ReviewerRole::Buyer, listing_id, reviewer, reviewee, rating)
}

fn review_as(role: ReviewerRole, listing_id: i64, reviewer: i64, reviewee: i64, rating: i32) -> NewReview {
    NewReview {
        listing_id,
        reviewer_id: reviewer,
        reviewee_id: reviewee,
        reviewer_role: role,
        rating,
        comment: None,
        was_honest: Some(true),
        was_on_time: None,
        car_matched_description: None,
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn trust_score_tracks_rounded_mean_under_concurrency() {
    let (pool, _guard) = fresh_db().await;
    let seller = user(&pool, "Seller").await;
    let listing_id = listing(&pool, seller, Car::default()).await;

    let ratings = [4, 4, 5, 3, 5, 5, 4];
    let mut handles = Vec::new();
    for rating in ratings {
        let pool = pool.clone();
        let reviewer = user(&pool, "Buyer").await;
        handles.push(tokio::spawn(async move {
            ReviewRepo::new(&pool)
                .submit(&review(listing_id, reviewer, seller, rating))
                .await
                .expect("submit failed")
        }));
    }
    for handle in handles {
        handle.await.expect("task panicked");
    }

    let profile = UserRepo::new(&pool).get(seller).await.unwrap();
    assert_eq!(profile.trust_score, average_rating(&ratings));
}

#[tokio::test]
#[ignore = "requires database"]
async fn submit_returns_inserted_review_and_score() {
    let (pool, _guard) = fresh_db().await;
    let seller = user(&pool, "Seller").await;
    let buyer = user(&pool, "Buyer").await;
    let listing_id = listing(&pool, seller, Car::default()).await;

    let submitted = ReviewRepo::new(&pool)
        .submit(&review(listing_id, buyer, seller, 4))
        .await
        .unwrap();
    assert_eq!(submitted.review.rating, 4);
    assert_eq!(submitted.review.reviewer_role, "buyer");
    assert_eq!(submitted.trust_score, Some(4.0));
}

#[tokio::test]
#[ignore = "requires database"]
async fn safety_first_candidates_filtered_and_ranked() {
    let (pool, _guard) = fresh_db().await;
    let seller = user(&pool, "Seller").await;

    let grade3 = listing(&pool, seller, Car { price: 11500.0, safety_grade: 3, ..Default::default() }).await;
    let grade5 = listing(&pool, seller, Car { price: 9000.0, safety_grade: 5, reliability: 7.0, ..Default::default() }).await;
    let grade5_reliable = listing(&pool, seller, Car { price: 9500.0, safety_grade: 5, reliability: 9.0, ..Default::default() }).await;
    let no_history = listing(&pool, seller, Car { price: 8000.0, safety_grade: 4, stolen: None, ..Default::default() }).await;
    // excluded: over budget, stolen, inactive
    listing(&pool, seller, Car { price: 11501.0, ..Default::default() }).await;
    listing(&pool, seller, Car { stolen: Some(Some(true)), ..Default::default() }).await;
    listing(&pool, seller, Car { status: "sold", ..Default::default() }).await;

    let rows = ListingRepo::new(&pool)
        .candidates(Persona::SafetyFirst, CandidateFilter::new(10000.0), 10)
        .await
        .unwrap();

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![grade5_reliable, grade5, no_history, grade3]);
    assert!(rows.iter().all(|r| r.price <= 11500.0 && r.is_stolen != Some(true)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn budget_ceiling_is_exact_at_115_percent() {
    let (pool, _guard) = fresh_db().await;
    let seller = user(&pool, "Seller").await;

    let at_ceiling = listing(&pool, seller, Car { price: 115.0, ..Default::default() }).await;
    listing(&pool, seller, Car { price: 115.01, ..Default::default() }).await;

    let repo = ListingRepo::new(&pool);
    let rows = repo
        .candidates(Persona::Standard, CandidateFilter::new(100.0), 10)
        .await
        .unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![at_ceiling]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn feed_lists_active_and_detail_ignores_status() {
    let (pool, _guard) = fresh_db().await;
    let seller = user(&pool, "Seller").await;
    let active = listing(&pool, seller, Car::default()).await;
    let sold = listing(&pool, seller, Car { status: "sold", ..Default::default() }).await;

    let repo = ListingRepo::new(&pool);
    let feed = repo.list_active().await.unwrap();
    let ids: Vec<i64> = feed.iter().map(|s| s.listing.id).collect();
    assert_eq!(ids, vec![active]);
    assert_eq!(feed[0].seller_review_count, 0);
    assert_eq!(feed[0].seller_avg_rating, None);

    let detail = repo.get(sold).await.unwrap();
    assert_eq!(detail.seller_id, seller);
    assert_eq!(detail.license_plate.as_deref(), Some("12-345-67"));

    assert!(repo.get(sold + 1000).await.is_err());
}

#[tokio::test]
#[ignore = "requires database"]
async fn feed_rating_counts_buyer_reviews_only() {
    let (pool, _guard) = fresh_db().await;
    let seller = user(&pool, "Seller").await;
    let buyer = user(&pool, "Buyer").await;
    let other_seller = user(&pool, "Other seller").await;
    let listing_id = listing(&pool, seller, Car::default()).await;

    let reviews = ReviewRepo::new(&pool);
    reviews.submit(&review(listing_id, buyer, seller, 4)).await.unwrap();
    reviews
        .submit(&review_as(ReviewerRole::Seller, listing_id, other_seller, seller, 1))
        .await
        .unwrap();

    let feed = ListingRepo::new(&pool).list_active().await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].seller_review_count, 1);
    assert_eq!(feed[0].seller_avg_rating, Some(4.0));
    // trust score still averages every review
    assert_eq!(feed[0].listing.trust_score, Some(2.5));
}

#[tokio::test]
#[ignore = "requires database"]
async fn detail_reviews_capped_and_span_roles() {
    let (pool, _guard) = fresh_db().await;
    let seller = user(&pool, "Seller").await;
    let listing_id = listing(&pool, seller, Car::default()).await;

    let reviews = ReviewRepo::new(&pool);
    for i in 0..12 {
        let reviewer = user(&pool, "Reviewer").await;
        let role = if i % 2 == 0 { ReviewerRole::Buyer } else { ReviewerRole::Seller };
        reviews
            .submit(&review_as(role, listing_id, reviewer, seller, 5))
            .await
            .unwrap();
    }

    let detail = ListingRepo::new(&pool).get(listing_id).await.unwrap();
    let shown = reviews
        .for_reviewee(detail.seller_id, Some(DETAIL_REVIEW_LIMIT))
        .await
        .unwrap();
    assert_eq!(shown.len(), 10);
    assert!(shown.iter().any(|r| r.reviewer_role == "buyer"));
    assert!(shown.iter().any(|r| r.reviewer_role == "seller"));
    assert!(shown.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let all = reviews.for_reviewee(seller, None).await.unwrap();
    assert_eq!(all.len(), 12);
}

#[tokio::test]
#[ignore = "requires database"]
async fn community_feed_puts_pinned_first() {
    let (pool, _guard) = fresh_db().await;
    let author = user(&pool, "Author").await;

    for (title, upvotes, pinned) in [("popular", 100, false), ("rules", 0, true), ("new", 5, false)] {
        sqlx::query(
            "INSERT INTO community_posts (author_id, title_en, upvotes, is_pinned) VALUES ($1, $2, $3, $4)",
        )
        .bind(author)
        .bind(title)
        .bind(upvotes)
        .bind(pinned)
        .execute(&pool)
        .await
        .unwrap();
    }

    let posts = CommunityRepo::new(&pool).list(30).await.unwrap();
    let titles: Vec<&str> = posts.iter().filter_map(|p| p.title_en.as_deref()).collect();
    assert_eq!(titles, vec!["rules", "popular", "new"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn created_post_defaults_category() {
    let (pool, _guard) = fresh_db().await;
    let author = user(&pool, "Author").await;

    let post = motomind_core::NewPost::from(motomind_core::PostDraft {
        author_id: Some(author),
        title_en: Some("Which insurer?".into()),
        ..Default::default()
    });
    let created = CommunityRepo::new(&pool).create(&post).await.unwrap();
    assert_eq!(created.category, "question");
    assert_eq!(created.author_id, Some(author));
}
