//! Review repository
//!
//! Submitting a review and refreshing the reviewee's trust score is one
//! atomic unit. The reviewee's user row is locked first so concurrent
//! submissions for the same person queue up, then the aggregate is
//! recomputed in a single UPDATE that sees the freshly inserted row.

use chrono::{DateTime, Utc};
use motomind_core::NewReview;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;

/// Reviews shown on a listing detail page
pub const DETAIL_REVIEW_LIMIT: i64 = 10;

/// Review record as stored
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: i64,
    pub listing_id: i64,
    pub reviewer_id: i64,
    pub reviewee_id: i64,
    pub reviewer_role: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub was_honest: Option<bool>,
    pub was_on_time: Option<bool>,
    pub car_matched_description: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// Review with the reviewer's public identity
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithReviewer {
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewer_role: String,
    pub was_honest: Option<bool>,
    pub was_on_time: Option<bool>,
    pub car_matched_description: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub reviewer_name: Option<String>,
    pub reviewer_verified: Option<bool>,
}

/// Outcome of a submission
#[derive(Debug, Clone)]
pub struct SubmittedReview {
    pub review: Review,
    /// Reviewee's trust score after the update, if their row exists
    pub trust_score: Option<f64>,
}

/// Review repository
pub struct ReviewRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a review and recompute the reviewee's trust score (atomic).
    pub async fn submit(&self, review: &NewReview) -> Result<SubmittedReview, DbError> {
        let mut tx = self.pool.begin().await?;

        // Serialize with other submissions for this reviewee
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(review.reviewee_id)
            .fetch_optional(&mut *tx)
            .await?;

        let inserted: Review = sqlx::query_as(
            r#"
            INSERT INTO reviews (
                listing_id, reviewer_id, reviewee_id, reviewer_role, rating,
                comment, was_honest, was_on_time, car_matched_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, listing_id, reviewer_id, reviewee_id, reviewer_role, rating,
                comment, was_honest, was_on_time, car_matched_description, created_at
            "#,
        )
        .bind(review.listing_id)
        .bind(review.reviewer_id)
        .bind(review.reviewee_id)
        .bind(review.reviewer_role.as_str())
        .bind(review.rating)
        .bind(review.comment.as_deref())
        .bind(review.was_honest)
        .bind(review.was_on_time)
        .bind(review.car_matched_description)
        .fetch_one(&mut *tx)
        .await?;

        let trust_score: Option<Option<f64>> = sqlx::query_scalar(
            r#"
            UPDATE users SET trust_score = (
                SELECT ROUND(AVG(rating)::numeric, 1) FROM reviews WHERE reviewee_id = $1
            )
            WHERE id = $1
            RETURNING trust_score::float8
            "#,
        )
        .bind(review.reviewee_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SubmittedReview {
            review: inserted,
            trust_score: trust_score.flatten(),
        })
    }

    /// Reviews received by a user, newest first. `None` means no limit.
    pub async fn for_reviewee(
        &self,
        reviewee_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<ReviewWithReviewer>, DbError> {
        let rows: Vec<ReviewWithReviewer> = sqlx::query_as(
            r#"
            SELECT r.rating, r.comment, r.reviewer_role, r.was_honest,
                   r.was_on_time, r.car_matched_description, r.created_at,
                   u.full_name AS reviewer_name, u.id_verified AS reviewer_verified
            FROM reviews r
            JOIN users u ON r.reviewer_id = u.id
            WHERE r.reviewee_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(reviewee_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
