//! User repository - profile core fields and recent listings

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;

/// Listings shown on a profile
pub const PROFILE_LISTING_LIMIT: i64 = 5;

/// Public user record
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub id_verified: Option<bool>,
    pub id_verified_at: Option<DateTime<Utc>>,
    pub trust_score: Option<f64>,
    pub total_sales: Option<i32>,
    pub total_purchases: Option<i32>,
    pub member_since: Option<NaiveDate>,
    pub preferred_language: Option<String>,
}

/// Listing summary on a seller profile (any status)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileListing {
    pub id: i64,
    pub price: f64,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub make: String,
    pub model: String,
    pub status: String,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> Result<UserRecord, DbError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT
                id, full_name, avatar_url, id_verified, id_verified_at,
                trust_score::float8 AS trust_score, total_sales, total_purchases,
                member_since, preferred_language
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }

    /// Most recently created listings for a seller.
    pub async fn recent_listings(
        &self,
        seller_id: i64,
        limit: i64,
    ) -> Result<Vec<ProfileListing>, DbError> {
        let rows: Vec<ProfileListing> = sqlx::query_as(
            r#"
            SELECT l.id, l.price::float8 AS price, l.year, l.image_url,
                   cm.make, cm.model, l.status
            FROM listings l
            JOIN car_models cm ON l.car_model_id = cm.id
            WHERE l.seller_id = $1
            ORDER BY l.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(seller_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
