//! Listing repository
//!
//! Every listing view joins the same tables:
//! - car model (inner) and its market price band (left, by make/model/year)
//! - oracle score (inner, one per listing)
//! - seller (inner)
//! - vehicle history (left)

use chrono::NaiveDate;
use motomind_core::{Bilingual, CandidateFilter, ListingSignals, MarketBand, Persona, Ranking};
use sqlx::{FromRow, PgPool};

use super::DbError;

/// Listings returned by the public feed
pub const FEED_LIMIT: i64 = 20;

/// Columns shared by every listing view
macro_rules! listing_columns {
    () => {
        r#"
        l.id, l.price::float8 AS price, l.mileage, l.year, l.image_url,
        l.ownership_type, l.is_gov_verified, l.is_cleared_by_police,
        l.safety_grade, l.test_validity_date,
        l.description_he, l.description_en,
        cm.make, cm.model, cm.vehicle_type,
        os.smart_score::float8 AS smart_score,
        os.reliability_score::float8 AS reliability_score,
        os.projected_annual_maintenance_cost::float8 AS projected_annual_maintenance_cost,
        os.future_resale_value_24m::float8 AS future_resale_value_24m,
        os.confidence_index::float8 AS confidence_index,
        os.negotiation_strategy, os.end_of_life_warning,
        u.full_name AS seller_name, u.phone AS seller_phone,
        u.id_verified, u.trust_score::float8 AS trust_score,
        u.total_sales, u.member_since, u.preferred_language,
        mp.price_low::float8 AS price_low,
        mp.price_avg::float8 AS price_avg,
        mp.price_high::float8 AS price_high,
        vh.previous_owners, vh.accident_count,
        vh.is_stolen, vh.has_outstanding_finance, vh.imported
        "#
    };
}

macro_rules! listing_joins {
    () => {
        r#"
        FROM listings l
        JOIN car_models cm ON l.car_model_id = cm.id
        JOIN oracle_scores os ON l.id = os.listing_id
        JOIN users u ON l.seller_id = u.id
        LEFT JOIN market_prices mp
            ON mp.make = cm.make AND mp.model = cm.model AND mp.year = cm.year
        LEFT JOIN vehicle_history vh ON vh.listing_id = l.id
        "#
    };
}

/// Listing joined with model, oracle score, seller, market band and history
#[derive(Debug, Clone, FromRow)]
pub struct ListingRecord {
    pub id: i64,
    pub price: f64,
    pub mileage: Option<i32>,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub ownership_type: Option<String>,
    pub is_gov_verified: Option<bool>,
    pub is_cleared_by_police: Option<bool>,
    pub safety_grade: Option<i32>,
    pub test_validity_date: Option<NaiveDate>,
    pub description_he: Option<String>,
    pub description_en: Option<String>,
    pub make: String,
    pub model: String,
    pub vehicle_type: Option<String>,
    pub smart_score: Option<f64>,
    pub reliability_score: Option<f64>,
    pub projected_annual_maintenance_cost: Option<f64>,
    pub future_resale_value_24m: Option<f64>,
    pub confidence_index: Option<f64>,
    pub negotiation_strategy: Option<String>,
    pub end_of_life_warning: Option<bool>,
    pub seller_name: Option<String>,
    pub seller_phone: Option<String>,
    pub id_verified: Option<bool>,
    pub trust_score: Option<f64>,
    pub total_sales: Option<i32>,
    pub member_since: Option<NaiveDate>,
    pub preferred_language: Option<String>,
    pub price_low: Option<f64>,
    pub price_avg: Option<f64>,
    pub price_high: Option<f64>,
    pub previous_owners: Option<i32>,
    pub accident_count: Option<i32>,
    pub is_stolen: Option<bool>,
    pub has_outstanding_finance: Option<bool>,
    pub imported: Option<bool>,
}

impl ListingRecord {
    pub fn description(&self) -> Bilingual<Option<String>> {
        Bilingual::new(self.description_he.clone(), self.description_en.clone())
    }

    pub fn market_band(&self) -> MarketBand {
        MarketBand::new(self.price_low, self.price_avg, self.price_high)
    }

    pub fn signals(&self) -> ListingSignals {
        ListingSignals {
            year: self.year,
            safety_grade: self.safety_grade,
            smart_score: self.smart_score,
            negotiation_strategy: self.negotiation_strategy.clone(),
            end_of_life_warning: self.end_of_life_warning,
            projected_annual_maintenance_cost: self.projected_annual_maintenance_cost,
        }
    }
}

/// Feed row: listing plus the seller's rating from buyers
#[derive(Debug, Clone, FromRow)]
pub struct ListingSummary {
    #[sqlx(flatten)]
    pub listing: ListingRecord,
    pub seller_avg_rating: Option<f64>,
    pub seller_review_count: i64,
}

/// Detail row: listing plus seller id and full history
#[derive(Debug, Clone, FromRow)]
pub struct ListingDetail {
    #[sqlx(flatten)]
    pub listing: ListingRecord,
    pub seller_id: i64,
    pub last_test_date: Option<NaiveDate>,
    pub hist_test_validity: Option<NaiveDate>,
    pub license_plate: Option<String>,
}

fn ranking_clause(ranking: Ranking) -> &'static str {
    match ranking {
        Ranking::Safety => "ORDER BY l.safety_grade DESC, os.reliability_score DESC",
        Ranking::RunningCost => {
            "ORDER BY os.projected_annual_maintenance_cost ASC, os.future_resale_value_24m DESC"
        }
        Ranking::SmartScore => "ORDER BY os.smart_score DESC",
    }
}

/// Listing repository
pub struct ListingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ListingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active listings ranked by smart score, with the seller's average
    /// rating over reviews written by buyers.
    pub async fn list_active(&self) -> Result<Vec<ListingSummary>, DbError> {
        let rows = sqlx::query_as::<_, ListingSummary>(concat!(
            "SELECT",
            listing_columns!(),
            r#",
            ROUND(AVG(r.rating), 1)::float8 AS seller_avg_rating,
            COUNT(r.id) AS seller_review_count
            "#,
            listing_joins!(),
            r#"
            LEFT JOIN reviews r ON r.reviewee_id = u.id AND r.reviewer_role = 'buyer'
            WHERE l.status = 'active'
            GROUP BY l.id, cm.id, os.id, u.id, mp.id, vh.id
            ORDER BY os.smart_score DESC
            LIMIT $1
            "#,
        ))
        .bind(FEED_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// A single listing by id, whatever its status.
    pub async fn get(&self, id: i64) -> Result<ListingDetail, DbError> {
        sqlx::query_as::<_, ListingDetail>(concat!(
            "SELECT",
            listing_columns!(),
            r#",
            u.id AS seller_id,
            vh.last_test_date,
            vh.test_validity_date AS hist_test_validity,
            vh.license_plate
            "#,
            listing_joins!(),
            "WHERE l.id = $1",
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "listing",
            id: id.to_string(),
        })
    }

    /// Recommendation candidates for a persona.
    ///
    /// The ORDER BY clause is picked from a fixed set by `Ranking`, never
    /// from user input. The price ceiling is computed in numeric so budgets
    /// like 10000 admit exactly 11500.
    pub async fn candidates(
        &self,
        persona: Persona,
        filter: CandidateFilter,
        limit: i64,
    ) -> Result<Vec<ListingRecord>, DbError> {
        let query = format!(
            "{} {} {} {} LIMIT $3",
            concat!("SELECT", listing_columns!()),
            listing_joins!(),
            r#"
            WHERE l.price <= $1::numeric * $2::numeric
              AND l.status = 'active'
              AND (vh.is_stolen = false OR vh.is_stolen IS NULL)
            "#,
            ranking_clause(persona.ranking()),
        );

        let rows = sqlx::query_as::<_, ListingRecord>(&query)
            .bind(filter.budget())
            .bind(filter.tolerance())
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}
