//! Listing endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::NaiveDate;
use motomind_core::{Annotation, Lang, PricePosition};
use serde::Serialize;

use crate::db::repos::{
    ListingDetail, ListingRecord, ListingRepo, ListingSummary, ReviewRepo, ReviewWithReviewer,
};
use crate::db::repos::reviews::DETAIL_REVIEW_LIMIT;
use crate::http::error::{ApiError, StoreResultExt};
use crate::http::extractors::{LangQuery, ValidId};
use crate::http::server::AppState;

/// Listing as presented to clients, with description in the requested
/// language and the computed price position
#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
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
    pub description: Option<String>,
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
    pub price_position: PricePosition,
}

impl ListingResponse {
    pub fn new(record: ListingRecord, lang: Lang) -> Self {
        let description = record.description().select(lang);
        let price_position = record.market_band().classify(record.price);

        Self {
            id: record.id,
            price: record.price,
            mileage: record.mileage,
            year: record.year,
            image_url: record.image_url,
            ownership_type: record.ownership_type,
            is_gov_verified: record.is_gov_verified,
            is_cleared_by_police: record.is_cleared_by_police,
            safety_grade: record.safety_grade,
            test_validity_date: record.test_validity_date,
            description,
            make: record.make,
            model: record.model,
            vehicle_type: record.vehicle_type,
            smart_score: record.smart_score,
            reliability_score: record.reliability_score,
            projected_annual_maintenance_cost: record.projected_annual_maintenance_cost,
            future_resale_value_24m: record.future_resale_value_24m,
            confidence_index: record.confidence_index,
            negotiation_strategy: record.negotiation_strategy,
            end_of_life_warning: record.end_of_life_warning,
            seller_name: record.seller_name,
            seller_phone: record.seller_phone,
            id_verified: record.id_verified,
            trust_score: record.trust_score,
            total_sales: record.total_sales,
            member_since: record.member_since,
            preferred_language: record.preferred_language,
            price_low: record.price_low,
            price_avg: record.price_avg,
            price_high: record.price_high,
            previous_owners: record.previous_owners,
            accident_count: record.accident_count,
            is_stolen: record.is_stolen,
            has_outstanding_finance: record.has_outstanding_finance,
            imported: record.imported,
            price_position,
        }
    }

    /// Replace the oracle fields a recommendation annotates.
    pub fn with_annotation(self, annotation: Annotation) -> Self {
        Self {
            negotiation_strategy: annotation.negotiation_strategy,
            end_of_life_warning: annotation.end_of_life_warning,
            projected_annual_maintenance_cost: annotation.projected_annual_maintenance_cost,
            ..self
        }
    }
}

/// Feed entry with the seller's rating from buyers
#[derive(Serialize)]
pub struct ListingSummaryResponse {
    #[serde(flatten)]
    pub listing: ListingResponse,
    pub seller_avg_rating: Option<f64>,
    pub seller_review_count: i64,
}

impl ListingSummaryResponse {
    fn new(summary: ListingSummary, lang: Lang) -> Self {
        Self {
            listing: ListingResponse::new(summary.listing, lang),
            seller_avg_rating: summary.seller_avg_rating,
            seller_review_count: summary.seller_review_count,
        }
    }
}

/// Detail view with history fields and recent seller reviews
#[derive(Serialize)]
pub struct ListingDetailResponse {
    #[serde(flatten)]
    pub listing: ListingResponse,
    pub seller_id: i64,
    pub last_test_date: Option<NaiveDate>,
    pub hist_test_validity: Option<NaiveDate>,
    pub license_plate: Option<String>,
    pub reviews: Vec<ReviewWithReviewer>,
}

impl ListingDetailResponse {
    fn new(detail: ListingDetail, reviews: Vec<ReviewWithReviewer>, lang: Lang) -> Self {
        Self {
            listing: ListingResponse::new(detail.listing, lang),
            seller_id: detail.seller_id,
            last_test_date: detail.last_test_date,
            hist_test_validity: detail.hist_test_validity,
            license_plate: detail.license_plate,
            reviews,
        }
    }
}

/// GET /api/listings - active listings ranked by smart score
async fn list_listings(
    State(state): State<Arc<AppState>>,
    LangQuery(lang): LangQuery,
) -> Result<Json<Vec<ListingSummaryResponse>>, ApiError> {
    let rows = ListingRepo::new(&state.pool)
        .list_active()
        .await
        .context("Could not fetch listings")?;

    Ok(Json(
        rows.into_iter()
            .map(|row| ListingSummaryResponse::new(row, lang))
            .collect(),
    ))
}

/// GET /api/listings/{id} - one listing (any status) with seller reviews
async fn get_listing(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    LangQuery(lang): LangQuery,
) -> Result<Json<ListingDetailResponse>, ApiError> {
    const FAILED: &str = "Could not fetch listing";

    let detail = ListingRepo::new(&state.pool).get(id).await.context(FAILED)?;
    let reviews = ReviewRepo::new(&state.pool)
        .for_reviewee(detail.seller_id, Some(DETAIL_REVIEW_LIMIT))
        .await
        .context(FAILED)?;

    Ok(Json(ListingDetailResponse::new(detail, reviews, lang)))
}

/// Listing routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/listings", get(list_listings))
        .route("/api/listings/{id}", get(get_listing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ListingRecord {
        ListingRecord {
            id: 1,
            price: 9000.0,
            mileage: Some(120_000),
            year: Some(2012),
            image_url: None,
            ownership_type: Some("private".into()),
            is_gov_verified: Some(true),
            is_cleared_by_police: Some(true),
            safety_grade: Some(5),
            test_validity_date: None,
            description_he: Some("רכב שמור".into()),
            description_en: Some("Well kept".into()),
            make: "Mazda".into(),
            model: "3".into(),
            vehicle_type: Some("sedan".into()),
            smart_score: Some(7.5),
            reliability_score: Some(8.0),
            projected_annual_maintenance_cost: Some(3500.0),
            future_resale_value_24m: Some(7000.0),
            confidence_index: Some(0.8),
            negotiation_strategy: Some("Ask for service records".into()),
            end_of_life_warning: Some(false),
            seller_name: Some("Dana".into()),
            seller_phone: None,
            id_verified: Some(true),
            trust_score: Some(4.6),
            total_sales: Some(3),
            member_since: None,
            preferred_language: Some("he".into()),
            price_low: Some(8000.0),
            price_avg: Some(10000.0),
            price_high: Some(12000.0),
            previous_owners: Some(2),
            accident_count: Some(0),
            is_stolen: Some(false),
            has_outstanding_finance: Some(false),
            imported: Some(false),
        }
    }

    #[test]
    fn response_selects_language_and_price_position() {
        let he = ListingResponse::new(record(), Lang::He);
        assert_eq!(he.description.as_deref(), Some("רכב שמור"));
        assert_eq!(he.price_position, PricePosition::Fair);

        let mut over = record();
        over.price = 13000.0;
        let en = ListingResponse::new(over, Lang::En);
        assert_eq!(en.description.as_deref(), Some("Well kept"));
        assert_eq!(en.price_position, PricePosition::Overpriced);
    }

    #[test]
    fn missing_band_is_unknown() {
        let mut r = record();
        r.price_avg = None;
        assert_eq!(ListingResponse::new(r, Lang::En).price_position, PricePosition::Unknown);
    }

    #[test]
    fn summary_flattens_listing_fields() {
        let summary = ListingSummary {
            listing: record(),
            seller_avg_rating: Some(4.5),
            seller_review_count: 2,
        };
        let json = serde_json::to_value(ListingSummaryResponse::new(summary, Lang::En)).unwrap();
        assert_eq!(json["price_position"], "fair");
        assert_eq!(json["seller_review_count"], 2);
        assert_eq!(json["make"], "Mazda");
        assert!(json.get("status").is_none());
        assert!(json.get("description_he").is_none());
    }

    #[test]
    fn annotation_replaces_oracle_fields_only() {
        let base = ListingResponse::new(record(), Lang::En);
        let annotated = base.clone().with_annotation(Annotation {
            negotiation_strategy: Some("note".into()),
            end_of_life_warning: Some(true),
            projected_annual_maintenance_cost: Some(1.0),
        });
        assert_eq!(annotated.negotiation_strategy.as_deref(), Some("note"));
        assert_eq!(annotated.end_of_life_warning, Some(true));
        assert_eq!(annotated.projected_annual_maintenance_cost, Some(1.0));
        assert_eq!(annotated.price, base.price);
        assert_eq!(base.negotiation_strategy.as_deref(), Some("Ask for service records"));
    }
}
