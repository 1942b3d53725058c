//! Quiz recommendation endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{Datelike, Utc};
use motomind_core::recommend::MAX_RECOMMENDATIONS;
use motomind_core::{annotate, Lang, Persona, Quiz};
use serde::{Deserialize, Serialize};

use super::listings::ListingResponse;
use crate::db::repos::{ListingRecord, ListingRepo};
use crate::http::error::{ApiError, StoreResultExt};
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;

/// Quiz answers
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub budget: Option<f64>,
    pub driving_style: Option<String>,
    pub experience_level: Option<String>,
    pub lang: Option<String>,
}

/// Annotated listing tagged with the persona that ranked it
#[derive(Serialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub listing: ListingResponse,
    pub persona: Persona,
}

/// Build the response for one candidate. The stored record is not touched;
/// annotated values exist only in the returned payload.
fn recommend_one(
    record: ListingRecord,
    quiz: &Quiz,
    lang: Lang,
    current_year: i32,
) -> RecommendationResponse {
    let annotation = annotate(quiz, &record.signals(), current_year);
    RecommendationResponse {
        listing: ListingResponse::new(record, lang).with_annotation(annotation),
        persona: quiz.persona,
    }
}

/// POST /api/recommendations - ranked, annotated candidates for a quiz
async fn recommend(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RecommendationRequest>,
) -> Result<Json<Vec<RecommendationResponse>>, ApiError> {
    let quiz = Quiz::new(
        req.budget,
        req.driving_style.as_deref(),
        req.experience_level.as_deref(),
    )?;
    let lang = Lang::from_param(req.lang.as_deref());

    tracing::debug!(persona = quiz.persona.as_str(), budget = quiz.budget, "recommending");

    let candidates = ListingRepo::new(&state.pool)
        .candidates(quiz.persona, quiz.filter(), MAX_RECOMMENDATIONS)
        .await
        .context("Could not fetch recommendations")?;

    let current_year = Utc::now().year();
    Ok(Json(
        candidates
            .into_iter()
            .map(|record| recommend_one(record, &quiz, lang, current_year))
            .collect(),
    ))
}

/// Recommendation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/recommendations", post(recommend))
}
