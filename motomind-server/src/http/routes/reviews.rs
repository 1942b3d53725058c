//! Review submission endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use motomind_core::{NewReview, ReviewDraft};

use crate::db::repos::{Review, ReviewRepo};
use crate::http::error::{ApiError, StoreResultExt};
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;

/// POST /api/reviews - submit a review and refresh the reviewee's trust score
async fn submit_review(
    State(state): State<Arc<AppState>>,
    ApiJson(draft): ApiJson<ReviewDraft>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = NewReview::from_draft(draft)?;

    let submitted = ReviewRepo::new(&state.pool)
        .submit(&review)
        .await
        .context("Could not submit review")?;

    tracing::info!(
        review_id = submitted.review.id,
        reviewee_id = review.reviewee_id,
        trust_score = ?submitted.trust_score,
        "review submitted"
    );

    Ok((StatusCode::CREATED, Json(submitted.review)))
}

/// Review routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/reviews", post(submit_review))
}
