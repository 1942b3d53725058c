//! User profile endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use motomind_core::summarize;
use serde::Serialize;

use crate::db::repos::users::PROFILE_LISTING_LIMIT;
use crate::db::repos::{ProfileListing, ReviewRepo, ReviewWithReviewer, UserRecord, UserRepo};
use crate::http::error::{ApiError, StoreResultExt};
use crate::http::extractors::ValidId;
use crate::http::server::AppState;

/// Public profile: user fields, rating summary, all reviews, recent listings
#[derive(Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserRecord,
    pub avg_rating: Option<f64>,
    pub review_count: i64,
    pub reviews: Vec<ReviewWithReviewer>,
    pub listings: Vec<ProfileListing>,
}

impl ProfileResponse {
    fn new(
        user: UserRecord,
        reviews: Vec<ReviewWithReviewer>,
        listings: Vec<ProfileListing>,
    ) -> Self {
        let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
        let summary = summarize(&ratings);
        Self {
            user,
            avg_rating: summary.average,
            review_count: summary.count,
            reviews,
            listings,
        }
    }
}

/// GET /api/users/{id}
async fn get_profile(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ProfileResponse>, ApiError> {
    const FAILED: &str = "Could not fetch profile";

    let user = UserRepo::new(&state.pool).get(id).await.context(FAILED)?;

    let review_repo = ReviewRepo::new(&state.pool);
    let user_repo = UserRepo::new(&state.pool);
    let (reviews, listings) = tokio::try_join!(
        review_repo.for_reviewee(id, None),
        user_repo.recent_listings(id, PROFILE_LISTING_LIMIT),
    )
    .context(FAILED)?;

    Ok(Json(ProfileResponse::new(user, reviews, listings)))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/{id}", get(get_profile))
}
