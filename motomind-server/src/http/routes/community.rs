//! Community feed endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use motomind_core::community::FEED_LIMIT;
use motomind_core::{Lang, NewPost, PostDraft};
use serde::Serialize;

use crate::db::repos::{CommunityPost, CommunityRepo, PostWithReplies};
use crate::http::error::{ApiError, StoreResultExt};
use crate::http::extractors::{ApiJson, LangQuery};
use crate::http::server::AppState;

/// Feed entry with title and body in the requested language
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub category: String,
    pub upvotes: Option<i32>,
    pub is_pinned: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_name: Option<String>,
    pub author_verified: Option<bool>,
    pub author_trust: Option<f64>,
    pub reply_count: i64,
}

impl PostResponse {
    fn new(row: PostWithReplies, lang: Lang) -> Self {
        let title = row.title().select(lang);
        let body = row.body().select(lang);
        Self {
            id: row.id,
            category: row.category,
            upvotes: row.upvotes,
            is_pinned: row.is_pinned,
            created_at: row.created_at,
            title,
            body,
            author_name: row.author_name,
            author_verified: row.author_verified,
            author_trust: row.author_trust,
            reply_count: row.reply_count,
        }
    }
}

/// GET /api/community - pinned first, then by upvotes, then newest
async fn list_posts(
    State(state): State<Arc<AppState>>,
    LangQuery(lang): LangQuery,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let rows = CommunityRepo::new(&state.pool)
        .list(FEED_LIMIT)
        .await
        .context("Could not fetch community posts")?;

    Ok(Json(
        rows.into_iter().map(|row| PostResponse::new(row, lang)).collect(),
    ))
}

/// POST /api/community - create a post (category defaults to `question`)
async fn create_post(
    State(state): State<Arc<AppState>>,
    ApiJson(draft): ApiJson<PostDraft>,
) -> Result<(StatusCode, Json<CommunityPost>), ApiError> {
    let post = NewPost::from(draft);
    let created = CommunityRepo::new(&state.pool)
        .create(&post)
        .await
        .context("Could not create post")?;

    tracing::info!(post_id = created.id, category = %created.category, "community post created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Community routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/community", get(list_posts).post(create_post))
}
