//! Community feed repository

use chrono::{DateTime, Utc};
use motomind_core::{Bilingual, NewPost};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;

/// Post record as stored
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommunityPost {
    pub id: i64,
    pub author_id: Option<i64>,
    pub title_he: Option<String>,
    pub title_en: Option<String>,
    pub body_he: Option<String>,
    pub body_en: Option<String>,
    pub category: String,
    pub upvotes: Option<i32>,
    pub is_pinned: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// Feed row: post with author and reply count
#[derive(Debug, Clone, FromRow)]
pub struct PostWithReplies {
    pub id: i64,
    pub category: String,
    pub upvotes: Option<i32>,
    pub is_pinned: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub title_he: Option<String>,
    pub title_en: Option<String>,
    pub body_he: Option<String>,
    pub body_en: Option<String>,
    pub author_name: Option<String>,
    pub author_verified: Option<bool>,
    pub author_trust: Option<f64>,
    pub reply_count: i64,
}

impl PostWithReplies {
    pub fn title(&self) -> Bilingual<Option<String>> {
        Bilingual::new(self.title_he.clone(), self.title_en.clone())
    }

    pub fn body(&self) -> Bilingual<Option<String>> {
        Bilingual::new(self.body_he.clone(), self.body_en.clone())
    }
}

/// Community repository
pub struct CommunityRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommunityRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Pinned posts first, then most upvoted, then newest.
    pub async fn list(&self, limit: i64) -> Result<Vec<PostWithReplies>, DbError> {
        let rows: Vec<PostWithReplies> = sqlx::query_as(
            r#"
            SELECT
                cp.id, cp.category, cp.upvotes, cp.is_pinned, cp.created_at,
                cp.title_he, cp.title_en, cp.body_he, cp.body_en,
                u.full_name AS author_name, u.id_verified AS author_verified,
                u.trust_score::float8 AS author_trust,
                COUNT(cr.id) AS reply_count
            FROM community_posts cp
            JOIN users u ON cp.author_id = u.id
            LEFT JOIN community_replies cr ON cr.post_id = cp.id
            GROUP BY cp.id, u.id
            ORDER BY cp.is_pinned DESC, cp.upvotes DESC, cp.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a post. Not idempotent: repeated calls create duplicates.
    pub async fn create(&self, post: &NewPost) -> Result<CommunityPost, DbError> {
        let created: CommunityPost = sqlx::query_as(
            r#"
            INSERT INTO community_posts (author_id, title_he, title_en, body_he, body_en, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, author_id, title_he, title_en, body_he, body_en,
                      category, upvotes, is_pinned, created_at
            "#,
        )
        .bind(post.author_id)
        .bind(post.title.he.as_deref())
        .bind(post.title.en.as_deref())
        .bind(post.body.he.as_deref())
        .bind(post.body.en.as_deref())
        .bind(&post.category)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
