//! Community feed posts.

use serde::Deserialize;

use crate::lang::Bilingual;

/// Category used when a post is created without one
pub const DEFAULT_CATEGORY: &str = "question";

/// Maximum posts returned by the feed
pub const FEED_LIMIT: i64 = 30;

/// Raw post payload as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    pub author_id: Option<i64>,
    pub title_he: Option<String>,
    pub title_en: Option<String>,
    pub body_he: Option<String>,
    pub body_en: Option<String>,
    pub category: Option<String>,
}

/// Post ready for insertion. Fields are passed through as submitted;
/// the store enforces its own constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub author_id: Option<i64>,
    pub title: Bilingual<Option<String>>,
    pub body: Bilingual<Option<String>>,
    pub category: String,
}

impl From<PostDraft> for NewPost {
    fn from(draft: PostDraft) -> Self {
        Self {
            author_id: draft.author_id,
            title: Bilingual::new(draft.title_he, draft.title_en),
            body: Bilingual::new(draft.body_he, draft.body_en),
            category: draft
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
        }
    }
}
