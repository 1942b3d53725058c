//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and follows these patterns:
//! - One JOINed query per view (no N+1)
//! - Fixed result limits, no pagination
//! - Transactions for multi-step writes

pub mod community;
pub mod listings;
pub mod reviews;
pub mod users;

pub use community::{CommunityPost, CommunityRepo, PostWithReplies};
pub use listings::{ListingDetail, ListingRecord, ListingRepo, ListingSummary};
pub use reviews::{Review, ReviewRepo, ReviewWithReviewer, SubmittedReview};
pub use users::{ProfileListing, UserRecord, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
