//! Two-way review submissions.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Which side of the sale wrote the review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewerRole {
    Buyer,
    Seller,
}

impl ReviewerRole {
    pub fn parse(s: &str) -> ValidationResult<Self> {
        match s {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            _ => Err(ValidationError::InvalidVariant {
                field: "reviewer_role",
                allowed: "buyer, seller",
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
        }
    }
}

/// Raw review payload as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewDraft {
    pub listing_id: Option<i64>,
    pub reviewer_id: Option<i64>,
    pub reviewee_id: Option<i64>,
    pub reviewer_role: Option<String>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub was_honest: Option<bool>,
    pub was_on_time: Option<bool>,
    pub car_matched_description: Option<bool>,
}

/// Validated review ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub listing_id: i64,
    pub reviewer_id: i64,
    pub reviewee_id: i64,
    pub reviewer_role: ReviewerRole,
    pub rating: i32,
    pub comment: Option<String>,
    pub was_honest: Option<bool>,
    pub was_on_time: Option<bool>,
    pub car_matched_description: Option<bool>,
}

fn required_id(value: Option<i64>, field: &'static str) -> ValidationResult<i64> {
    value
        .filter(|v| *v != 0)
        .ok_or(ValidationError::MissingField { field })
}

impl NewReview {
    /// Validate a draft.
    ///
    /// Ids and rating must be present and non-zero; the role must be
    /// `buyer` or `seller`. Missing fields are reported before a bad role.
    pub fn from_draft(draft: ReviewDraft) -> ValidationResult<Self> {
        let listing_id = required_id(draft.listing_id, "listing_id")?;
        let reviewer_id = required_id(draft.reviewer_id, "reviewer_id")?;
        let reviewee_id = required_id(draft.reviewee_id, "reviewee_id")?;
        let role = draft
            .reviewer_role
            .filter(|r| !r.is_empty())
            .ok_or(ValidationError::MissingField { field: "reviewer_role" })?;
        let rating = draft
            .rating
            .filter(|r| *r != 0)
            .ok_or(ValidationError::MissingField { field: "rating" })?;

        Ok(Self {
            listing_id,
            reviewer_id,
            reviewee_id,
            reviewer_role: ReviewerRole::parse(&role)?,
            rating,
            comment: draft.comment,
            was_honest: draft.was_honest,
            was_on_time: draft.was_on_time,
            car_matched_description: draft.car_matched_description,
        })
    }
}
