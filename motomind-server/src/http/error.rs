//! API error types with IntoResponse
//!
//! Every failure renders as `{"error": "<message>"}`. Store failures are
//! logged with their cause and answered with the route's generic message.
//! There are no retries: a failed query ends the request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use motomind_core::ValidationError;
use serde_json::json;

use crate::db::repos::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Store failure (500, logged, cause withheld from the client)
    Store { message: &'static str, source: DbError },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, .. } => {
                let mut chars = resource.chars();
                match chars.next() {
                    Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
                    None => "Not found".to_owned(),
                }
            }
            Self::Store { message, .. } => (*message).to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "not found");
            }
            Self::Validation(e) => {
                tracing::debug!(error = %e, "rejected request");
            }
        }

        let body = json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// Attach a client-facing message to a repository result.
///
/// `DbError::NotFound` stays a 404; anything else becomes a 500 carrying
/// `message`.
pub trait StoreResultExt<T> {
    fn context(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for Result<T, DbError> {
    fn context(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| match e {
            DbError::NotFound { resource, id } => ApiError::NotFound { resource, id },
            source => ApiError::Store { message, source },
        })
    }
}
