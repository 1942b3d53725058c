//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use motomind_core::{Lang, ValidationError};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;

/// JSON body whose rejections render as `{"error": ...}` with status 400
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                ApiError::Validation(ValidationError::MalformedBody {
                    reason: e.body_text(),
                })
            })?;
        Ok(Self(value))
    }
}

/// Extract a numeric id from path. Non-numeric ids cannot match a row.
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::MissingField { field: "id" }))?;

        let id = raw.parse::<i64>().map_err(|_| ApiError::NotFound {
            resource: "record",
            id: raw.clone(),
        })?;

        Ok(Self(id))
    }
}

#[derive(Debug, Default, Deserialize)]
struct LangParams {
    lang: Option<String>,
}

/// Display language from `?lang=`; defaults to English
pub struct LangQuery(pub Lang);

impl<S> FromRequestParts<S> for LangQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<LangParams>::from_request_parts(parts, state)
            .await
            .map(|Query(p)| p)
            .unwrap_or_default();

        Ok(Self(Lang::from_param(params.lang.as_deref())))
    }
}
