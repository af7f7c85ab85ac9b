// src/extract.rs

//! Extractors whose rejections use the crate's JSON error body.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// `Json<T>` that also runs `T`'s validation rules.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidJson(value))
    }
}

/// Validated fields read from the query string, or from a JSON body when the
/// query string is empty.
pub struct QueryOrJson<T>(pub T);

impl<S, T> FromRequest<S> for QueryOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.uri().query().is_some_and(|q| !q.is_empty()) {
            let Query(value) = Query::<T>::try_from_uri(req.uri())
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

            value.validate()?;

            return Ok(QueryOrJson(value));
        }

        let ValidJson(value) = ValidJson::<T>::from_request(req, state).await?;
        Ok(QueryOrJson(value))
    }
}

/// `Path<T>` with a 400 JSON body for unparseable segments.
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(AppPath(value))
    }
}
