//! Extractors that turn axum rejections into [`ApiError`]s.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::deserializers::deserialize_page;
use super::error::ApiError;

/// JSON request body. Anything that does not decode into `T` is unprocessable.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejected request body: {rejection}");
            ApiError::Unprocessable
        })?;
        Ok(Self(value))
    }
}

/// Integer id taken from the path. A non-integer segment matches no resource.
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        Ok(Self(id))
    }
}

#[derive(Deserialize)]
struct PageParams {
    #[serde(default, deserialize_with = "deserialize_page")]
    page: Option<i64>,
}

/// 1-based page number from the `page` query parameter, 1 when absent.
pub struct Page(pub i64);

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected query string: {rejection}");
                ApiError::BadRequest
            })?;
        Ok(Self(params.page.unwrap_or(1)))
    }
}
