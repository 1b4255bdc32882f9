//! Request Extractors

use crate::error::ApiError;
use axum::{async_trait, extract::FromRequest, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Header carrying the authenticated owner, set by the upstream gateway
pub const OWNER_HEADER: &str = "x-owner-id";

/// Owner on whose behalf a request acts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        Uuid::parse_str(value.trim())
            .map(OwnerId)
            .map_err(|_| ApiError::Unauthorized)
    }
}

/// JSON request body whose rejections answer in the API error shape
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
