//! Caller identity extraction
//!
//! Authentication happens in the fronting layer, which forwards the
//! authenticated account id in the `x-user-id` header. The core trusts
//! that value completely and performs no authentication of its own.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;

/// Request header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller identity
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthorized(format!("Missing {} header", USER_ID_HEADER))
            })?;

        let user_id = Uuid::parse_str(value).map_err(|_| {
            ApiError::Unauthorized(format!("Invalid {} header", USER_ID_HEADER))
        })?;

        Ok(Identity(user_id))
    }
}
