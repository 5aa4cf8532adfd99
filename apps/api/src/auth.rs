//! Bearer-token extractor. The token is not inspected here; it is forwarded
//! to the résumé backend, which is the authority on whether it is valid.

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};

use crate::errors::AppError;
use crate::remote::AuthContext;

/// Credentials for handlers that call the backend on the user's behalf.
///
/// Use as an extractor; `Option<BearerAuth>` makes it optional.
#[derive(Debug, Clone)]
pub struct BearerAuth(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(BearerAuth(AuthContext::bearer(token)))
    }
}
