use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller. Extracting it rejects the request with 401
/// when the bearer token is missing or does not verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        // Accept both "Bearer <token>" and a raw token
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();

        let claims = state.jwt.verify_token(token).map_err(|e| {
            debug!("Rejected access token: {e}");
            AppError::Unauthorized
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
