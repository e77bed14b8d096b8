//! Axum extractor for the authenticated user.
//!
//! Handlers that require authentication take an [`AuthUser`] argument; axum
//! runs the extraction before the handler body, so unauthenticated requests
//! are rejected with 401 without touching handler logic.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::{ApiError, AppState};

/// The authenticated user, extracted from a `Bearer` access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must use the Bearer scheme".to_string())
        })?;

        let claims = validate_token(token, &state.jwt).map_err(|e| {
            tracing::debug!(
                subsystem = "auth",
                component = "extractor",
                error_msg = %e,
                "Access token rejected"
            );
            ApiError::Unauthorized("Invalid or expired access token".to_string())
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
