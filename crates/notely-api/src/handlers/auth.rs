//! Authentication HTTP handlers.
//!
//! Sign-up, sign-in, token refresh, sign-out, and the current-user endpoint.
//! Access tokens are short-lived JWTs; refresh tokens are opaque, stored
//! hashed, and rotated on every refresh.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use notely_core::{SessionRepository, UserInfo, UserRepository};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::{ApiError, AppState};

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Request body for signing in.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Request body for exchanging a refresh token.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful sign-in / refresh response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Minimal email shape check. Real validation happens when mail is sent;
/// this only rejects obvious garbage before it reaches the database.
fn validate_email(email: &str) -> Result<(), ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest("Email is required".to_string()));
    }
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

/// Issue a fresh access/refresh token pair and record the session.
async fn issue_tokens(state: &AppState, user: notely_core::User) -> Result<AuthResponse, ApiError> {
    let (refresh_token, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + Duration::days(state.jwt.refresh_token_expiry_days);
    state
        .db
        .sessions
        .create(user.id, &refresh_hash, expires_at)
        .await?;

    let access_token = generate_access_token(user.id, &state.jwt)
        .map_err(|e| ApiError::Database(notely_core::Error::Internal(e.to_string())))?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.access_token_expiry_mins * 60,
        user: user.into(),
    })
}

/// `POST /api/v1/auth/signup`
///
/// Validation runs before any database or hashing work. Returns 201 with the
/// public user view; the client signs in separately to obtain tokens.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    validate_email(&body.email)?;
    validate_password_strength(&body.password).map_err(ApiError::BadRequest)?;

    let password_hash = hash_password(&body.password)
        .map_err(|e| ApiError::Database(notely_core::Error::Internal(e.to_string())))?;

    let user = state
        .db
        .users
        .create(body.email.trim(), &password_hash)
        .await?;

    tracing::info!(
        subsystem = "auth",
        component = "signup",
        user_id = %user.id,
        "User registered"
    );

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `POST /api/v1/auth/signin`
///
/// Unknown email and wrong password produce the same 401 message so the
/// endpoint cannot be used to probe which emails are registered.
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .db
        .users
        .find_by_email(body.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let verified = verify_password(&body.password, &user.password_hash)
        .map_err(|e| ApiError::Database(notely_core::Error::Internal(e.to_string())))?;
    if !verified {
        return Err(invalid());
    }

    tracing::info!(
        subsystem = "auth",
        component = "signin",
        user_id = %user.id,
        "User signed in"
    );

    let response = issue_tokens(&state, user).await?;
    Ok(Json(response))
}

/// `POST /api/v1/auth/refresh`
///
/// Rotates the refresh token: the presented session is revoked and a new one
/// is created, so a leaked token can be used at most once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let hash = hash_refresh_token(&body.refresh_token);
    let session = state
        .db
        .sessions
        .find_active_by_hash(&hash)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    let user = state
        .db
        .users
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    state.db.sessions.revoke(session.id).await?;

    tracing::debug!(
        subsystem = "auth",
        component = "refresh",
        user_id = %user.id,
        "Refresh token rotated"
    );

    let response = issue_tokens(&state, user).await?;
    Ok(Json(response))
}

/// `POST /api/v1/auth/signout`
///
/// Revokes every session for the user. The current access token stays valid
/// until its (short) expiry; only refresh stops working immediately.
pub async fn signout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    state.db.sessions.revoke_all_for_user(auth.user_id).await?;

    tracing::info!(
        subsystem = "auth",
        component = "signout",
        user_id = %auth.user_id,
        "User signed out"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v1/auth/me`
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserInfo>, ApiError> {
    let user = state
        .db
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_normal_addresses() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("  padded@example.org  ").is_ok());
    }

    #[test]
    fn test_validate_email_rejects_garbage() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
    }

    #[test]
    fn test_signup_request_deserializes() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"email": "a@b.co", "password": "hunter2x"}"#).unwrap();
        assert_eq!(req.email, "a@b.co");
        assert_eq!(req.password, "hunter2x");
    }

    #[test]
    fn test_auth_response_shape() {
        let response = AuthResponse {
            access_token: "jwt".to_string(),
            refresh_token: "opaque".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 900,
            user: UserInfo {
                id: uuid::Uuid::nil(),
                email: "a@b.co".to_string(),
                created_at: chrono::Utc::now(),
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["token_type"], "Bearer");
        assert_eq!(value["expires_in"], 900);
        assert_eq!(value["user"]["email"], "a@b.co");
        // The password hash never appears in the user object.
        assert!(value["user"].get("password_hash").is_none());
    }
}
