//! Category HTTP handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use notely_core::{CategoryRepository, CreateCategoryRequest};

use crate::auth::extractor::AuthUser;
use crate::{ApiError, AppState};

/// `GET /api/v1/categories` returns the user's categories in name order.
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.db.categories.list(auth.user_id).await?;
    Ok(Json(categories))
}

/// `POST /api/v1/categories`
///
/// Duplicate names within the same user are a 409; the repository trims the
/// name before the uniqueness check.
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state.db.categories.insert(auth.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(category)))
}
