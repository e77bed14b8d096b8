//! Note CRUD HTTP handlers.
//!
//! Every handler extracts [`AuthUser`] and passes the user id down to the
//! repository, which scopes the query to the owner. A note belonging to
//! someone else is indistinguishable from a missing note (404).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use notely_core::{CreateNoteRequest, NoteRepository, UpdateNoteRequest};

use crate::auth::extractor::AuthUser;
use crate::{ApiError, AppState};

/// `GET /api/v1/notes` lists pinned notes first, then newest-updated first.
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.db.notes.list(auth.user_id).await?;
    Ok(Json(notes))
}

/// `GET /api/v1/notes/:id`
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.fetch(auth.user_id, id).await?;
    Ok(Json(note))
}

/// `POST /api/v1/notes`
///
/// A missing `category_id` falls back to the user's first category, creating
/// the default one for brand-new users.
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    let note = state.db.notes.insert(auth.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// `PATCH /api/v1/notes/:id`
///
/// Partial update: absent fields are untouched, a present-but-null `content`
/// clears it. An empty body is rejected rather than silently no-opping.
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }
    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
        }
    }

    let note = state.db.notes.update(auth.user_id, id, body).await?;
    Ok(Json(note))
}

/// `DELETE /api/v1/notes/:id`
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.notes.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
