//! AI note-expansion handler.
//!
//! Proxies the note text to the configured generation backend and returns the
//! expanded content. The server owns the API key; clients never see it.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::{ApiError, AppState};

/// Request body for note expansion.
///
/// Either `content` or `title` must carry non-blank text. Content is the
/// primary input; the title alone is accepted for notes that have no body yet.
#[derive(Debug, Deserialize)]
pub struct ExpandNoteRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ExpandNoteRequest {
    /// True when neither field has usable text.
    pub fn is_blank(&self) -> bool {
        let blank = |s: &Option<String>| s.as_deref().map_or(true, |v| v.trim().is_empty());
        blank(&self.content) && blank(&self.title)
    }
}

#[derive(Debug, Serialize)]
pub struct ExpandNoteResponse {
    #[serde(rename = "expandedContent")]
    pub expanded_content: String,
}

/// `POST /api/v1/expand-note`
pub async fn expand_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ExpandNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.is_blank() {
        return Err(ApiError::BadRequest(
            "Content or title is required".to_string(),
        ));
    }

    let content = body.content.as_deref().unwrap_or("");
    let start = std::time::Instant::now();

    let expanded = state
        .expansion
        .expand(content, body.title.as_deref())
        .await?;

    tracing::info!(
        subsystem = "inference",
        component = "expand",
        user_id = %auth.user_id,
        model = state.expansion.model_name(),
        prompt_len = content.len(),
        response_len = expanded.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Note expanded"
    );

    Ok(Json(ExpandNoteResponse {
        expanded_content: expanded,
    }))
}
