//! Core traits for notely abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Request for creating a new note.
///
/// When `category_id` is `None`, the repository assigns the user's first
/// category, lazily creating the default one if the user has none.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

/// Request for updating a note. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    /// `Some(None)` is not representable over JSON; a present-but-null
    /// content field clears the content.
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub content: Option<Option<String>>,
    pub category_id: Option<Uuid>,
    pub is_pinned: Option<bool>,
}

fn deserialize_double_option<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?))
}

impl UpdateNoteRequest {
    /// True when no field is set; such an update is rejected as invalid input.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category_id.is_none()
            && self.is_pinned.is_none()
    }
}

/// Repository for note CRUD operations.
///
/// Every method takes the owner's `user_id` and scopes the underlying query
/// to it. This duplicates what database row-level security would enforce,
/// deliberately: defense in depth against a handler passing the wrong id.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List the user's notes, pinned first, then newest-updated first,
    /// joined with their categories.
    async fn list(&self, user_id: Uuid) -> Result<Vec<NoteWithCategory>>;

    /// Fetch one note. `NotFound` when absent or owned by another user.
    async fn fetch(&self, user_id: Uuid, id: Uuid) -> Result<NoteWithCategory>;

    /// Insert a new note, assigning id and timestamps server-side.
    async fn insert(&self, user_id: Uuid, req: CreateNoteRequest) -> Result<Note>;

    /// Merge partial fields into a note and stamp `updated_at`.
    async fn update(&self, user_id: Uuid, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Delete a note. `NotFound` when no owned row matched.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()>;
}

// =============================================================================
// CATEGORY REPOSITORY
// =============================================================================

/// Request for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub color: String,
}

/// Repository for category operations. Owner-scoped like [`NoteRepository`].
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List the user's categories, name-ordered.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Category>>;

    /// Create a new category for the user.
    async fn insert(&self, user_id: Uuid, req: CreateCategoryRequest) -> Result<Category>;

    /// Return the user's first category (name order), lazily creating the
    /// default "General" category when the user has none.
    async fn get_or_create_default(&self, user_id: Uuid) -> Result<Category>;
}

// =============================================================================
// USER / SESSION REPOSITORIES
// =============================================================================

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user. `Conflict` when the email is already registered.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User>;

    /// Look up a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}

/// Repository for refresh-token sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Record a new session for the user.
    async fn create(
        &self,
        user_id: Uuid,
        refresh_token_hash: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Session>;

    /// Find the active session matching a refresh-token hash.
    async fn find_active_by_hash(&self, refresh_token_hash: &str) -> Result<Option<Session>>;

    /// Revoke a single session.
    async fn revoke(&self, id: Uuid) -> Result<()>;

    /// Revoke every session belonging to the user (sign-out).
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<()>;
}

// =============================================================================
// EXPANSION BACKEND
// =============================================================================

/// Backend capable of expanding a brief note into detailed content.
#[async_trait]
pub trait ExpansionBackend: Send + Sync {
    /// Expand note content. The title, when present, is only context.
    async fn expand(&self, content: &str, title: Option<&str>) -> Result<String>;

    /// Name of the generation model in use.
    fn model_name(&self) -> &str;
}
