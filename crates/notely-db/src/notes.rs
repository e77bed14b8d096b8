//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use notely_core::{
    Category, CategoryRepository, CreateNoteRequest, Error, Note, NoteRepository,
    NoteWithCategory, Result, UpdateNoteRequest,
};

use crate::categories::PgCategoryRepository;

/// Columns selected for a note joined with its category. Category columns
/// are aliased with a `c_` prefix so both entities can be read from one row.
const JOINED_COLUMNS: &str = "n.id, n.title, n.content, n.category_id, n.user_id, n.is_pinned, \
     n.created_at, n.updated_at, \
     c.id AS c_id, c.name AS c_name, c.color AS c_color, \
     c.user_id AS c_user_id, c.created_at AS c_created_at";

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
    categories: PgCategoryRepository,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        let categories = PgCategoryRepository::new(pool.clone());
        Self { pool, categories }
    }

    /// Resolve the category for a new note: the requested one (verified to
    /// belong to the user) or the lazily created default.
    async fn resolve_category(&self, user_id: Uuid, requested: Option<Uuid>) -> Result<Uuid> {
        match requested {
            Some(category_id) => {
                let owned: bool = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND user_id = $2)",
                )
                .bind(category_id)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

                if !owned {
                    return Err(Error::CategoryNotFound(category_id));
                }
                Ok(category_id)
            }
            None => Ok(self.categories.get_or_create_default(user_id).await?.id),
        }
    }
}

/// Build the SET clauses for a partial note update.
///
/// `$1` is always the `updated_at` stamp; dynamic fields follow from `$2`.
/// The note id and owner id take the two indices after the last clause.
fn build_update_clauses(req: &UpdateNoteRequest) -> (Vec<String>, usize) {
    let mut clauses = vec!["updated_at = $1".to_string()];
    let mut param_idx = 2;

    if req.title.is_some() {
        clauses.push(format!("title = ${}", param_idx));
        param_idx += 1;
    }
    if req.content.is_some() {
        clauses.push(format!("content = ${}", param_idx));
        param_idx += 1;
    }
    if req.category_id.is_some() {
        clauses.push(format!("category_id = ${}", param_idx));
        param_idx += 1;
    }
    if req.is_pinned.is_some() {
        clauses.push(format!("is_pinned = ${}", param_idx));
        param_idx += 1;
    }

    (clauses, param_idx)
}

/// Map a joined row to a NoteWithCategory.
fn map_joined_row(row: sqlx::postgres::PgRow) -> NoteWithCategory {
    NoteWithCategory {
        note: Note {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            category_id: row.get("category_id"),
            user_id: row.get("user_id"),
            is_pinned: row.get("is_pinned"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        },
        category: Category {
            id: row.get("c_id"),
            name: row.get("c_name"),
            color: row.get("c_color"),
            user_id: row.get("c_user_id"),
            created_at: row.get("c_created_at"),
        },
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<NoteWithCategory>> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM notes n
             JOIN categories c ON c.id = n.category_id
             WHERE n.user_id = $1
             ORDER BY n.is_pinned DESC, n.updated_at DESC"
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        tracing::debug!(
            subsystem = "database",
            component = "notes",
            op = "list",
            user_id = %user_id,
            result_count = rows.len(),
            "Listed notes"
        );
        Ok(rows.into_iter().map(map_joined_row).collect())
    }

    async fn fetch(&self, user_id: Uuid, id: Uuid) -> Result<NoteWithCategory> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM notes n
             JOIN categories c ON c.id = n.category_id
             WHERE n.id = $1 AND n.user_id = $2"
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))?;

        Ok(map_joined_row(row))
    }

    async fn insert(&self, user_id: Uuid, req: CreateNoteRequest) -> Result<Note> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("Note title is required".to_string()));
        }

        let category_id = self.resolve_category(user_id, req.category_id).await?;
        let now = Utc::now();

        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (id, title, content, category_id, user_id, is_pinned, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, false, $6, $6)
             RETURNING id, title, content, category_id, user_id, is_pinned, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(&req.content)
        .bind(category_id)
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        tracing::info!(
            subsystem = "database",
            component = "notes",
            op = "create",
            note_id = %note.id,
            user_id = %user_id,
            category_id = %category_id,
            "Note created"
        );
        Ok(note)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        if req.is_empty() {
            return Err(Error::InvalidInput("No fields to update".to_string()));
        }
        if let Some(title) = &req.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("Note title is required".to_string()));
            }
        }
        if let Some(category_id) = req.category_id {
            // Re-pointing a note at a category requires owning the category.
            self.resolve_category(user_id, Some(category_id)).await?;
        }

        let (clauses, param_idx) = build_update_clauses(&req);
        let query = format!(
            "UPDATE notes SET {} WHERE id = ${} AND user_id = ${}
             RETURNING id, title, content, category_id, user_id, is_pinned, created_at, updated_at",
            clauses.join(", "),
            param_idx,
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Note>(&query).bind(Utc::now());
        if let Some(title) = &req.title {
            q = q.bind(title.trim().to_string());
        }
        if let Some(content) = &req.content {
            q = q.bind(content.clone());
        }
        if let Some(category_id) = req.category_id {
            q = q.bind(category_id);
        }
        if let Some(is_pinned) = req.is_pinned {
            q = q.bind(is_pinned);
        }

        let note = q
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))?;

        tracing::info!(
            subsystem = "database",
            component = "notes",
            op = "update",
            note_id = %id,
            user_id = %user_id,
            "Note updated"
        );
        Ok(note)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }

        tracing::info!(
            subsystem = "database",
            component = "notes",
            op = "delete",
            note_id = %id,
            user_id = %user_id,
            "Note deleted"
        );
        Ok(())
    }
}
