//! Category repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use notely_core::defaults::{DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_NAME};
use notely_core::{Category, CategoryRepository, CreateCategoryRequest, Error, Result};

use crate::is_unique_violation;

/// PostgreSQL implementation of CategoryRepository.
pub struct PgCategoryRepository {
    pool: Pool<Postgres>,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// First category in name order, if the user has any.
    async fn first_for_user(&self, user_id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, color, user_id, created_at
             FROM categories WHERE user_id = $1
             ORDER BY name ASC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(category)
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, color, user_id, created_at
             FROM categories WHERE user_id = $1
             ORDER BY name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(categories)
    }

    async fn insert(&self, user_id: Uuid, req: CreateCategoryRequest) -> Result<Category> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Category name is required".to_string()));
        }

        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name, color, user_id, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, color, user_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(&req.color)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict("A category with this name already exists".to_string())
            } else {
                Error::Database(e)
            }
        })?;

        tracing::info!(
            subsystem = "database",
            component = "categories",
            op = "create",
            category_id = %category.id,
            user_id = %user_id,
            "Category created"
        );
        Ok(category)
    }

    async fn get_or_create_default(&self, user_id: Uuid) -> Result<Category> {
        if let Some(category) = self.first_for_user(user_id).await? {
            return Ok(category);
        }

        // Two concurrent saves may both reach the insert; the unique
        // (user_id, name) constraint makes one of them lose, in which case
        // the existing row is fetched instead.
        let inserted = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name, color, user_id, created_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT idx_unique_category_name DO NOTHING
             RETURNING id, name, color, user_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(DEFAULT_CATEGORY_NAME)
        .bind(DEFAULT_CATEGORY_COLOR)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        match inserted {
            Some(category) => {
                tracing::info!(
                    subsystem = "database",
                    component = "categories",
                    op = "create_default",
                    category_id = %category.id,
                    user_id = %user_id,
                    "Default category created"
                );
                Ok(category)
            }
            None => self
                .first_for_user(user_id)
                .await?
                .ok_or_else(|| Error::Internal("Default category vanished".to_string())),
        }
    }
}
