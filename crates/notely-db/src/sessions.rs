//! Refresh-token session repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use notely_core::{Error, Result, Session, SessionRepository};

/// PostgreSQL implementation of SessionRepository.
pub struct PgSessionRepository {
    pool: Pool<Postgres>,
}

impl PgSessionRepository {
    /// Create a new PgSessionRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(
        &self,
        user_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, user_id, refresh_token_hash, expires_at, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, user_id, refresh_token_hash, expires_at, revoked_at, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(session)
    }

    async fn find_active_by_hash(&self, refresh_token_hash: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, refresh_token_hash, expires_at, revoked_at, created_at
             FROM sessions
             WHERE refresh_token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > now()",
        )
        .bind(refresh_token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(session)
    }

    async fn revoke(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE sessions SET revoked_at = $1 WHERE id = $2 AND revoked_at IS NULL")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = $1 WHERE user_id = $2 AND revoked_at IS NULL",
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        tracing::debug!(
            subsystem = "database",
            component = "sessions",
            op = "revoke_all",
            user_id = %user_id,
            result_count = result.rows_affected(),
            "Sessions revoked"
        );
        Ok(())
    }
}
