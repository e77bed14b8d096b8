//! Core data models for notely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account.
///
/// The password hash is an Argon2id PHC string and is never serialized out.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, safe to return from the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// A refresh-token session.
///
/// Only the SHA-256 hash of the refresh token is stored; the plaintext is
/// handed to the client once and never persisted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub refresh_token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A session is usable only while unexpired and unrevoked.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// A user-defined note category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Hex color string, e.g. `#3b82f6`.
    pub color: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub category_id: Uuid,
    pub user_id: Uuid,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A note joined with its owning category, as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteWithCategory {
    #[serde(flatten)]
    pub note: Note,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_session(expires_in: Duration, revoked: bool) -> Session {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            refresh_token_hash: "deadbeef".repeat(8),
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
            created_at: now,
        }
    }

    #[test]
    fn test_session_active() {
        let session = sample_session(Duration::days(1), false);
        assert!(session.is_active(Utc::now()));
    }

    #[test]
    fn test_session_expired() {
        let session = sample_session(Duration::seconds(-1), false);
        assert!(!session.is_active(Utc::now()));
    }

    #[test]
    fn test_session_revoked() {
        let session = sample_session(Duration::days(1), true);
        assert!(!session.is_active(Utc::now()));
    }

    #[test]
    fn test_user_info_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };
        let info = UserInfo::from(user.clone());
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("a@example.com"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_note_with_category_flattens_note_fields() {
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let category = Category {
            id: Uuid::new_v4(),
            name: "General".to_string(),
            color: "#3b82f6".to_string(),
            user_id,
            created_at: now,
        };
        let joined = NoteWithCategory {
            note: Note {
                id: Uuid::new_v4(),
                title: "Groceries".to_string(),
                content: Some("milk".to_string()),
                category_id: category.id,
                user_id,
                is_pinned: false,
                created_at: now,
                updated_at: now,
            },
            category,
        };
        let value = serde_json::to_value(&joined).unwrap();
        // Note fields are flattened to the top level; the category is nested.
        assert_eq!(value["title"], "Groceries");
        assert_eq!(value["category"]["name"], "General");
    }
}
