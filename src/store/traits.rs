//! `UserStore` trait — async interface for per-user conversation records.

use async_trait::async_trait;

use crate::conversation::ConversationState;
use crate::error::DatabaseError;

/// A chat user's persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Internal row id. `None` until the record has been stored.
    pub id: Option<i64>,
    /// Platform user id (unique).
    pub user_id: String,
    pub name: String,
    /// Job preference.
    pub job: String,
    pub state: ConversationState,
}

impl UserRecord {
    /// A fresh record for a first-time user: empty name/job, initial state.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            name: String::new(),
            job: String::new(),
            state: ConversationState::default(),
        }
    }
}

/// Backend-agnostic user persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    /// Look up a user by platform user id.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, DatabaseError>;

    /// Insert or update a user keyed by `user_id`. Returns the stored record.
    async fn upsert_user(&self, user: &UserRecord) -> Result<UserRecord, DatabaseError>;

    /// Delete a user. Returns whether a record existed.
    async fn delete_user(&self, user_id: &str) -> Result<bool, DatabaseError>;

    /// Number of stored users.
    async fn count_users(&self) -> Result<usize, DatabaseError>;
}
