//! libSQL backend — async `UserStore` trait implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info, warn};

use crate::conversation::ConversationState;
use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::{UserRecord, UserStore};

/// User store on a single shared libSQL connection.
pub struct LibSqlBackend {
    /// Owner of the file or `:memory:` database behind `conn`. Never queried
    /// directly; dropping it would close the database under the connection.
    _db: LibSqlDatabase,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            _db: db,
            conn,
        };
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            _db: db,
            conn,
        };
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

const USER_COLUMNS: &str = "id, user_id, name, job, state";

/// Map a libsql Row to a UserRecord. Column order matches USER_COLUMNS.
fn row_to_user(row: &libsql::Row) -> Result<UserRecord, libsql::Error> {
    let id: i64 = row.get(0)?;
    let user_id: String = row.get(1)?;
    let name: String = row.get(2)?;
    let job: String = row.get(3)?;
    let state_str: String = row.get(4)?;

    let state = state_str.parse().unwrap_or_else(|e: String| {
        warn!(user_id = %user_id, error = %e, "Unknown stored state, restarting conversation");
        ConversationState::default()
    });

    Ok(UserRecord {
        id: Some(id),
        user_id,
        name,
        job,
        state,
    })
}

#[async_trait]
impl UserStore for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
                params![user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_user: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let user = row_to_user(&row)
                    .map_err(|e| DatabaseError::Query(format!("get_user row parse: {e}")))?;
                Ok(Some(user))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_user: {e}"))),
        }
    }

    async fn upsert_user(&self, user: &UserRecord) -> Result<UserRecord, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT INTO users (user_id, name, job, state, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET
                    name = excluded.name,
                    job = excluded.job,
                    state = excluded.state,
                    updated_at = excluded.updated_at",
                params![
                    user.user_id.as_str(),
                    user.name.as_str(),
                    user.job.as_str(),
                    user.state.as_str(),
                    now
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("upsert_user: {e}")))?;

        debug!(user_id = %user.user_id, state = %user.state, "User upserted in DB");

        self.get_user(&user.user_id).await?.ok_or_else(|| {
            DatabaseError::Query(format!("upsert_user: {} missing after write", user.user_id))
        })
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .conn()
            .execute("DELETE FROM users WHERE user_id = ?1", params![user_id])
            .await
            .map_err(|e| DatabaseError::Query(format!("delete_user: {e}")))?;

        debug!(user_id = %user_id, deleted = affected > 0, "User delete in DB");
        Ok(affected > 0)
    }

    async fn count_users(&self) -> Result<usize, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM users", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("count_users: {e}")))?;

        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("count_users: {e}")))?;
        match row {
            Some(row) => {
                let count: i64 = row
                    .get(0)
                    .map_err(|e| DatabaseError::Query(format!("count_users row parse: {e}")))?;
                Ok(count as usize)
            }
            None => Ok(0),
        }
    }
}
