//! Process-wide shared storage handle.
//!
//! # Responsibility
//! - Own the single SQLite connection opened at startup.
//! - Hand out short-lived repositories scoped to the configured database name.
//!
//! # Invariants
//! - At most one repository borrows the connection at a time.
//! - Every repository is scoped to `database_name`; collections of other
//!   database names in the same file are invisible to it.

use super::{DbError, DbLocation, DbResult};
use crate::repo::document_repo::SqliteDocumentRepository;
use rusqlite::Connection;
use std::sync::Mutex;

/// Shared document storage, opened once and reused for the process lifetime.
pub struct Storage {
    conn: Mutex<Connection>,
    database_url: String,
    database_name: String,
}

impl Storage {
    /// Opens storage from `DATABASE_URL` / `DATABASE_NAME` style settings.
    pub fn open(database_url: &str, database_name: &str) -> DbResult<Self> {
        let location = DbLocation::parse(database_url)?;
        let conn = location.open()?;
        Ok(Self {
            conn: Mutex::new(conn),
            database_url: database_url.trim().to_string(),
            database_name: database_name.to_string(),
        })
    }

    /// Opens a private in-memory store, mainly for tests and demos.
    pub fn in_memory(database_name: &str) -> DbResult<Self> {
        Self::open(":memory:", database_name)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Runs `f` with a repository bound to the shared connection.
    ///
    /// The connection lock is held for the duration of `f`.
    pub fn with_repo<T, E>(
        &self,
        f: impl FnOnce(SqliteDocumentRepository<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(SqliteDocumentRepository::new(&conn, &self.database_name))
    }
}
