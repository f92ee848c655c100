//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Map configured connection strings to SQLite locations.
//! - Open file or in-memory SQLite connections.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Returned connections wait up to 5s on a busy database.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const SQLITE_URL_PREFIX: &str = "sqlite://";
const MEMORY_LOCATION: &str = ":memory:";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a configured database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl DbLocation {
    /// Parses a `DATABASE_URL` value.
    ///
    /// Accepts a plain file path, a `sqlite://` prefixed path, or `:memory:`
    /// (with or without the prefix).
    pub fn parse(url: &str) -> DbResult<Self> {
        let trimmed = url.trim();
        let location = trimmed.strip_prefix(SQLITE_URL_PREFIX).unwrap_or(trimmed);
        if location.is_empty() || location.contains("://") {
            return Err(DbError::InvalidLocation(trimmed.to_string()));
        }
        if location == MEMORY_LOCATION {
            return Ok(Self::Memory);
        }
        Ok(Self::File(PathBuf::from(location)))
    }

    /// Opens a migrated connection at this location.
    pub fn open(&self) -> DbResult<Connection> {
        match self {
            Self::File(path) => open_db(path),
            Self::Memory => open_db_in_memory(),
        }
    }
}

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::DbLocation;
    use std::path::PathBuf;

    #[test]
    fn parse_accepts_paths_and_memory() {
        assert_eq!(
            DbLocation::parse("/var/lib/supplier.sqlite3").unwrap(),
            DbLocation::File(PathBuf::from("/var/lib/supplier.sqlite3"))
        );
        assert_eq!(
            DbLocation::parse("sqlite://data/supplier.db").unwrap(),
            DbLocation::File(PathBuf::from("data/supplier.db"))
        );
        assert_eq!(DbLocation::parse(":memory:").unwrap(), DbLocation::Memory);
        assert_eq!(
            DbLocation::parse("sqlite://:memory:").unwrap(),
            DbLocation::Memory
        );
    }

    #[test]
    fn parse_rejects_foreign_schemes() {
        assert!(DbLocation::parse("mongodb://localhost:27017").is_err());
        assert!(DbLocation::parse("  ").is_err());
    }
}
