//! SQLite schema creation and version checks.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid schema version {found}; delete the index database to regenerate the schema")]
    InvalidVersion { found: i32 },
    #[error(
        "Schema version mismatch: expected {expected}, found {found}; delete the index database to regenerate the schema"
    )]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Bump when `schema.sql` changes.
pub const CURRENT_VERSION: i32 = 1;

const _: () = assert!(CURRENT_VERSION > 0, "schema version must be non-zero");

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Create all tables and indexes if they don't exist.
///
/// Idempotent: the version row is only recorded once.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? == 0 {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION],
        )?;
    }
    Ok(())
}

/// Open or create an index database at the given path.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    if get_schema_version(&conn)? == 0 {
        log::debug!("Creating index schema v{CURRENT_VERSION} in {}", path.display());
        create_schema(&conn)?;
    }
    check_version(&conn)?;

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    check_version(&conn)?;
    Ok(conn)
}

/// Fail unless the recorded version is exactly the one this binary writes.
pub fn check_version(conn: &Connection) -> Result<(), SchemaError> {
    let found = get_schema_version(conn)?;
    if found <= 0 {
        return Err(SchemaError::InvalidVersion { found });
    }
    if found != CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found,
        });
    }
    Ok(())
}

/// Get the recorded schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}
