//! Schema versioning for the portfolio database.
//!
//! The base tables come from [`SCHEMA_STATEMENTS`]. Everything after that is
//! an entry in [`MIGRATIONS`]; the number of entries applied is recorded in
//! the `metadata` table, and each step runs in its own transaction.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// Upgrade steps in order. Applying entry `n` takes the schema to version `n + 1`.
///
/// Append new steps, never edit applied ones. A new `projects` column, say a
/// `featured` flag, would land here as
/// `ALTER TABLE projects ADD COLUMN featured INTEGER NOT NULL DEFAULT 0`
/// together with a matching change to `PROJECT_COLUMNS`.
const MIGRATIONS: &[&str] = &[
    // v1: the gallery always sorts newest first
    "CREATE INDEX IF NOT EXISTS idx_projects_created \
     ON projects (created_date DESC, id DESC)",
];

/// The schema version this build writes.
pub const CURRENT_VERSION: usize = MIGRATIONS.len();

const VERSION_KEY: &str = "schema_version";

/// Create the base tables and apply any pending migrations.
///
/// # Errors
///
/// Returns an error if a statement fails, or if the database was written by a
/// newer build with a schema version this one does not know.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for (index, sql) in MIGRATIONS.iter().enumerate().skip(version) {
        let target = index + 1;
        debug!("Applying projects schema migration v{}", target);

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        set_schema_version(&tx, target)?;
        tx.commit()?;
    }

    Ok(())
}

/// The recorded schema version, or 0 when none has been written yet.
fn schema_version(conn: &Connection) -> Result<usize> {
    let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = ?1")?;
    let mut rows = stmt.query([VERSION_KEY])?;

    let Some(row) = rows.next()? else {
        return Ok(0);
    };
    let value: String = row.get(0)?;
    value.parse().map_err(|_| Error::DatabaseMigration {
        message: format!("invalid schema version: {value}"),
    })
}

fn set_schema_version(conn: &Connection, version: usize) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}
