//! Storage layer for the portfolio.
//!
//! This module provides the `SQLite`-backed Data Access Layer for projects.
//! Each operation is a single parameterized statement committed on return.

pub mod migrations;
pub mod schema;
pub mod seed;

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::project::{NewProject, Project, ProjectUpdate, TIMESTAMP_FORMAT};

use self::schema::PROJECT_COLUMNS;

/// Path reported for in-memory databases.
const MEMORY_PATH: &str = ":memory:";

/// Data access for the `projects` table.
#[derive(Debug)]
pub struct ProjectStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl ProjectStore {
    /// Open or create a project database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL lets page renders read while the add-project form writes
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(MEMORY_PATH),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(MEMORY_PATH),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a project and return its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn add_project(&self, project: &NewProject) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO projects (title, description, image_filename, category,
                                  technologies, project_url, duration, role)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                project.title,
                project.description,
                project.image_filename,
                project.category,
                project.technologies,
                project.project_url,
                project.duration,
                project.role,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted project {} ({})", id, project.title);
        Ok(id)
    }

    /// Get every project, newest first.
    ///
    /// Rows created within the same second come back in reverse insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_all_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_date DESC, id DESC"
        ))?;

        let projects = stmt
            .query_map([], Self::row_to_project)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    /// Get a project by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_project_by_id(&self, id: i64) -> Result<Option<Project>> {
        let project = self
            .conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                [id],
                Self::row_to_project,
            )
            .optional()?;
        Ok(project)
    }

    /// Apply a partial update to a project.
    ///
    /// Only the fields set in `update` are written. Returns `false` when the
    /// update is empty (nothing is executed) or no row has the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn update_project(&self, id: i64, update: &ProjectUpdate) -> Result<bool> {
        let assignments = update.assignments();
        if assignments.is_empty() {
            debug!("Empty update for project {}, skipping", id);
            return Ok(false);
        }

        let set_clause = assignments
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE projects SET {set_clause} WHERE id = ?");

        let values = assignments
            .iter()
            .map(|(_, value)| Value::Text((*value).to_string()))
            .chain(std::iter::once(Value::Integer(id)));

        let affected = self.conn.execute(&sql, params_from_iter(values))?;
        debug!("Updated project {} ({} rows)", id, affected);
        Ok(affected > 0)
    }

    /// Delete a project by id.
    ///
    /// Returns `true` if a project was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_project(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1", [id])?;
        if affected > 0 {
            info!("Deleted project {}", id);
        }
        Ok(affected > 0)
    }

    /// Count stored projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert the demo projects and return how many were added.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn seed_sample_data(&self) -> Result<usize> {
        let samples = seed::sample_projects();
        for project in &samples {
            self.add_project(project)?;
        }
        info!("Added {} sample projects to the database", samples.len());
        Ok(samples.len())
    }

    fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
        let created: Option<String> = row.get(9)?;
        let created_date = created
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok())
            .unwrap_or_else(|| {
                warn!("Unparseable created_date {:?}, using now", created);
                Utc::now().naive_utc()
            });

        Ok(Project {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            image_filename: row.get(3)?,
            category: row.get(4)?,
            technologies: row.get(5)?,
            project_url: row.get(6)?,
            duration: row.get(7)?,
            role: row.get(8)?,
            created_date,
        })
    }
}
