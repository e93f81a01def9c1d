//! `SQLite` schema definitions for the portfolio database.

/// SQL statement to create the projects table.
pub const CREATE_PROJECTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    image_filename TEXT NOT NULL,
    category TEXT,
    technologies TEXT,
    project_url TEXT,
    duration TEXT,
    role TEXT,
    created_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_PROJECTS_TABLE, CREATE_METADATA_TABLE];

/// Columns selected whenever a full [`crate::Project`] is read, in the order
/// `row_to_project` expects them.
pub const PROJECT_COLUMNS: &str = "id, title, description, image_filename, category, \
     technologies, project_url, duration, role, created_date";
