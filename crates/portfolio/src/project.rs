//! Core project types for the portfolio.
//!
//! A [`Project`] is one row of the `projects` table. [`NewProject`] carries
//! the user-supplied columns for an insert, and [`ProjectUpdate`] carries the
//! subset of columns a partial update should touch.

use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Format `SQLite` uses for `CURRENT_TIMESTAMP`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Bytes escaped when an image file name becomes one URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// True for absolute `http://` or `https://` URLs. The scheme match ignores case.
#[must_use]
pub fn is_web_url(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, rest)| {
        !rest.is_empty()
            && (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
    })
}

/// A stored portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Row id assigned by the store.
    pub id: i64,
    /// Project title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Image file name under `static/images`.
    pub image_filename: String,
    /// Project category, e.g. "Senior Capstone".
    pub category: Option<String>,
    /// Comma-separated technologies used.
    pub technologies: Option<String>,
    /// Link to the live project.
    pub project_url: Option<String>,
    /// Free-form duration, e.g. "Fall 2024 - Spring 2025".
    pub duration: Option<String>,
    /// The owner's role on the project.
    pub role: Option<String>,
    /// When the row was inserted (UTC).
    pub created_date: NaiveDateTime,
}

impl Project {
    /// Split the technologies column into trimmed, non-empty entries.
    #[must_use]
    pub fn technology_list(&self) -> Vec<&str> {
        self.technologies
            .as_deref()
            .map(|techs| {
                techs
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Path under which the project image is served.
    #[must_use]
    pub fn image_path(&self) -> String {
        format!(
            "/static/images/{}",
            utf8_percent_encode(&self.image_filename, PATH_SEGMENT)
        )
    }

    /// The project URL, if it is safe to render as a link.
    #[must_use]
    pub fn link_url(&self) -> Option<&str> {
        self.project_url.as_deref().filter(|url| is_web_url(url))
    }
}

/// The user-supplied columns of a project to insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Image file name under `static/images`.
    pub image_filename: String,
    /// Project category.
    pub category: Option<String>,
    /// Comma-separated technologies used.
    pub technologies: Option<String>,
    /// Link to the live project.
    pub project_url: Option<String>,
    /// Free-form duration.
    pub duration: Option<String>,
    /// The owner's role on the project.
    pub role: Option<String>,
}

impl NewProject {
    /// Create a project with only the required columns set.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_filename: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_filename: image_filename.into(),
            ..Self::default()
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the technologies.
    #[must_use]
    pub fn with_technologies(mut self, technologies: impl Into<String>) -> Self {
        self.technologies = Some(technologies.into());
        self
    }

    /// Set the project URL.
    #[must_use]
    pub fn with_project_url(mut self, project_url: impl Into<String>) -> Self {
        self.project_url = Some(project_url.into());
        self
    }

    /// Set the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// A partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New image file name.
    pub image_filename: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New technologies.
    pub technologies: Option<String>,
    /// New project URL.
    pub project_url: Option<String>,
    /// New duration.
    pub duration: Option<String>,
    /// New role.
    pub role: Option<String>,
}

impl ProjectUpdate {
    /// Columns to set, paired with their new values, in table order.
    #[must_use]
    pub fn assignments(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("image_filename", &self.image_filename),
            ("category", &self.category),
            ("technologies", &self.technologies),
            ("project_url", &self.project_url),
            ("duration", &self.duration),
            ("role", &self.role),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect()
    }

    /// True when no column would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }
}
