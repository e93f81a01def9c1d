//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::config::Config;
use crate::project::{NewProject, ProjectUpdate};

/// Serve command arguments.
#[derive(Debug, Default, Args)]
pub struct ServeCommand {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Seed sample projects if the database is empty
    #[arg(long)]
    pub seed: bool,
}

impl ServeCommand {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.seed {
            config.storage.seed_if_empty = true;
        }
    }
}

/// Project management commands.
#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List all projects, newest first
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show a single project
    Show {
        /// Project id
        id: i64,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add a project
    Add(AddProjectCommand),

    /// Update fields of an existing project
    Update(UpdateProjectCommand),

    /// Delete a project
    Delete {
        /// Project id
        id: i64,
    },
}

/// Optional project fields shared by `add` and `update`.
#[derive(Debug, Default, Args)]
pub struct ProjectFields {
    /// Category (e.g. "UI/UX Design")
    #[arg(long)]
    pub category: Option<String>,

    /// Comma-separated technologies
    #[arg(long)]
    pub technologies: Option<String>,

    /// Live project URL
    #[arg(long = "url")]
    pub project_url: Option<String>,

    /// Duration (e.g. "3 months")
    #[arg(long)]
    pub duration: Option<String>,

    /// Your role on the project
    #[arg(long)]
    pub role: Option<String>,
}

/// `projects add` arguments.
#[derive(Debug, Args)]
pub struct AddProjectCommand {
    /// Project title
    #[arg(short, long)]
    pub title: String,

    /// Project description
    #[arg(short, long)]
    pub description: String,

    /// Image file name under `static/images`
    #[arg(short, long)]
    pub image: String,

    #[command(flatten)]
    #[allow(missing_docs)]
    pub fields: ProjectFields,
}

impl AddProjectCommand {
    /// Build the project to insert.
    #[must_use]
    pub fn to_new_project(&self) -> NewProject {
        NewProject {
            title: self.title.clone(),
            description: self.description.clone(),
            image_filename: self.image.clone(),
            category: self.fields.category.clone(),
            technologies: self.fields.technologies.clone(),
            project_url: self.fields.project_url.clone(),
            duration: self.fields.duration.clone(),
            role: self.fields.role.clone(),
        }
    }
}

/// `projects update` arguments.
#[derive(Debug, Args)]
pub struct UpdateProjectCommand {
    /// Project id
    pub id: i64,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New image file name
    #[arg(short, long)]
    pub image: Option<String>,

    #[command(flatten)]
    #[allow(missing_docs)]
    pub fields: ProjectFields,
}

impl UpdateProjectCommand {
    /// Collect the fields that were given on the command line.
    #[must_use]
    pub fn to_update(&self) -> ProjectUpdate {
        ProjectUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            image_filename: self.image.clone(),
            category: self.fields.category.clone(),
            technologies: self.fields.technologies.clone(),
            project_url: self.fields.project_url.clone(),
            duration: self.fields.duration.clone(),
            role: self.fields.role.clone(),
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per project
    #[default]
    Plain,
    /// Aligned columns
    Table,
    /// JSON output
    Json,
}
