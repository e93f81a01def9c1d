//! `portfolio` - A personal portfolio website
//!
//! This library provides the web front end (static pages, project gallery,
//! contact form) and the SQLite-backed project store behind it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod repository;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use project::{NewProject, Project, ProjectUpdate};
pub use repository::{ProjectRepository, SqliteRepository};
pub use storage::ProjectStore;
pub use web::{router, serve, AppState};
