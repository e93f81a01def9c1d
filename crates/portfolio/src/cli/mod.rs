//! Command-line interface for the portfolio site.
//!
//! This module provides the CLI structure for the `portfolio` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Error;

pub use commands::{
    AddProjectCommand, ConfigCommand, OutputFormat, ProjectFields, ProjectsCommand, ServeCommand,
    UpdateProjectCommand,
};

/// portfolio - Personal portfolio website
///
/// Serves the portfolio pages, the project gallery and the contact form, and
/// manages the projects database from the command line.
#[derive(Debug, Parser)]
#[command(name = "portfolio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server
    Serve(ServeCommand),

    /// Insert the sample projects into the database
    Seed,

    /// Manage stored projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

/// Exit status when a command names a project id that does not exist.
pub const EXIT_NOT_FOUND: u8 = 2;

/// Map a failed command to the process exit status.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<Error>().is_some_and(Error::is_not_found) {
        EXIT_NOT_FOUND
    } else {
        1
    }
}
