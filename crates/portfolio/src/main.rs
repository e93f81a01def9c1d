//! `portfolio` - CLI for the portfolio site
//!
//! This binary runs the web server and manages the projects database.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use portfolio::cli::{
    exit_status, Cli, Command, ConfigCommand, OutputFormat, ProjectsCommand, ServeCommand,
};
use portfolio::{init_logging, Config, Error, Project, ProjectStore};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(config, &serve_cmd),
        Command::Seed => handle_seed(&config),
        Command::Projects(projects_cmd) => handle_projects(&config, projects_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<ProjectStore> {
    let path = config.database_path();
    ProjectStore::open(&path)
        .with_context(|| format!("failed to open project database at {}", path.display()))
}

fn handle_serve(mut config: Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    cmd.apply(&mut config);
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(portfolio::serve(&config))?;
    Ok(())
}

fn handle_seed(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let inserted = store.seed_sample_data()?;
    println!(
        "Inserted {inserted} sample projects into {}",
        store.path().display()
    );
    Ok(())
}

fn handle_projects(config: &Config, cmd: ProjectsCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    match cmd {
        ProjectsCommand::List { format } => {
            let projects = store.get_all_projects()?;
            print_projects(&projects, format)?;
        }
        ProjectsCommand::Show { id, json } => {
            let project = store
                .get_project_by_id(id)?
                .ok_or(Error::ProjectNotFound { id })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                print_project(&project);
            }
        }
        ProjectsCommand::Add(add_cmd) => {
            let id = store.add_project(&add_cmd.to_new_project())?;
            println!("Added project {id}: {}", add_cmd.title);
        }
        ProjectsCommand::Update(update_cmd) => {
            let update = update_cmd.to_update();
            if update.is_empty() {
                println!("Nothing to update.");
            } else if store.update_project(update_cmd.id, &update)? {
                println!("Updated project {}", update_cmd.id);
            } else {
                return Err(Error::ProjectNotFound { id: update_cmd.id }.into());
            }
        }
        ProjectsCommand::Delete { id } => {
            if !store.delete_project(id)? {
                return Err(Error::ProjectNotFound { id }.into());
            }
            println!("Deleted project {id}");
        }
    }
    Ok(())
}

fn print_projects(projects: &[Project], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(projects)?),
        OutputFormat::Plain => {
            for project in projects {
                println!("{}\t{}", project.id, project.title);
            }
        }
        OutputFormat::Table => {
            if projects.is_empty() {
                println!("No projects.");
                return Ok(());
            }
            println!("{:>4}  {:<19}  {:<20}  TITLE", "ID", "CREATED", "CATEGORY");
            for project in projects {
                println!(
                    "{:>4}  {:<19}  {:<20}  {}",
                    project.id,
                    project.created_date.format(portfolio::project::TIMESTAMP_FORMAT),
                    project.category.as_deref().unwrap_or("-"),
                    project.title
                );
            }
        }
    }
    Ok(())
}

fn print_project(project: &Project) {
    println!("Project {}", project.id);
    println!("==========");
    println!("Title:        {}", project.title);
    println!("Description:  {}", project.description);
    println!("Image:        {}", project.image_filename);
    let optional = [
        ("Category", &project.category),
        ("Technologies", &project.technologies),
        ("URL", &project.project_url),
        ("Duration", &project.duration),
        ("Role", &project.role),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            println!("{:<14}{value}", format!("{label}:"));
        }
    }
    println!(
        "Created:      {}",
        project.created_date.format(portfolio::project::TIMESTAMP_FORMAT)
    );
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                let mut shown = config.clone();
                shown.site.secret_key = "<redacted>".to_string();
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Seed if empty:      {}", config.storage.seed_if_empty);
                println!();
                println!("[Site]");
                println!("  Owner:              {}", config.site.owner_name);
                println!("  Tagline:            {}", config.site.tagline);
                println!("  Static dir:         {}", config.site.static_dir.display());
                println!(
                    "  Secret key:         {}",
                    if config.site.uses_default_secret() {
                        "default (change before deploying)"
                    } else {
                        "custom"
                    }
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
