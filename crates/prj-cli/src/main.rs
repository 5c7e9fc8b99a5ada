//! prj CLI - track project directories from the shell

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use prj_core::config::Config;
use prj_core::lifecycle::ChangeSet;
use prj_core::record::Status;
use prj_core::store::{ProjectRepository, project_name};

mod render;

#[derive(Parser)]
#[command(name = "prj")]
#[command(author, version, about = "Track project directories with sidecar metadata records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project directory with its record
    New {
        /// Project name or path
        project: String,
        /// Initial status: p (proposed), a (active), i (inactive), c (complete)
        #[arg(short, long, value_name = "STATUS")]
        status: Option<String>,
        /// Project description
        #[arg(short, long, value_name = "DESC")]
        description: Option<String>,
        /// Colour tag for external schedulers
        #[arg(short, long, value_name = "COLOUR")]
        colour: Option<String>,
    },

    /// Show a project's current status
    Stat {
        /// Project name or path
        project: String,
    },

    /// List all tracked projects, or show one in detail
    List {
        /// Project name or path (omit to list everything)
        project: Option<String>,
    },

    /// Update a project's record
    Update {
        /// Project name or path
        project: String,
        /// New status: p (proposed), a (active), i (inactive), c (complete)
        #[arg(short, long, value_name = "STATUS")]
        status: Option<String>,
        /// New project description
        #[arg(short, long, value_name = "DESC")]
        description: Option<String>,
        /// New colour tag
        #[arg(short, long, value_name = "COLOUR")]
        colour: Option<String>,
    },

    /// Delete a project directory and everything in it
    Delete {
        /// Project name or path
        project: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

fn main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<prj_core::Error>() {
                Some(core_err) => ExitCode::from(core_err.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prj_core=warn".parse()?),
        )
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::New {
            project,
            status,
            description,
            colour,
        } => {
            let repo = repository()?;
            let path = resolve_project(&project)?;
            cmd_new(
                &repo,
                &path,
                build_changes(status, description, colour)?,
                cli.format,
                cli.quiet,
            )
        }

        Commands::Stat { project } => {
            let repo = repository()?;
            let path = resolve_project(&project)?;
            cmd_stat(&repo, &path, cli.format)
        }

        Commands::List { project } => {
            let repo = repository()?;
            cmd_list(&repo, project.as_deref(), cli.format, cli.quiet)
        }

        Commands::Update {
            project,
            status,
            description,
            colour,
        } => {
            let repo = repository()?;
            let path = resolve_project(&project)?;
            cmd_update(
                &repo,
                &path,
                build_changes(status, description, colour)?,
                cli.format,
                cli.quiet,
            )
        }

        Commands::Delete { project, yes } => {
            let repo = repository()?;
            let path = resolve_project(&project)?;
            cmd_delete(&repo, &path, yes, cli.quiet)
        }

        Commands::Config { action } => cmd_config(action, cli.quiet),
    }
}

/// Build the repository from the persisted configuration and today's date
fn repository() -> anyhow::Result<ProjectRepository> {
    let config = Config::load()?;
    Ok(ProjectRepository::new(
        config.defaults,
        chrono::Local::now().date_naive(),
    ))
}

/// Resolve a user-supplied project argument to a path
///
/// Trailing slashes left behind by shell completion are stripped; the
/// remainder must still name a directory entry.
fn resolve_project(arg: &str) -> anyhow::Result<PathBuf> {
    let trimmed = arg.trim_end_matches('/');
    let path = PathBuf::from(trimmed);
    if trimmed.is_empty() || path.file_name().is_none() {
        anyhow::bail!("'{}' is not a usable project path", arg);
    }
    tracing::debug!(path = %path.display(), "Resolved project path");
    Ok(path)
}

/// Map the shared mutation flags to a change set
fn build_changes(
    status: Option<String>,
    description: Option<String>,
    colour: Option<String>,
) -> prj_core::Result<ChangeSet> {
    let status = status.as_deref().map(Status::from_code).transpose()?;
    Ok(ChangeSet {
        description,
        status,
        colour,
    })
}

// ============================================================================
// Command Implementations
// ============================================================================

fn cmd_new(
    repo: &ProjectRepository,
    path: &Path,
    changes: ChangeSet,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    if !quiet && matches!(format, OutputFormat::Text) {
        println!("Creating project '{}'...", project_name(path));
    }

    let record = repo.create(path, &changes)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    Ok(())
}

fn cmd_stat(repo: &ProjectRepository, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let record = repo
        .read(path)
        .ok_or_else(|| prj_core::Error::NotFound(project_name(path)))?;

    match format {
        OutputFormat::Text => println!("{}", render::status_line(&record)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
    }

    Ok(())
}

fn cmd_list(
    repo: &ProjectRepository,
    project: Option<&str>,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match project {
        Some(arg) => {
            let path = resolve_project(arg)?;
            let record = repo
                .read(&path)
                .ok_or_else(|| prj_core::Error::NotFound(project_name(&path)))?;

            match format {
                OutputFormat::Text => println!("{}", render::long_form(&record)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
            }
        }
        None => {
            let root = std::env::current_dir()?;
            let list = repo.list(&root);
            let mut records: Vec<_> = list.iter().collect();
            records.sort_by(|a, b| a.name.cmp(&b.name));

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Text => {
                    if !quiet {
                        println!("All tracked projects in {}:", root.display());
                    }
                    for record in &records {
                        println!("{}", render::short_form(record));
                    }
                }
            }
        }
    }

    Ok(())
}

fn cmd_update(
    repo: &ProjectRepository,
    path: &Path,
    changes: ChangeSet,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let record = repo.update(path, &changes)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => {
            if !quiet {
                println!("Project '{}' updated.", record.name);
            }
        }
    }

    Ok(())
}

fn cmd_delete(
    repo: &ProjectRepository,
    path: &Path,
    yes: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    if !yes && !confirm_delete(&project_name(path))? {
        return Ok(());
    }

    repo.delete(path)?;

    if !quiet {
        let full_path = std::env::current_dir()?.join(path);
        println!("Deleting '{}'...", full_path.display());
    }

    Ok(())
}

/// Ask on stdin before removing anything; the default answer is no
fn confirm_delete(name: &str) -> anyhow::Result<bool> {
    print!(
        "Are you sure you want to delete '{}' and all of its associated files? (y/N) ",
        name
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
