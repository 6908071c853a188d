//! Admin command line for the Folio project catalog.
//!
//! # Responsibility
//! - Parse admin commands and apply them through a `ProjectStore`.
//! - Run against a local data file or a remote folio server.
//!
//! # Invariants
//! - Every mutation goes through the store so memory mirrors the backend.
//! - Failures are reported on stderr with a non-zero exit code.

pub mod http_backend;
pub mod render;

use clap::{Args, Parser, Subcommand};
use folio_core::{
    core_version, parse_technologies, JsonFileProjectRepository, ProjectBackend, ProjectDraft,
    ProjectService, ProjectServiceError, ProjectStore,
};
use http_backend::HttpProjectBackend;
use std::io::Write;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data/projects.json";

#[derive(Debug, Parser)]
#[command(name = "folio", about = "Manage portfolio projects", version)]
pub struct Cli {
    /// JSON data file used when no server is given.
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,
    /// Base URL of a running folio server, e.g. http://127.0.0.1:3000.
    #[arg(long, global = true)]
    pub server: Option<String>,
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    /// Absolute directory for log files; logging is off when unset.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all projects.
    List,
    /// Show one project in full.
    Show { id: String },
    /// Add a project.
    Add(AddArgs),
    /// Replace a project's fields; unspecified fields keep their values.
    Update(UpdateArgs),
    /// Delete a project.
    Remove { id: String },
    /// Print the core version.
    Version,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub link: Option<String>,
    /// Comma-separated technologies, in display order.
    #[arg(long)]
    pub tech: Option<String>,
    /// Year label; defaults to the current year.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// New link; an empty value clears it.
    #[arg(long)]
    pub link: Option<String>,
    /// Comma-separated technologies; an empty value clears them.
    #[arg(long)]
    pub tech: Option<String>,
    /// New year label; an empty value clears it.
    #[arg(long)]
    pub date: Option<String>,
}

impl AddArgs {
    fn into_draft(self) -> ProjectDraft {
        let mut draft = ProjectDraft::blank();
        draft.title = self.title;
        draft.description = self.description;
        draft.link = non_empty(self.link);
        draft.technologies = self
            .tech
            .as_deref()
            .map(parse_technologies)
            .unwrap_or_default();
        if let Some(date) = self.date {
            draft.date = non_empty(Some(date));
        }
        draft
    }
}

impl UpdateArgs {
    fn apply_to(self, mut draft: ProjectDraft) -> ProjectDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(link) = self.link {
            draft.link = non_empty(Some(link));
        }
        if let Some(tech) = self.tech {
            draft.technologies = parse_technologies(&tech);
        }
        if let Some(date) = self.date {
            draft.date = non_empty(Some(date));
        }
        draft
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Executes `cli` and returns the process exit code.
pub fn run(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> i32 {
    if let Some(log_dir) = &cli.log_dir {
        if let Err(error) = folio_core::init_logging(&cli.log_level, log_dir) {
            let _ = writeln!(err, "error: {error}");
            return 2;
        }
    }

    let result = match cli.server.as_deref() {
        Some(url) => execute(
            ProjectStore::open(HttpProjectBackend::new(url)),
            cli.command,
        ),
        None => execute(
            ProjectStore::open(ProjectService::new(JsonFileProjectRepository::new(
                cli.data_file,
            ))),
            cli.command,
        ),
    };

    let text = match result {
        Ok(text) => text,
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            return 1;
        }
    };
    if let Err(error) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        let _ = writeln!(err, "error: failed to write output: {error}");
        return 1;
    }
    0
}

/// Applies one command to a loaded store and returns the text to print.
pub fn execute<B: ProjectBackend>(
    mut store: ProjectStore<B>,
    command: Command,
) -> Result<String, ProjectServiceError> {
    let text = match command {
        Command::List => render::render_listing(store.projects()),
        Command::Show { id } => match store.get(&id) {
            Some(project) => render::render_detail(project),
            None => return Err(ProjectServiceError::NotFound(id)),
        },
        Command::Add(args) => {
            let project = store.add(args.into_draft())?;
            format!("added {}\n", project.id)
        }
        Command::Update(args) => {
            let Some(current) = store.get(&args.id) else {
                return Err(ProjectServiceError::NotFound(args.id));
            };
            let id = current.id.clone();
            let draft = args.apply_to(current.to_draft());
            let project = store.update(&id, draft)?;
            format!("updated {}\n", project.id)
        }
        Command::Remove { id } => {
            store.remove(&id)?;
            format!("removed {id}\n")
        }
        Command::Version => format!("folio {}\n", core_version()),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::{AddArgs, Cli, UpdateArgs};
    use clap::CommandFactory;
    use folio_core::ProjectDraft;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_args_parse_technologies_and_default_year() {
        let draft = AddArgs {
            title: "T".to_string(),
            description: "D".to_string(),
            link: Some(" ".to_string()),
            tech: Some("Rust, axum,".to_string()),
            date: None,
        }
        .into_draft();
        assert_eq!(draft.technologies, vec!["Rust", "axum"]);
        assert_eq!(draft.link, None);
        assert!(draft.date.is_some());
    }

    #[test]
    fn update_args_keep_unspecified_and_clear_empty() {
        let mut current = ProjectDraft::new("T", "D");
        current.link = Some("https://x".to_string());
        current.technologies = vec!["a".to_string()];
        current.date = Some("2020".to_string());

        let draft = UpdateArgs {
            id: "1".to_string(),
            title: Some("New".to_string()),
            description: None,
            link: Some(String::new()),
            tech: None,
            date: Some("2021".to_string()),
        }
        .apply_to(current);

        assert_eq!(draft.title, "New");
        assert_eq!(draft.description, "D");
        assert_eq!(draft.link, None);
        assert_eq!(draft.technologies, vec!["a"]);
        assert_eq!(draft.date.as_deref(), Some("2021"));
    }
}
