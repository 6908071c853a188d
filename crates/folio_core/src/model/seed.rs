//! Default seed collection.
//!
//! Written to storage whenever the backing file is missing or unreadable as
//! JSON, and used by stores whose first load fails.

use crate::model::project::{Project, ProjectDraft};

/// Returns the hard-coded default project collection.
///
/// Ids are fixed so a seeded file is byte-stable across runs.
pub fn default_projects() -> Vec<Project> {
    vec![
        seed(
            "1",
            "Portfolio Website",
            "Personal portfolio with an admin panel for managing showcased projects.",
            Some("https://github.com/"),
            &["Rust", "axum", "serde", "JSON"],
            "2024",
        ),
        seed(
            "2",
            "Task Tracker",
            "A small command line tool for tracking daily tasks with local storage.",
            None,
            &["Rust", "clap"],
            "2023",
        ),
        seed(
            "3",
            "Weather Dashboard",
            "Dashboard that aggregates forecasts from public weather APIs.",
            Some("https://example.com/weather"),
            &["TypeScript", "React", "REST"],
            "2022",
        ),
    ]
}

fn seed(
    id: &str,
    title: &str,
    description: &str,
    link: Option<&str>,
    technologies: &[&str],
    date: &str,
) -> Project {
    ProjectDraft {
        title: title.to_string(),
        description: description.to_string(),
        link: link.map(str::to_string),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        date: Some(date.to_string()),
    }
    .into_project(id)
}
