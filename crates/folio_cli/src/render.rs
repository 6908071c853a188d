//! Plain-text rendering of projects for terminal output.

use folio_core::{Project, VISIBLE_TECHNOLOGIES};
use std::fmt::Write;

/// One block per project: header, description, badges, link.
pub fn render_listing(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet.\n".to_string();
    }
    projects
        .iter()
        .map(render_summary)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Listing block; technologies collapse after the first few.
pub fn render_summary(project: &Project) -> String {
    let mut out = header(project);
    let _ = writeln!(out, "  {}", project.description);
    let (shown, hidden) = project.badges(VISIBLE_TECHNOLOGIES);
    if !shown.is_empty() {
        let mut badges = shown
            .iter()
            .map(|tech| format!("[{tech}]"))
            .collect::<Vec<_>>()
            .join(" ");
        if hidden > 0 {
            let _ = write!(badges, " +{hidden}");
        }
        let _ = writeln!(out, "  {badges}");
    }
    if let Some(link) = &project.link {
        let _ = writeln!(out, "  {link}");
    }
    out
}

/// Full record with every technology listed.
pub fn render_detail(project: &Project) -> String {
    let mut out = header(project);
    let _ = writeln!(out, "  description:  {}", project.description);
    let _ = writeln!(
        out,
        "  technologies: {}",
        if project.technologies.is_empty() {
            "-".to_string()
        } else {
            project.technologies.join(", ")
        }
    );
    let _ = writeln!(out, "  link:         {}", project.link.as_deref().unwrap_or("-"));
    out
}

fn header(project: &Project) -> String {
    match &project.date {
        Some(date) => format!("{}  {} ({date})\n", project.id, project.title),
        None => format!("{}  {}\n", project.id, project.title),
    }
}
