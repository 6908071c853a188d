//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical portfolio record and its editable draft shape.
//! - Enforce required-field rules before anything reaches storage.
//! - Provide the display helpers listing consumers share.
//!
//! # Invariants
//! - `id` is assigned once by persistence and never rewritten.
//! - `technologies` order is preserved exactly as entered.
//! - `title` and `description` are never blank on a validated record.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the persistence layer.
pub type ProjectId = String;

/// Number of technology badges shown before collapsing the rest into `+N`.
pub const VISIBLE_TECHNOLOGIES: usize = 3;

/// Validation error for project fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// A required text field is empty or whitespace only.
    MissingField(&'static str),
    /// The record id is empty.
    EmptyId,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::EmptyId => write!(f, "project id cannot be empty"),
        }
    }
}

impl Error for ProjectValidationError {}

/// Editable project fields: everything except the id.
///
/// Used as the request body for create and as the full replacement set for
/// update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Freeform year label, e.g. `"2024"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ProjectDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Empty form state with `date` preset to the current local year.
    pub fn blank() -> Self {
        Self {
            date: Some(chrono::Local::now().year().to_string()),
            ..Self::default()
        }
    }

    /// Checks required fields.
    ///
    /// # Errors
    /// - `MissingField("title")` when the title is blank.
    /// - `MissingField("description")` when the description is blank.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(ProjectValidationError::MissingField("description"));
        }
        Ok(())
    }

    /// Binds this draft to an id, producing a full record.
    pub fn into_project(self, id: impl Into<ProjectId>) -> Project {
        Project {
            id: id.into(),
            title: self.title,
            description: self.description,
            link: self.link,
            technologies: self.technologies,
            date: self.date,
        }
    }
}

/// Canonical portfolio record as persisted and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Project {
    /// Validates the id and the editable fields.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.id.trim().is_empty() {
            return Err(ProjectValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(ProjectValidationError::MissingField("description"));
        }
        Ok(())
    }

    /// Overwrites every field except `id`.
    pub fn apply(&mut self, draft: ProjectDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.link = draft.link;
        self.technologies = draft.technologies;
        self.date = draft.date;
    }

    /// Returns the editable fields as a draft (used to prefill edit forms).
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            link: self.link.clone(),
            technologies: self.technologies.clone(),
            date: self.date.clone(),
        }
    }

    /// Splits technologies into the visible prefix and the hidden count.
    pub fn badges(&self, limit: usize) -> (&[String], usize) {
        let shown = self.technologies.len().min(limit);
        (
            &self.technologies[..shown],
            self.technologies.len() - shown,
        )
    }
}

/// Parses comma-separated technology input into an ordered list.
///
/// Items are trimmed and blank items dropped; duplicates are kept.
pub fn parse_technologies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_technologies, Project, ProjectDraft, ProjectValidationError};

    fn project_with_techs(techs: &[&str]) -> Project {
        let mut draft = ProjectDraft::new("t", "d");
        draft.technologies = techs.iter().map(|t| t.to_string()).collect();
        draft.into_project("1")
    }

    #[test]
    fn parse_technologies_trims_and_drops_blanks() {
        assert_eq!(
            parse_technologies(" Rust, ,axum ,  serde,"),
            vec!["Rust", "axum", "serde"]
        );
        assert!(parse_technologies("  ").is_empty());
    }

    #[test]
    fn badges_collapse_overflow() {
        let project = project_with_techs(&["a", "b", "c", "d", "e"]);
        let (shown, hidden) = project.badges(3);
        assert_eq!(shown, ["a", "b", "c"]);
        assert_eq!(hidden, 2);

        let short = project_with_techs(&["a"]);
        let (shown, hidden) = short.badges(3);
        assert_eq!(shown, ["a"]);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        assert_eq!(
            ProjectDraft::new("  ", "d").validate(),
            Err(ProjectValidationError::MissingField("title"))
        );
        assert_eq!(
            ProjectDraft::new("t", "").validate(),
            Err(ProjectValidationError::MissingField("description"))
        );
        assert!(ProjectDraft::new("t", "d").validate().is_ok());
    }

    #[test]
    fn blank_draft_presets_year() {
        let draft = ProjectDraft::blank();
        let year = draft.date.expect("blank draft should preset a year");
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }
}
