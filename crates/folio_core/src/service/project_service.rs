//! Project persistence endpoint service.
//!
//! # Responsibility
//! - Provide the list/create/replace/remove contract over a whole-collection
//!   repository.
//! - Assign ids at creation time.
//! - Serialize every read-modify-write cycle against the same resource.
//!
//! # Invariants
//! - `replace` never changes `id`; every other field becomes the draft.
//! - `replace`/`remove` on an unknown id leave storage untouched.
//! - New records are appended at the end of the collection.
//! - No two operations on one service interleave their read and write.

use crate::model::project::{Project, ProjectDraft, ProjectId, ProjectValidationError};
use crate::repo::project_repo::{ProjectRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ProjectServiceError>;

/// Error surfaced by project persistence operations.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Required field missing or blank.
    Validation(ProjectValidationError),
    /// Request could not be understood (bad JSON, missing id parameter).
    InvalidInput(String),
    /// Target project does not exist.
    NotFound(ProjectId),
    /// Backing storage failed.
    Storage(RepoError),
    /// A remote backend failed or answered with an unexpected response.
    Remote(String),
}

impl ProjectServiceError {
    /// Whether the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidInput(_) | Self::NotFound(_)
        )
    }
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Remote(message) => write!(f, "remote backend error: {message}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectValidationError> for ProjectServiceError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Persistence endpoint over one project collection.
///
/// Each operation holds the service gate for its full read-modify-write, so
/// concurrent callers sharing one service never lose each other's updates.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
    gate: Mutex<()>,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            gate: Mutex::new(()),
        }
    }

    /// Returns the full ordered collection, seeding storage when needed.
    pub fn list(&self) -> ServiceResult<Vec<Project>> {
        let _guard = self.acquire();
        Ok(self.repo.load_all()?)
    }

    /// Appends a new project with a fresh id and returns it.
    ///
    /// # Errors
    /// - `Validation` when a required field is blank.
    /// - `Storage` when the collection cannot be read or written.
    pub fn create(&self, draft: ProjectDraft) -> ServiceResult<Project> {
        draft.validate()?;

        let _guard = self.acquire();
        let mut projects = self.repo.load_all()?;
        let id = next_id(&projects);
        let project = draft.into_project(id);
        projects.push(project.clone());
        self.repo.save_all(&projects)?;

        info!(
            "event=project_create module=service status=ok id={} count={}",
            project.id,
            projects.len()
        );
        Ok(project)
    }

    /// Overwrites every field of `id` except the id itself.
    ///
    /// # Errors
    /// - `Validation` when a required field is blank.
    /// - `NotFound` when no record has `id`; storage is not written.
    /// - `Storage` when the collection cannot be read or written.
    pub fn replace(&self, id: &str, draft: ProjectDraft) -> ServiceResult<Project> {
        draft.validate()?;

        let _guard = self.acquire();
        let mut projects = self.repo.load_all()?;
        let Some(slot) = projects.iter_mut().find(|project| project.id == id) else {
            warn!(
                "event=project_replace module=service status=not_found id={}",
                id
            );
            return Err(ProjectServiceError::NotFound(id.to_string()));
        };
        slot.apply(draft);
        let updated = slot.clone();
        self.repo.save_all(&projects)?;

        info!(
            "event=project_replace module=service status=ok id={}",
            updated.id
        );
        Ok(updated)
    }

    /// Removes the record with `id`.
    ///
    /// # Errors
    /// - `NotFound` when no record has `id`; storage is not written.
    /// - `Storage` when the collection cannot be read or written.
    pub fn remove(&self, id: &str) -> ServiceResult<()> {
        let _guard = self.acquire();
        let projects = self.repo.load_all()?;
        let before = projects.len();
        let remaining: Vec<Project> = projects
            .into_iter()
            .filter(|project| project.id != id)
            .collect();

        if remaining.len() == before {
            warn!(
                "event=project_remove module=service status=not_found id={}",
                id
            );
            return Err(ProjectServiceError::NotFound(id.to_string()));
        }

        self.repo.save_all(&remaining)?;
        info!(
            "event=project_remove module=service status=ok id={} count={}",
            id,
            remaining.len()
        );
        Ok(())
    }

    fn acquire(&self) -> MutexGuard<'_, ()> {
        // Poison is ignored: every operation re-reads the repository.
        self.gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn next_id(existing: &[Project]) -> ProjectId {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if existing.iter().all(|project| project.id != candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{next_id, ProjectService, ProjectServiceError};
    use crate::model::project::ProjectDraft;
    use crate::model::seed::default_projects;
    use crate::repo::project_repo::MemoryProjectRepository;

    #[test]
    fn next_id_avoids_existing_ids() {
        let seeds = default_projects();
        let id = next_id(&seeds);
        assert!(!id.is_empty());
        assert!(seeds.iter().all(|project| project.id != id));
    }

    #[test]
    fn create_rejects_blank_title_without_touching_storage() {
        let repo = MemoryProjectRepository::with_projects(Vec::new());
        let service = ProjectService::new(&repo);

        let err = service
            .create(ProjectDraft::new("", "description"))
            .expect_err("blank title must be rejected");
        assert!(matches!(err, ProjectServiceError::Validation(_)));
        assert!(err.is_client_error());
        assert_eq!(repo.snapshot(), Some(Vec::new()));
    }

    #[test]
    fn storage_failure_is_not_a_client_error() {
        let repo = MemoryProjectRepository::with_projects(Vec::new());
        repo.set_fail_writes(true);
        let service = ProjectService::new(&repo);

        let err = service
            .create(ProjectDraft::new("A", "d"))
            .expect_err("write failure must surface");
        assert!(matches!(err, ProjectServiceError::Storage(_)));
        assert!(!err.is_client_error());
    }
}
