//! Core domain logic for the Folio portfolio catalog.
//! This crate is the single source of truth for project invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{init_logging, init_stderr_logging, logging_status, LogLevel, LoggingError};
pub use model::project::{
    parse_technologies, Project, ProjectDraft, ProjectId, ProjectValidationError,
    VISIBLE_TECHNOLOGIES,
};
pub use model::seed::default_projects;
pub use repo::project_repo::{
    JsonFileProjectRepository, MemoryProjectRepository, ProjectRepository, RepoError, RepoResult,
};
pub use service::project_service::{ProjectService, ProjectServiceError, ServiceResult};
pub use store::project_store::{ProjectBackend, ProjectStore, StoreState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
