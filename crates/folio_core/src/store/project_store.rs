//! Client-side project store.
//!
//! # Responsibility
//! - Hold the in-memory project list a consumer renders from.
//! - Mirror backend results into memory after each confirmed mutation.
//!
//! # Invariants
//! - State only moves `Uninitialized -> Loading -> Ready`.
//! - A failed load ends in `Ready` with the seed collection.
//! - Failed mutations leave in-memory state untouched and are returned.

use crate::model::project::{Project, ProjectDraft};
use crate::model::seed::default_projects;
use crate::repo::project_repo::ProjectRepository;
use crate::service::project_service::{ProjectService, ServiceResult};
use log::{error, info};

/// Source of truth a store synchronizes with.
pub trait ProjectBackend {
    fn list(&self) -> ServiceResult<Vec<Project>>;
    fn create(&self, draft: ProjectDraft) -> ServiceResult<Project>;
    fn replace(&self, id: &str, draft: ProjectDraft) -> ServiceResult<Project>;
    fn remove(&self, id: &str) -> ServiceResult<()>;
}

impl<R: ProjectRepository> ProjectBackend for ProjectService<R> {
    fn list(&self) -> ServiceResult<Vec<Project>> {
        ProjectService::list(self)
    }

    fn create(&self, draft: ProjectDraft) -> ServiceResult<Project> {
        ProjectService::create(self, draft)
    }

    fn replace(&self, id: &str, draft: ProjectDraft) -> ServiceResult<Project> {
        ProjectService::replace(self, id, draft)
    }

    fn remove(&self, id: &str) -> ServiceResult<()> {
        ProjectService::remove(self, id)
    }
}

impl<B: ProjectBackend + ?Sized> ProjectBackend for &B {
    fn list(&self) -> ServiceResult<Vec<Project>> {
        (**self).list()
    }

    fn create(&self, draft: ProjectDraft) -> ServiceResult<Project> {
        (**self).create(draft)
    }

    fn replace(&self, id: &str, draft: ProjectDraft) -> ServiceResult<Project> {
        (**self).replace(id, draft)
    }

    fn remove(&self, id: &str) -> ServiceResult<()> {
        (**self).remove(id)
    }
}

/// Load lifecycle of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Loading,
    Ready,
}

/// In-memory project list synchronized with a backend.
pub struct ProjectStore<B: ProjectBackend> {
    backend: B,
    projects: Vec<Project>,
    state: StoreState,
}

impl<B: ProjectBackend> ProjectStore<B> {
    /// Creates an unloaded store. Call [`ProjectStore::load`] before use.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            projects: Vec::new(),
            state: StoreState::Uninitialized,
        }
    }

    /// Creates a store and performs the initial load.
    pub fn open(backend: B) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    /// Fetches the full collection once; later calls are no-ops.
    ///
    /// Backend failures are logged and replaced by the seed collection.
    pub fn load(&mut self) {
        if self.state != StoreState::Uninitialized {
            return;
        }
        self.state = StoreState::Loading;
        self.fetch();
        self.state = StoreState::Ready;
    }

    /// Re-fetches the collection from the backend.
    ///
    /// Same fallback rules as the initial load. Loads first if needed.
    pub fn refresh(&mut self) {
        if self.state == StoreState::Uninitialized {
            self.load();
            return;
        }
        self.fetch();
    }

    fn fetch(&mut self) {
        match self.backend.list() {
            Ok(projects) => {
                info!(
                    "event=store_load module=store status=ok count={}",
                    projects.len()
                );
                self.projects = projects;
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=fallback error={}",
                    err
                );
                self.projects = default_projects();
            }
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// True until the first load has completed.
    pub fn is_loading(&self) -> bool {
        self.state != StoreState::Ready
    }

    /// Current ordered collection.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Looks up a project by id in memory only.
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Creates through the backend and appends the canonical record.
    pub fn add(&mut self, draft: ProjectDraft) -> ServiceResult<&Project> {
        let created = self.backend.create(draft).inspect_err(|err| {
            error!("event=store_add module=store status=error error={}", err);
        })?;
        self.projects.push(created);
        let index = self.projects.len() - 1;
        Ok(&self.projects[index])
    }

    /// Replaces through the backend and mirrors the canonical record.
    ///
    /// If the record is not held in memory (stale view), it is appended.
    pub fn update(&mut self, id: &str, draft: ProjectDraft) -> ServiceResult<&Project> {
        let updated = self.backend.replace(id, draft).inspect_err(|err| {
            error!(
                "event=store_update module=store status=error id={} error={}",
                id, err
            );
        })?;
        let index = match self.projects.iter().position(|project| project.id == id) {
            Some(index) => {
                self.projects[index] = updated;
                index
            }
            None => {
                self.projects.push(updated);
                self.projects.len() - 1
            }
        };
        Ok(&self.projects[index])
    }

    /// Removes through the backend, then drops the in-memory record.
    pub fn remove(&mut self, id: &str) -> ServiceResult<()> {
        self.backend.remove(id).inspect_err(|err| {
            error!(
                "event=store_remove module=store status=error id={} error={}",
                id, err
            );
        })?;
        self.projects.retain(|project| project.id != id);
        Ok(())
    }
}
