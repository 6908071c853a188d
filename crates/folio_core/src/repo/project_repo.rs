//! Project collection repository contracts and JSON file implementation.
//!
//! # Responsibility
//! - Load and store the whole ordered project collection.
//! - Recover missing or unparseable storage by writing the seed collection.
//!
//! # Invariants
//! - Writes replace the whole file atomically (temp file + rename).
//! - Collection order on disk is exactly the order handed to `save_all`.
//! - Transport failures other than "file missing" are never masked by seeding.

use crate::model::project::Project;
use crate::model::seed::default_projects;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level error for project persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Backing medium could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Collection could not be encoded.
    Encode(serde_json::Error),
    /// Storage was intentionally unavailable (test doubles, read-only mounts).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage i/o failed at `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode projects: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Whole-collection persistence contract.
///
/// Implementations are not required to be internally synchronized; callers
/// that need read-modify-write atomicity serialize around them.
pub trait ProjectRepository {
    /// Returns the persisted collection, seeding storage when it is missing
    /// or unparseable.
    fn load_all(&self) -> RepoResult<Vec<Project>>;
    /// Replaces the persisted collection.
    fn save_all(&self, projects: &[Project]) -> RepoResult<()>;
}

impl<R: ProjectRepository + ?Sized> ProjectRepository for &R {
    fn load_all(&self) -> RepoResult<Vec<Project>> {
        (**self).load_all()
    }

    fn save_all(&self, projects: &[Project]) -> RepoResult<()> {
        (**self).save_all(projects)
    }
}

/// JSON-file-backed project repository.
///
/// The file holds a single pretty-printed JSON array of projects.
#[derive(Debug, Clone)]
pub struct JsonFileProjectRepository {
    path: PathBuf,
}

impl JsonFileProjectRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn ensure_parent_dir(&self) -> RepoResult<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir).map_err(
                |source| RepoError::Io {
                    path: dir.to_path_buf(),
                    source,
                },
            ),
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn seed(&self, reason: &str) -> RepoResult<Vec<Project>> {
        warn!(
            "event=projects_seed module=repo status=start reason={} path={}",
            reason,
            self.path.display()
        );
        let projects = default_projects();
        self.save_all(&projects)?;
        Ok(projects)
    }
}

impl ProjectRepository for JsonFileProjectRepository {
    fn load_all(&self) -> RepoResult<Vec<Project>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return self.seed("missing"),
            Err(err) => {
                error!(
                    "event=projects_load module=repo status=error path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match serde_json::from_str::<Vec<Project>>(&raw) {
            Ok(projects) => Ok(projects),
            Err(err) => {
                warn!(
                    "event=projects_load module=repo status=corrupt path={} error={}",
                    self.path.display(),
                    err
                );
                self.seed("corrupt")
            }
        }
    }

    fn save_all(&self, projects: &[Project]) -> RepoResult<()> {
        let started_at = Instant::now();
        let encoded = serde_json::to_string_pretty(projects)?;
        self.ensure_parent_dir()?;

        let temp_path = self.temp_path();
        let result = std::fs::write(&temp_path, encoded.as_bytes())
            .and_then(|()| std::fs::rename(&temp_path, &self.path));
        if let Err(err) = result {
            let _ = std::fs::remove_file(&temp_path);
            error!(
                "event=projects_save module=repo status=error path={} error={}",
                self.path.display(),
                err
            );
            return Err(self.io_error(err));
        }

        info!(
            "event=projects_save module=repo status=ok count={} duration_ms={}",
            projects.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// In-memory repository with switchable write failures.
///
/// Used by tests and by embedders that do not want a file on disk. A `None`
/// slot behaves like a missing file and seeds on first load.
#[derive(Debug, Default)]
pub struct MemoryProjectRepository {
    slot: Mutex<Option<Vec<Project>>>,
    fail_writes: AtomicBool,
}

impl MemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing collection instead of an empty slot.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            slot: Mutex::new(Some(projects)),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent `save_all` fail with `RepoError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the stored collection without seeding.
    pub fn snapshot(&self) -> Option<Vec<Project>> {
        lock(&self.slot).clone()
    }
}

impl ProjectRepository for MemoryProjectRepository {
    fn load_all(&self) -> RepoResult<Vec<Project>> {
        if let Some(projects) = lock(&self.slot).as_ref() {
            return Ok(projects.clone());
        }
        let projects = default_projects();
        self.save_all(&projects)?;
        Ok(projects)
    }

    fn save_all(&self, projects: &[Project]) -> RepoResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::Unavailable("writes disabled".to_string()));
        }
        *lock(&self.slot) = Some(projects.to_vec());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
