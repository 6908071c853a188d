#![forbid(unsafe_code)]
//! HTTP resource API for the Folio project catalog.
//!
//! # Responsibility
//! - Expose list/create/replace/delete over `/api/projects`.
//! - Translate service errors into the JSON error contract.
//!
//! # Invariants
//! - Every storage touch runs on the blocking pool.
//! - One `ProjectService` (and therefore one lock) per data file.

mod config;
mod http;

pub use config::{ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_DATA_FILE, DEFAULT_MAX_BODY_BYTES};

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use folio_core::{JsonFileProjectRepository, ProjectService};
use std::path::PathBuf;
use std::sync::Arc;

pub const PROJECTS_PATH: &str = "/api/projects";

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProjectService<JsonFileProjectRepository>>,
    pub max_body_bytes: usize,
}

impl AppState {
    #[must_use]
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            service: Arc::new(ProjectService::new(JsonFileProjectRepository::new(
                data_file,
            ))),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            max_body_bytes: config.max_body_bytes,
            ..Self::new(config.data_file.clone())
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route(
            PROJECTS_PATH,
            get(http::handlers::list_projects_handler)
                .post(http::handlers::create_project_handler)
                .put(http::handlers::replace_project_handler)
                .delete(http::handlers::delete_project_handler),
        )
        .layer(from_fn(http::request_log::request_log_middleware))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}
