use crate::http::response::{
    error_response, service_error_response, task_failure_response, Operation,
};
use crate::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::{JsonFileProjectRepository, ProjectDraft, ProjectService, ServiceResult};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// PUT body: a full project including its id.
#[derive(Debug, Deserialize)]
pub(crate) struct ReplaceProjectRequest {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    draft: ProjectDraft,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteProjectParams {
    #[serde(default)]
    id: Option<String>,
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub(crate) async fn list_projects_handler(State(state): State<AppState>) -> Response {
    let result = run_blocking(&state, |service| service.list()).await;
    respond(Operation::List, result, |projects| {
        (StatusCode::OK, Json(projects)).into_response()
    })
}

pub(crate) async fn create_project_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectDraft>, JsonRejection>,
) -> Response {
    let Json(draft) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(&rejection),
    };
    let result = run_blocking(&state, move |service| service.create(draft)).await;
    respond(Operation::Create, result, |project| {
        (StatusCode::CREATED, Json(project)).into_response()
    })
}

pub(crate) async fn replace_project_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReplaceProjectRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(&rejection),
    };
    let Some(id) = request.id.filter(|id| !id.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "ID field required");
    };
    let draft = request.draft;
    let result = run_blocking(&state, move |service| service.replace(&id, draft)).await;
    respond(Operation::Replace, result, |project| {
        (StatusCode::OK, Json(project)).into_response()
    })
}

pub(crate) async fn delete_project_handler(
    State(state): State<AppState>,
    params: Result<Query<DeleteProjectParams>, QueryRejection>,
) -> Response {
    let id = match params {
        Ok(Query(params)) => params.id.filter(|id| !id.is_empty()),
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };
    let Some(id) = id else {
        return error_response(StatusCode::BAD_REQUEST, "ID parameter required");
    };
    let result = run_blocking(&state, move |service| service.remove(&id)).await;
    respond(Operation::Remove, result, |()| {
        (StatusCode::OK, Json(json!({ "success": true }))).into_response()
    })
}

/// Runs a service call on the blocking pool; file I/O never blocks the
/// async workers.
async fn run_blocking<T, F>(
    state: &AppState,
    call: F,
) -> Result<ServiceResult<T>, tokio::task::JoinError>
where
    T: Send + 'static,
    F: FnOnce(&ProjectService<JsonFileProjectRepository>) -> ServiceResult<T> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || call(service.as_ref())).await
}

fn respond<T>(
    operation: Operation,
    result: Result<ServiceResult<T>, tokio::task::JoinError>,
    on_ok: impl FnOnce(T) -> Response,
) -> Response {
    match result {
        Ok(Ok(value)) => on_ok(value),
        Ok(Err(err)) => service_error_response(operation, err),
        Err(err) => task_failure_response(operation, err),
    }
}

/// Body rejections are 400s, except an over-limit body which stays 413.
fn invalid_body(rejection: &JsonRejection) -> Response {
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    error_response(
        status,
        &format!("Invalid request body: {}", rejection.body_text()),
    )
}
