use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::ProjectServiceError;
use log::error;
use serde_json::json;

/// Operation a failure belongs to; selects the 500 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    List,
    Create,
    Replace,
    Remove,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to read projects",
            Self::Create => "Failed to create project",
            Self::Replace => "Failed to update project",
            Self::Remove => "Failed to delete project",
        }
    }

    fn event(self) -> &'static str {
        match self {
            Self::List => "projects_list",
            Self::Create => "project_create",
            Self::Replace => "project_replace",
            Self::Remove => "project_remove",
        }
    }
}

#[must_use]
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[must_use]
pub(crate) fn service_error_status(err: &ProjectServiceError) -> StatusCode {
    match err {
        ProjectServiceError::Validation(_) | ProjectServiceError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        ProjectServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ProjectServiceError::Storage(_) | ProjectServiceError::Remote(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Maps a service failure to the JSON error contract.
///
/// Client errors echo the failure; server errors hide storage details.
#[must_use]
pub(crate) fn service_error_response(operation: Operation, err: ProjectServiceError) -> Response {
    let status = service_error_status(&err);
    match status {
        StatusCode::NOT_FOUND => error_response(status, "Project not found"),
        StatusCode::BAD_REQUEST => error_response(status, &err.to_string()),
        _ => {
            error!(
                "event={} module=http status=error error={}",
                operation.event(),
                err
            );
            error_response(status, operation.failure_message())
        }
    }
}

/// Response for a blocking task that panicked or was cancelled.
#[must_use]
pub(crate) fn task_failure_response(operation: Operation, err: tokio::task::JoinError) -> Response {
    error!(
        "event={} module=http status=error error_code=task_failed error={}",
        operation.event(),
        err
    );
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        operation.failure_message(),
    )
}

#[cfg(test)]
mod tests {
    use super::service_error_status;
    use axum::http::StatusCode;
    use folio_core::{ProjectServiceError, ProjectValidationError, RepoError};

    #[test]
    fn statuses_follow_error_taxonomy() {
        assert_eq!(
            service_error_status(&ProjectServiceError::Validation(
                ProjectValidationError::MissingField("title")
            )),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            service_error_status(&ProjectServiceError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            service_error_status(&ProjectServiceError::Storage(RepoError::Unavailable(
                "disk".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
