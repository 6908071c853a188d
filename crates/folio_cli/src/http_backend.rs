//! Remote project backend speaking the `/api/projects` contract.
//!
//! # Invariants
//! - 404 maps to `NotFound`, 400 to `InvalidInput`; every other failure is
//!   `Remote`.
//! - Requests are sent once; there is no retry.

use folio_core::{Project, ProjectBackend, ProjectDraft, ProjectServiceError, ServiceResult};
use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const PROJECTS_PATH: &str = "/api/projects";

#[derive(Serialize)]
struct ReplaceBody<'a> {
    id: &'a str,
    #[serde(flatten)]
    draft: &'a ProjectDraft,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking HTTP client for a running folio server.
pub struct HttpProjectBackend {
    client: Client,
    endpoint: String,
}

impl HttpProjectBackend {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{PROJECTS_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ProjectBackend for HttpProjectBackend {
    fn list(&self) -> ServiceResult<Vec<Project>> {
        debug!("event=http_list module=cli endpoint={}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().map_err(transport)?;
        decode(check(response, None)?)
    }

    fn create(&self, draft: ProjectDraft) -> ServiceResult<Project> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&draft)
            .send()
            .map_err(transport)?;
        decode(check(response, None)?)
    }

    fn replace(&self, id: &str, draft: ProjectDraft) -> ServiceResult<Project> {
        let response = self
            .client
            .put(&self.endpoint)
            .json(&ReplaceBody { id, draft: &draft })
            .send()
            .map_err(transport)?;
        decode(check(response, Some(id))?)
    }

    fn remove(&self, id: &str) -> ServiceResult<()> {
        let response = self
            .client
            .delete(&self.endpoint)
            .query(&[("id", id)])
            .send()
            .map_err(transport)?;
        check(response, Some(id)).map(|_| ())
    }
}

fn transport(err: reqwest::Error) -> ProjectServiceError {
    ProjectServiceError::Remote(err.to_string())
}

fn check(response: Response, id: Option<&str>) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());
    Err(match status {
        StatusCode::NOT_FOUND => {
            ProjectServiceError::NotFound(id.map(str::to_string).unwrap_or_default())
        }
        StatusCode::BAD_REQUEST => ProjectServiceError::InvalidInput(message),
        _ => ProjectServiceError::Remote(format!("{}: {message}", status.as_u16())),
    })
}

fn decode<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
    response
        .json::<T>()
        .map_err(|err| ProjectServiceError::Remote(format!("invalid response body: {err}")))
}
