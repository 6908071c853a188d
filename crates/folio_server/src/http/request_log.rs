use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};
use std::time::Instant;

/// Logs one line per request with status and latency.
pub(crate) async fn request_log_middleware(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();
    if status.is_server_error() {
        warn!(
            "event=http_request module=http status=error method={} path={} code={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            started_at.elapsed().as_millis()
        );
    } else {
        info!(
            "event=http_request module=http status=ok method={} path={} code={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            started_at.elapsed().as_millis()
        );
    }
    response
}
