use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Emits one `api_request` event per request, keyed by the matched route
/// template so encounter and line ids stay out of the path field. Server
/// errors are logged at warn.
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(%method, %route, status = status.as_u16(), elapsed_ms, "api_request");
    } else {
        tracing::info!(%method, %route, status = status.as_u16(), elapsed_ms, "api_request");
    }

    response
}
