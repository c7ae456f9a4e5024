//! HTTP routes of the docking job service.

use super::jobs::{DockRequest, JobStore};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::path::Path as FsPath;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::debug;
use uuid::Uuid;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Build the service router. Unmatched paths are served from `web_dir`.
pub fn build_router(jobs: JobStore, web_dir: &FsPath) -> Router {
    Router::new()
        .route("/dock", post(submit_dock))
        .route("/jobs/{id}", get(get_job))
        .fallback_service(ServeDir::new(web_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(jobs)
}

/// POST /dock: queue a docking job and return its id immediately.
///
/// The body is read as JSON whatever its content type; an empty body runs the demo.
async fn submit_dock(State(jobs): State<JobStore>, body: Bytes) -> Response {
    let request = match DockRequest::from_body(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected malformed docking request.");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid request body: {e}") })),
            )
                .into_response();
        }
    };
    let id = jobs.submit(request);
    debug!(%id, "Job queued.");
    Json(json!({ "jobId": id })).into_response()
}

/// GET /jobs/{id}
async fn get_job(State(jobs): State<JobStore>, Path(id): Path<String>) -> Response {
    match Uuid::parse_str(&id).ok().and_then(|id| jobs.get(&id)) {
        Some(job) => Json(job).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response(),
    }
}
