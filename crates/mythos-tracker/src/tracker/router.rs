use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{SubmissionId, SubmissionRequest};
use super::service::{TrackerError, TrackerService};
use super::store::{Notifier, SubmissionStore};

/// Router builder exposing HTTP endpoints for submission intake,
/// verification, and the derived leaderboard views.
pub fn tracker_router<S, N>(service: Arc<TrackerService<S, N>>) -> Router
where
    S: SubmissionStore + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/v1/submissions", post(submit_handler::<S, N>))
        .route(
            "/api/v1/submissions/pending",
            get(pending_handler::<S, N>),
        )
        .route(
            "/api/v1/submissions/verify-batch",
            post(verify_batch_handler::<S, N>),
        )
        .route(
            "/api/v1/submissions/:submission_id/verify",
            post(verify_handler::<S, N>),
        )
        .route("/api/v1/classes", get(classes_handler::<S, N>))
        .route("/api/v1/leaderboard", get(leaderboard_handler::<S, N>))
        .with_state(service)
}

fn error_response(error: TrackerError) -> Response {
    let status = match error {
        TrackerError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TrackerError::AlreadyVerified(_) => StatusCode::CONFLICT,
        TrackerError::InvalidSubmissionReference(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "status": "error",
        "message": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<TrackerService<S, N>>>,
    axum::Json(request): axum::Json<SubmissionRequest>,
) -> Response
where
    S: SubmissionStore + 'static,
    N: Notifier + 'static,
{
    match service.submit(request) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn verify_handler<S, N>(
    State(service): State<Arc<TrackerService<S, N>>>,
    Path(submission_id): Path<u64>,
) -> Response
where
    S: SubmissionStore + 'static,
    N: Notifier + 'static,
{
    match service.verify(SubmissionId(submission_id)) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyBatchRequest {
    submission_ids: Vec<u64>,
}

pub(crate) async fn verify_batch_handler<S, N>(
    State(service): State<Arc<TrackerService<S, N>>>,
    axum::Json(request): axum::Json<VerifyBatchRequest>,
) -> Response
where
    S: SubmissionStore + 'static,
    N: Notifier + 'static,
{
    let ids: Vec<SubmissionId> = request
        .submission_ids
        .into_iter()
        .map(SubmissionId)
        .collect();

    let rows: Vec<serde_json::Value> = service
        .verify_batch(&ids)
        .into_iter()
        .map(|outcome| match outcome.result {
            Ok(receipt) => json!({
                "submission_id": outcome.submission_id,
                "status": "verified",
                "message": receipt.message,
            }),
            Err(error) => json!({
                "submission_id": outcome.submission_id,
                "status": "error",
                "message": error.to_string(),
            }),
        })
        .collect();

    (StatusCode::OK, axum::Json(json!({ "results": rows }))).into_response()
}

pub(crate) async fn pending_handler<S, N>(
    State(service): State<Arc<TrackerService<S, N>>>,
) -> Response
where
    S: SubmissionStore + 'static,
    N: Notifier + 'static,
{
    match service.pending() {
        Ok(rows) => (StatusCode::OK, axum::Json(rows)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn classes_handler<S, N>(
    State(service): State<Arc<TrackerService<S, N>>>,
) -> Response
where
    S: SubmissionStore + 'static,
    N: Notifier + 'static,
{
    match service.class_groups() {
        Ok(groups) => (StatusCode::OK, axum::Json(groups)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeaderboardQuery {
    class: Option<String>,
}

pub(crate) async fn leaderboard_handler<S, N>(
    State(service): State<Arc<TrackerService<S, N>>>,
    Query(query): Query<LeaderboardQuery>,
) -> Response
where
    S: SubmissionStore + 'static,
    N: Notifier + 'static,
{
    match service.leaderboard(query.class.as_deref()) {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => error_response(error),
    }
}
