//! JSON REST handlers for the scheduler.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use ringflow_app::ports::{EventPublisher, ExecutionLogStore, RuleRepository};
use ringflow_app::scheduler::{JobStatus, SchedulerError};

use crate::error::error_response;
use crate::state::AppState;

/// `GET /api/scheduler/status` — job names, intervals, states.
pub async fn status<RR, LS, P>(State(state): State<AppState<RR, LS, P>>) -> Json<Vec<JobStatus>>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Json(state.scheduler.status())
}

/// `POST /api/scheduler/run/{jobName}` — manual trigger.
///
/// Returns immediately: `202 Accepted` when the run starts, `409` when
/// the job is already running, `404` for unknown job names.
pub async fn run<RR, LS, P>(
    State(state): State<AppState<RR, LS, P>>,
    Path(job_name): Path<String>,
) -> Response
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    match state.scheduler.run_now(&job_name) {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({"job": job_name, "status": "accepted"})),
        )
            .into_response(),
        Err(err @ SchedulerError::AlreadyRunning(_)) => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        Err(err @ SchedulerError::UnknownJob(_)) => {
            error_response(StatusCode::NOT_FOUND, err.to_string())
        }
    }
}
