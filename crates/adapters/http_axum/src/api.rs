//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod logs;
#[allow(clippy::missing_errors_doc)]
pub mod rules;
#[allow(clippy::missing_errors_doc)]
pub mod scheduler;
#[allow(clippy::missing_errors_doc)]
pub mod templates;

use axum::Router;
use axum::routing::{get, post, put};

use ringflow_app::ports::{EventPublisher, ExecutionLogStore, RuleRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<RR, LS, P>() -> Router<AppState<RR, LS, P>>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Rules
        .route(
            "/rules",
            get(rules::list::<RR, LS, P>).post(rules::create::<RR, LS, P>),
        )
        .route(
            "/rules/{id}",
            put(rules::update::<RR, LS, P>).delete(rules::delete::<RR, LS, P>),
        )
        // Execution log
        .route("/logs", get(logs::list::<RR, LS, P>))
        // Templates
        .route("/templates", get(templates::list::<RR, LS, P>))
        .route(
            "/templates/{id}/install",
            post(templates::install::<RR, LS, P>),
        )
        // Scheduler
        .route("/scheduler/status", get(scheduler::status::<RR, LS, P>))
        .route(
            "/scheduler/run/{jobName}",
            post(scheduler::run::<RR, LS, P>),
        )
}
