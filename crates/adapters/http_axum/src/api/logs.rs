//! JSON REST handlers for the execution log.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use ringflow_app::ports::{EventPublisher, ExecutionLogStore, RuleRepository};
use ringflow_domain::execution_log::ExecutionLogEntry;

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::Tenant;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

#[derive(Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

/// `GET /api/logs?limit=N` — most recent execution log entries, newest
/// first.
pub async fn list<RR, LS, P>(
    State(state): State<AppState<RR, LS, P>>,
    Tenant(tenant_id): Tenant,
    Query(query): Query<LogsQuery>,
) -> Result<Json<Vec<ExecutionLogEntry>>, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let entries = state.log_store.recent(tenant_id, limit).await?;
    Ok(Json(entries))
}
