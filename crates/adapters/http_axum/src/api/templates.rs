//! JSON REST handlers for the template catalog.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use ringflow_app::ports::{EventPublisher, ExecutionLogStore, RuleRepository};
use ringflow_domain::rule::AutomationRule;
use ringflow_domain::template::Template;

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::Tenant;

/// `GET /api/templates` — list the catalog.
pub async fn list<RR, LS, P>(
    State(state): State<AppState<RR, LS, P>>,
) -> Json<&'static [Template]>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Json(state.template_service.list_templates())
}

/// `POST /api/templates/{id}/install` — materialize a template as a new
/// rule owned by the tenant.
pub async fn install<RR, LS, P>(
    State(state): State<AppState<RR, LS, P>>,
    Tenant(tenant_id): Tenant,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<AutomationRule>), ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let rule = state.template_service.install(tenant_id, &id).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}
