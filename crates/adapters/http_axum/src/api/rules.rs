//! JSON REST handlers for automation rules.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use ringflow_app::ports::{EventPublisher, ExecutionLogStore, RuleRepository};
use ringflow_domain::error::{RingflowError, ValidationError};
use ringflow_domain::event::TriggerEvent;
use ringflow_domain::id::RuleId;
use ringflow_domain::rule::{Action, AutomationRule, Condition};

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::Tenant;

/// Request body for creating a rule.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub trigger_event: TriggerEvent,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub priority: Option<u8>,
}

/// Request body for updating a rule.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRuleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub trigger_event: TriggerEvent,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
    pub enabled: bool,
    pub priority: u8,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<AutomationRule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<AutomationRule>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_rule_id(id: &str) -> Result<RuleId, ApiError> {
    RuleId::from_str(id)
        .map_err(|_| {
            ApiError::from(RingflowError::from(ValidationError::MalformedId(id.to_string())))
        })
}

/// `GET /api/rules` — list the tenant's rules.
pub async fn list<RR, LS, P>(
    State(state): State<AppState<RR, LS, P>>,
    Tenant(tenant_id): Tenant,
) -> Result<ListResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let rules = state.rule_service.list_rules(tenant_id).await?;
    Ok(ListResponse::Ok(Json(rules)))
}

/// `POST /api/rules` — create a new rule.
pub async fn create<RR, LS, P>(
    State(state): State<AppState<RR, LS, P>>,
    Tenant(tenant_id): Tenant,
    Json(req): Json<CreateRuleRequest>,
) -> Result<CreateResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let mut builder = AutomationRule::builder()
        .tenant_id(tenant_id)
        .name(req.name)
        .trigger_event(req.trigger_event)
        .conditions(req.conditions)
        .actions(req.actions);

    if let Some(description) = req.description {
        builder = builder.description(description);
    }
    if let Some(enabled) = req.enabled {
        builder = builder.enabled(enabled);
    }
    if let Some(priority) = req.priority {
        builder = builder.priority(priority);
    }

    let rule = builder.build()?;
    let created = state.rule_service.create_rule(rule).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/rules/{id}` — replace an existing rule.
pub async fn update<RR, LS, P>(
    State(state): State<AppState<RR, LS, P>>,
    Tenant(tenant_id): Tenant,
    Path(id): Path<String>,
    Json(req): Json<UpdateRuleRequest>,
) -> Result<Json<AutomationRule>, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let rule_id = parse_rule_id(&id)?;
    let existing = state.rule_service.get_rule(tenant_id, rule_id).await?;

    let rule = AutomationRule {
        id: existing.id,
        tenant_id,
        name: req.name,
        description: req.description,
        trigger_event: req.trigger_event,
        conditions: req.conditions,
        actions: req.actions,
        enabled: req.enabled,
        priority: req.priority,
        created_at: existing.created_at,
        updated_at: ringflow_domain::time::now(),
    };
    let updated = state.rule_service.update_rule(rule).await?;
    Ok(Json(updated))
}

/// `DELETE /api/rules/{id}` — delete a rule.
pub async fn delete<RR, LS, P>(
    State(state): State<AppState<RR, LS, P>>,
    Tenant(tenant_id): Tenant,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let rule_id = parse_rule_id(&id)?;
    state.rule_service.delete_rule(tenant_id, rule_id).await?;
    Ok(DeleteResponse::NoContent)
}
