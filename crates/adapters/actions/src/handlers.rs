//! Provider-relay action handlers.
//!
//! Each handler validates its required fields first — blank fields and
//! dangling payload references fail fast with a validation error before
//! any provider call.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use ringflow_app::ports::{ActionFailure, ActionHandler};
use ringflow_domain::event::Event;
use ringflow_domain::payload;
use ringflow_domain::rule::{Action, ActionKind};

use crate::provider::ProviderGateway;

/// Fail with a validation error when a required field is blank.
fn require(field: &str, value: &str) -> Result<(), ActionFailure> {
    if value.trim().is_empty() {
        Err(ActionFailure::Validation(format!(
            "{field} must not be blank"
        )))
    } else {
        Ok(())
    }
}

/// Resolve a `*_field` payload reference to its scalar value.
fn payload_ref(event: &Event, field: &str) -> Result<String, ActionFailure> {
    require("payload field reference", field)?;
    payload::lookup(&event.payload, field)
        .and_then(payload::as_scalar_string)
        .ok_or_else(|| {
            ActionFailure::Validation(format!("payload has no value at \"{field}\""))
        })
}

/// The engine resolved the wrong handler for this action; fail closed.
fn mismatched(expected: ActionKind, got: &Action) -> ActionFailure {
    ActionFailure::Validation(format!(
        "{expected} handler received a {} action",
        got.kind()
    ))
}

macro_rules! relay_handler {
    ($name:ident) => {
        pub struct $name {
            gateway: Arc<ProviderGateway>,
        }

        impl $name {
            #[must_use]
            pub fn new(gateway: Arc<ProviderGateway>) -> Self {
                Self { gateway }
            }
        }
    };
}

relay_handler!(SendSmsHandler);

#[async_trait]
impl ActionHandler for SendSmsHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::SendSms
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::SendSms {
            phone_field,
            message,
        } = action
        else {
            return Err(mismatched(self.kind(), action));
        };
        require("message", message)?;
        let to = payload_ref(event, phone_field)?;

        self.gateway
            .post(
                "/sms/messages",
                &json!({
                    "tenantId": event.tenant_id,
                    "to": to,
                    "message": message,
                }),
            )
            .await
    }
}

relay_handler!(SendEmailHandler);

#[async_trait]
impl ActionHandler for SendEmailHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::SendEmail
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::SendEmail {
            email_field,
            subject,
            body,
        } = action
        else {
            return Err(mismatched(self.kind(), action));
        };
        require("subject", subject)?;
        require("body", body)?;
        let to = payload_ref(event, email_field)?;

        self.gateway
            .post(
                "/email/messages",
                &json!({
                    "tenantId": event.tenant_id,
                    "to": to,
                    "subject": subject,
                    "body": body,
                }),
            )
            .await
    }
}

relay_handler!(UpdateLeadHandler);

#[async_trait]
impl ActionHandler for UpdateLeadHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::UpdateLead
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::UpdateLead {
            lead_id_field,
            status,
        } = action
        else {
            return Err(mismatched(self.kind(), action));
        };
        require("status", status)?;
        let lead_id = payload_ref(event, lead_id_field)?;

        self.gateway
            .post(
                "/crm/leads/status",
                &json!({
                    "tenantId": event.tenant_id,
                    "leadId": lead_id,
                    "status": status,
                }),
            )
            .await
    }
}

relay_handler!(AssignLeadHandler);

#[async_trait]
impl ActionHandler for AssignLeadHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::AssignLead
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::AssignLead {
            lead_id_field,
            assignee,
        } = action
        else {
            return Err(mismatched(self.kind(), action));
        };
        require("assignee", assignee)?;
        let lead_id = payload_ref(event, lead_id_field)?;

        self.gateway
            .post(
                "/crm/leads/assign",
                &json!({
                    "tenantId": event.tenant_id,
                    "leadId": lead_id,
                    "assignee": assignee,
                }),
            )
            .await
    }
}

relay_handler!(CreateTaskHandler);

#[async_trait]
impl ActionHandler for CreateTaskHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::CreateTask
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::CreateTask { title, notes } = action else {
            return Err(mismatched(self.kind(), action));
        };
        require("title", title)?;

        self.gateway
            .post(
                "/crm/tasks",
                &json!({
                    "tenantId": event.tenant_id,
                    "title": title,
                    "notes": notes,
                }),
            )
            .await
    }
}

relay_handler!(SyncCrmHandler);

#[async_trait]
impl ActionHandler for SyncCrmHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::SyncCrm
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::SyncCrm { lead_id_field } = action else {
            return Err(mismatched(self.kind(), action));
        };
        let lead_id = payload_ref(event, lead_id_field)?;

        self.gateway
            .post(
                "/crm/sync",
                &json!({
                    "tenantId": event.tenant_id,
                    "leadId": lead_id,
                }),
            )
            .await
    }
}

relay_handler!(AddToSequenceHandler);

#[async_trait]
impl ActionHandler for AddToSequenceHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::AddToSequence
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::AddToSequence {
            lead_id_field,
            sequence_id,
        } = action
        else {
            return Err(mismatched(self.kind(), action));
        };
        require("sequenceId", sequence_id)?;
        let lead_id = payload_ref(event, lead_id_field)?;

        self.gateway
            .post(
                "/sequences/enroll",
                &json!({
                    "tenantId": event.tenant_id,
                    "leadId": lead_id,
                    "sequenceId": sequence_id,
                }),
            )
            .await
    }
}
