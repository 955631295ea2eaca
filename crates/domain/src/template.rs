//! Template — an immutable rule blueprint tenants can install.
//!
//! The catalog is product-defined: installing never mutates it, and
//! installing the same template twice yields two independent rules.

use std::sync::LazyLock;

use serde::Serialize;
use serde_json::json;

use crate::event::TriggerEvent;
use crate::id::TenantId;
use crate::rule::{Action, AutomationRule, Condition, Operator};

/// A predefined (trigger, conditions, actions) blueprint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable slug, e.g. `"missed-call-text-back"`.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub trigger_event: TriggerEvent,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

impl Template {
    /// Materialize this blueprint into a rule owned by `tenant_id`.
    ///
    /// The copy starts enabled with priority 0 and a fresh id.
    #[must_use]
    pub fn install(&self, tenant_id: TenantId) -> AutomationRule {
        AutomationRule::builder()
            .tenant_id(tenant_id)
            .name(self.name)
            .description(self.description)
            .trigger_event(self.trigger_event)
            .conditions(self.conditions.clone())
            .actions(self.actions.clone())
            .enabled(true)
            .priority(0)
            .build()
            // Catalog templates are valid by construction; see tests.
            .unwrap_or_else(|err| unreachable!("invalid catalog template {}: {err}", self.id))
    }
}

static CATALOG: LazyLock<Vec<Template>> = LazyLock::new(|| {
    vec![
        Template {
            id: "missed-call-text-back",
            name: "Missed call text-back",
            description: "Text callers back immediately when a call goes unanswered.",
            trigger_event: TriggerEvent::CallMissed,
            conditions: vec![Condition {
                field: "callerPhone".to_string(),
                operator: Operator::Exists,
                value: serde_json::Value::Null,
            }],
            actions: vec![Action::SendSms {
                phone_field: "callerPhone".to_string(),
                message: "Sorry we missed your call! Reply here and we'll get right back to you."
                    .to_string(),
            }],
        },
        Template {
            id: "speed-to-lead",
            name: "Speed to lead",
            description: "Notify the team and open a follow-up task the moment a lead arrives.",
            trigger_event: TriggerEvent::LeadCreated,
            conditions: vec![],
            actions: vec![
                Action::Notify {
                    message: "New lead {{name}} ({{source}}) just came in.".to_string(),
                },
                Action::CreateTask {
                    title: "Call {{name}} back within 5 minutes".to_string(),
                    notes: Some("Lead phone: {{phone}}".to_string()),
                },
            ],
        },
        Template {
            id: "trial-ending-reminder",
            name: "Trial ending reminder",
            description: "Email the account owner before their trial runs out.",
            trigger_event: TriggerEvent::TrialEndingSoon,
            conditions: vec![Condition {
                field: "daysLeft".to_string(),
                operator: Operator::LessThan,
                value: json!(4),
            }],
            actions: vec![Action::SendEmail {
                email_field: "ownerEmail".to_string(),
                subject: "Your trial ends in {{daysLeft}} days".to_string(),
                body: "Hi {{ownerName}}, your trial ends on {{endsAt}}. Pick a plan to keep \
                       your number answering."
                    .to_string(),
            }],
        },
    ]
});

/// All templates in the catalog.
#[must_use]
pub fn catalog() -> &'static [Template] {
    &CATALOG
}

/// Look up a template by its slug.
#[must_use]
pub fn find(id: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id == id)
}
