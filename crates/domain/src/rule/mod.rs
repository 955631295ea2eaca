//! Automation rule — trigger → conditions → actions.
//!
//! A rule binds a catalog [`TriggerEvent`] to a list of AND-combined
//! [`Condition`]s and an ordered list of [`Action`]s. Rules are owned by
//! a tenant and never shared.

mod action;
mod condition;

pub use action::{ALL_ACTION_KINDS, Action, ActionKind};
pub use condition::{Condition, Operator};

use serde::{Deserialize, Serialize};

use crate::error::{RingflowError, ValidationError};
use crate::event::TriggerEvent;
use crate::id::{RuleId, TenantId};
use crate::time::Timestamp;

/// Highest allowed rule priority.
pub const MAX_PRIORITY: u8 = 100;

/// A tenant-owned automation rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRule {
    pub id: RuleId,
    pub tenant_id: TenantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub trigger_event: TriggerEvent,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
    pub enabled: bool,
    /// 0-100; higher fires first.
    pub priority: u8,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AutomationRule {
    /// Create a builder for constructing an [`AutomationRule`].
    #[must_use]
    pub fn builder() -> AutomationRuleBuilder {
        AutomationRuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RingflowError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `actions` is empty ([`ValidationError::NoActions`])
    /// - `priority` exceeds [`MAX_PRIORITY`] ([`ValidationError::PriorityOutOfRange`])
    pub fn validate(&self) -> Result<(), RingflowError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions.into());
        }
        if self.priority > MAX_PRIORITY {
            return Err(ValidationError::PriorityOutOfRange(self.priority).into());
        }
        Ok(())
    }

    /// Evaluate all conditions against an event payload (logical AND).
    ///
    /// An empty condition list always matches.
    #[must_use]
    pub fn matches(&self, event_payload: &serde_json::Value) -> bool {
        self.conditions.iter().all(|c| c.evaluate(event_payload))
    }
}

/// Step-by-step builder for [`AutomationRule`].
#[derive(Debug, Default)]
pub struct AutomationRuleBuilder {
    id: Option<RuleId>,
    tenant_id: Option<TenantId>,
    name: Option<String>,
    description: Option<String>,
    trigger_event: Option<TriggerEvent>,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
    enabled: Option<bool>,
    priority: Option<u8>,
    created_at: Option<Timestamp>,
}

impl AutomationRuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn tenant_id(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn trigger_event(mut self, trigger: TriggerEvent) -> Self {
        self.trigger_event = Some(trigger);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return an [`AutomationRule`].
    ///
    /// # Errors
    ///
    /// Returns [`RingflowError::Validation`] if required fields are
    /// missing or invariants fail.
    pub fn build(self) -> Result<AutomationRule, RingflowError> {
        let created_at = self.created_at.unwrap_or_else(crate::time::now);
        let rule = AutomationRule {
            id: self.id.unwrap_or_default(),
            tenant_id: self.tenant_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            trigger_event: self.trigger_event.unwrap_or(TriggerEvent::LeadCreated),
            conditions: self.conditions,
            actions: self.actions,
            enabled: self.enabled.unwrap_or(true),
            priority: self.priority.unwrap_or(0),
            created_at,
            updated_at: created_at,
        };
        rule.validate()?;
        Ok(rule)
    }
}
