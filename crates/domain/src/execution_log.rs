//! Execution log entry — an audit record of one rule firing.
//!
//! Entries are append-only and exist purely for observability; the
//! matching pipeline never reads them back.

use serde::{Deserialize, Serialize};

use crate::event::TriggerEvent;
use crate::id::{LogEntryId, RuleId, TenantId};
use crate::rule::AutomationRule;
use crate::time::Timestamp;

/// Outcome of a rule firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Every action in the rule completed.
    Success,
    /// At least one action failed.
    Failed,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Failed => f.write_str("FAILED"),
        }
    }
}

/// One rule-level audit record per (rule, event) firing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLogEntry {
    pub id: LogEntryId,
    pub tenant_id: TenantId,
    pub rule_id: RuleId,
    /// Denormalized so the entry stays readable after the rule is deleted.
    pub rule_name: String,
    pub trigger_event: TriggerEvent,
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: Timestamp,
}

impl ExecutionLogEntry {
    /// Build an entry for a rule firing.
    #[must_use]
    pub fn for_firing(rule: &AutomationRule, status: ExecutionStatus, error: Option<String>) -> Self {
        Self {
            id: LogEntryId::new(),
            tenant_id: rule.tenant_id,
            rule_id: rule.id,
            rule_name: rule.name.clone(),
            trigger_event: rule.trigger_event,
            status,
            error,
            created_at: crate::time::now(),
        }
    }
}
