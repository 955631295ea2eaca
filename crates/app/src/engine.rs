//! Automation engine — matches events against rules and dispatches their
//! actions.
//!
//! For each incoming event the engine asks the [`RuleMatcher`] for the
//! rules that should fire, then executes every matched rule's actions in
//! listed order, best-effort: a failing action is captured and the
//! remaining actions still run. Each (rule, event) firing produces
//! exactly one execution log entry.

use ringflow_domain::error::RingflowError;
use ringflow_domain::event::Event;
use ringflow_domain::execution_log::{ExecutionLogEntry, ExecutionStatus};
use ringflow_domain::id::RuleId;
use ringflow_domain::rule::{ActionKind, AutomationRule};

use crate::matcher::RuleMatcher;
use crate::ports::{ActionFailure, ActionRegistry, ExecutionLogStore, RuleRepository};

/// Result of one action within a rule firing.
#[derive(Debug)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub result: Result<(), ActionFailure>,
}

/// Result of one rule firing for one event.
#[derive(Debug)]
pub struct RuleFiring {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub status: ExecutionStatus,
    pub outcomes: Vec<ActionOutcome>,
}

/// The match → render → dispatch → log pipeline.
pub struct AutomationEngine<R, L> {
    matcher: RuleMatcher<R>,
    registry: ActionRegistry,
    log_store: L,
}

impl<R, L> AutomationEngine<R, L>
where
    R: RuleRepository,
    L: ExecutionLogStore,
{
    /// Create a new engine.
    pub fn new(rule_repo: R, registry: ActionRegistry, log_store: L) -> Self {
        Self {
            matcher: RuleMatcher::new(rule_repo),
            registry,
            log_store,
        }
    }

    /// Process a single event against the owning tenant's enabled rules.
    ///
    /// Matched rules are started in priority order. Action failures never
    /// abort the firing or sibling rules; they surface only through the
    /// returned firings and the execution log. A log-store failure is
    /// reported via tracing and swallowed — the publisher has long since
    /// moved on.
    ///
    /// # Errors
    ///
    /// Returns a storage error if loading the tenant's rules fails.
    pub async fn process_event(&self, event: &Event) -> Result<Vec<RuleFiring>, RingflowError> {
        let rules = self.matcher.matching_rules(event).await?;
        let mut firings = Vec::with_capacity(rules.len());

        for rule in rules {
            let outcomes = self.dispatch(&rule, event).await;

            let errors: Vec<String> = outcomes
                .iter()
                .filter_map(|o| o.result.as_ref().err().map(|e| format!("{}: {e}", o.kind)))
                .collect();
            let status = if errors.is_empty() {
                ExecutionStatus::Success
            } else {
                ExecutionStatus::Failed
            };

            tracing::info!(
                tenant = %rule.tenant_id,
                rule = %rule.id,
                trigger = %event.trigger,
                %status,
                "rule fired"
            );

            let entry = ExecutionLogEntry::for_firing(
                &rule,
                status,
                (!errors.is_empty()).then(|| errors.join("; ")),
            );
            if let Err(err) = self.log_store.append(entry).await {
                tracing::error!(
                    error = %err,
                    rule = %rule.id,
                    "failed to append execution log entry"
                );
            }

            firings.push(RuleFiring {
                rule_id: rule.id,
                rule_name: rule.name,
                status,
                outcomes,
            });
        }

        Ok(firings)
    }

    /// Execute a rule's actions sequentially, best-effort.
    async fn dispatch(&self, rule: &AutomationRule, event: &Event) -> Vec<ActionOutcome> {
        let mut outcomes = Vec::with_capacity(rule.actions.len());

        for action in &rule.actions {
            let rendered = action.rendered(&event.payload);
            let kind = rendered.kind();

            let result = match self.registry.get(kind) {
                Some(handler) => handler.execute(&rendered, event).await,
                None => Err(ActionFailure::Unhandled(kind)),
            };

            if let Err(failure) = &result {
                tracing::warn!(
                    rule = %rule.id,
                    action = %kind,
                    error = %failure,
                    "action failed, continuing with remaining actions"
                );
            }

            outcomes.push(ActionOutcome { kind, result });
        }

        outcomes
    }
}
