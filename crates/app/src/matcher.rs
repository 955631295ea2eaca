//! Rule matcher — which rules fire for an event, and in what order.

use ringflow_domain::error::RingflowError;
use ringflow_domain::event::Event;
use ringflow_domain::rule::AutomationRule;

use crate::ports::RuleRepository;

/// Matches events against a tenant's enabled rules.
pub struct RuleMatcher<R> {
    repo: R,
}

impl<R: RuleRepository> RuleMatcher<R> {
    /// Create a matcher backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Rules that should fire for this event, highest priority first.
    ///
    /// Fetches the tenant's enabled rules for the event's trigger, keeps
    /// those whose conditions all pass against the payload, and orders
    /// them by priority descending with `created_at` ascending as the
    /// tie-break — a stable order, so repeated runs over the same data
    /// dispatch in the same sequence. No match is the common case and
    /// returns an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn matching_rules(&self, event: &Event) -> Result<Vec<AutomationRule>, RingflowError> {
        let mut rules = self
            .repo
            .find_enabled(event.tenant_id, event.trigger)
            .await?;

        rules.retain(|rule| rule.matches(&event.payload));
        rules.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });

        Ok(rules)
    }
}
