//! Rule service — use-cases for managing automation rules.

use ringflow_domain::error::{NotFoundError, RingflowError};
use ringflow_domain::id::{RuleId, TenantId};
use ringflow_domain::rule::AutomationRule;

use crate::ports::RuleRepository;

/// Application service for tenant-scoped rule CRUD operations.
pub struct RuleService<R> {
    repo: R,
}

impl<R: RuleRepository> RuleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new rule after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RingflowError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, rule), fields(tenant = %rule.tenant_id, rule_name = %rule.name))]
    pub async fn create_rule(&self, rule: AutomationRule) -> Result<AutomationRule, RingflowError> {
        rule.validate()?;
        self.repo.create(rule).await
    }

    /// Look up a rule by id within a tenant, returning an error if not
    /// found.
    ///
    /// # Errors
    ///
    /// Returns [`RingflowError::NotFound`] when no rule with `id` exists
    /// for this tenant, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(
        &self,
        tenant_id: TenantId,
        id: RuleId,
    ) -> Result<AutomationRule, RingflowError> {
        self.repo.get(tenant_id, id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "AutomationRule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rules owned by a tenant.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rules(&self, tenant_id: TenantId) -> Result<Vec<AutomationRule>, RingflowError> {
        self.repo.list(tenant_id).await
    }

    /// Update an existing rule.
    ///
    /// The rule must already exist within the tenant's scope; updates
    /// never move a rule between tenants.
    ///
    /// # Errors
    ///
    /// Returns [`RingflowError::Validation`] if invariants fail,
    /// [`RingflowError::NotFound`] if the rule does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, rule), fields(tenant = %rule.tenant_id, rule = %rule.id))]
    pub async fn update_rule(&self, rule: AutomationRule) -> Result<AutomationRule, RingflowError> {
        rule.validate()?;
        self.get_rule(rule.tenant_id, rule.id).await?;
        self.repo.update(rule).await
    }

    /// Delete a rule by id within a tenant.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(&self, tenant_id: TenantId, id: RuleId) -> Result<(), RingflowError> {
        self.repo.delete(tenant_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryRuleRepo;
    use ringflow_domain::error::ValidationError;
    use ringflow_domain::event::TriggerEvent;
    use ringflow_domain::rule::Action;

    fn rule(tenant: TenantId) -> AutomationRule {
        AutomationRule::builder()
            .tenant_id(tenant)
            .name("Text back missed calls")
            .trigger_event(TriggerEvent::CallMissed)
            .action(Action::SendSms {
                phone_field: "callerPhone".to_string(),
                message: "We missed you".to_string(),
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_get_rule() {
        let tenant = TenantId::new();
        let service = RuleService::new(InMemoryRuleRepo::with(vec![]));

        let created = service.create_rule(rule(tenant)).await.unwrap();
        let fetched = service.get_rule(tenant, created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, created.name);
    }

    #[tokio::test]
    async fn should_reject_invalid_rule_on_create() {
        let tenant = TenantId::new();
        let mut invalid = rule(tenant);
        invalid.actions.clear();
        let service = RuleService::new(InMemoryRuleRepo::with(vec![]));

        let result = service.create_rule(invalid).await;
        assert!(matches!(
            result,
            Err(RingflowError::Validation(ValidationError::NoActions))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_rule() {
        let service = RuleService::new(InMemoryRuleRepo::with(vec![]));
        let result = service.get_rule(TenantId::new(), RuleId::new()).await;
        assert!(matches!(result, Err(RingflowError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_not_expose_rules_across_tenants() {
        let owner = TenantId::new();
        let other = TenantId::new();
        let owned = rule(owner);
        let id = owned.id;
        let service = RuleService::new(InMemoryRuleRepo::with(vec![owned]));

        let result = service.get_rule(other, id).await;
        assert!(matches!(result, Err(RingflowError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_only_own_tenant_rules() {
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        let service =
            RuleService::new(InMemoryRuleRepo::with(vec![rule(tenant_a), rule(tenant_b)]));

        let rules = service.list_rules(tenant_a).await.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].tenant_id, tenant_a);
    }

    #[tokio::test]
    async fn should_update_existing_rule() {
        let tenant = TenantId::new();
        let existing = rule(tenant);
        let mut updated = existing.clone();
        updated.name = "Renamed".to_string();
        updated.enabled = false;
        let service = RuleService::new(InMemoryRuleRepo::with(vec![existing]));

        let result = service.update_rule(updated).await.unwrap();
        assert_eq!(result.name, "Renamed");
        assert!(!result.enabled);
    }

    #[tokio::test]
    async fn should_reject_update_of_missing_rule() {
        let service = RuleService::new(InMemoryRuleRepo::with(vec![]));
        let result = service.update_rule(rule(TenantId::new())).await;
        assert!(matches!(result, Err(RingflowError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_rule() {
        let tenant = TenantId::new();
        let existing = rule(tenant);
        let id = existing.id;
        let service = RuleService::new(InMemoryRuleRepo::with(vec![existing]));

        service.delete_rule(tenant, id).await.unwrap();
        let result = service.get_rule(tenant, id).await;
        assert!(matches!(result, Err(RingflowError::NotFound(_))));
    }
}
