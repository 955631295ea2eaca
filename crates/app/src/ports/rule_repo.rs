//! Rule repository port — persistence for automation rules.
//!
//! Every operation is tenant-scoped: a rule is only ever visible to the
//! tenant that owns it.

use std::future::Future;

use ringflow_domain::error::RingflowError;
use ringflow_domain::event::TriggerEvent;
use ringflow_domain::id::{RuleId, TenantId};
use ringflow_domain::rule::AutomationRule;

/// Repository for persisting and querying [`AutomationRule`]s.
pub trait RuleRepository {
    /// Create a new rule in storage.
    fn create(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, RingflowError>> + Send;

    /// Get a rule by id, within the tenant's scope.
    fn get(
        &self,
        tenant_id: TenantId,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<AutomationRule>, RingflowError>> + Send;

    /// List all rules owned by a tenant.
    fn list(
        &self,
        tenant_id: TenantId,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, RingflowError>> + Send;

    /// Find enabled rules for one tenant and trigger — the hot path of the
    /// matching pipeline.
    fn find_enabled(
        &self,
        tenant_id: TenantId,
        trigger: TriggerEvent,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, RingflowError>> + Send;

    /// Tenants that have at least one enabled rule on a trigger. Used by
    /// the scheduler to fan ticks out only where they can match.
    fn tenants_with_trigger(
        &self,
        trigger: TriggerEvent,
    ) -> impl Future<Output = Result<Vec<TenantId>, RingflowError>> + Send;

    /// Update an existing rule.
    fn update(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, RingflowError>> + Send;

    /// Delete a rule by id, within the tenant's scope.
    fn delete(
        &self,
        tenant_id: TenantId,
        id: RuleId,
    ) -> impl Future<Output = Result<(), RingflowError>> + Send;
}

impl<T: RuleRepository + Send + Sync> RuleRepository for std::sync::Arc<T> {
    fn create(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, RingflowError>> + Send {
        (**self).create(rule)
    }

    fn get(
        &self,
        tenant_id: TenantId,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<AutomationRule>, RingflowError>> + Send {
        (**self).get(tenant_id, id)
    }

    fn list(
        &self,
        tenant_id: TenantId,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, RingflowError>> + Send {
        (**self).list(tenant_id)
    }

    fn find_enabled(
        &self,
        tenant_id: TenantId,
        trigger: TriggerEvent,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, RingflowError>> + Send {
        (**self).find_enabled(tenant_id, trigger)
    }

    fn tenants_with_trigger(
        &self,
        trigger: TriggerEvent,
    ) -> impl Future<Output = Result<Vec<TenantId>, RingflowError>> + Send {
        (**self).tenants_with_trigger(trigger)
    }

    fn update(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, RingflowError>> + Send {
        (**self).update(rule)
    }

    fn delete(
        &self,
        tenant_id: TenantId,
        id: RuleId,
    ) -> impl Future<Output = Result<(), RingflowError>> + Send {
        (**self).delete(tenant_id, id)
    }
}
