//! Template service — listing the catalog and installing blueprints.

use ringflow_domain::error::{NotFoundError, RingflowError};
use ringflow_domain::id::TenantId;
use ringflow_domain::rule::AutomationRule;
use ringflow_domain::template::{self, Template};

use crate::ports::RuleRepository;

/// Application service for the template catalog.
pub struct TemplateService<R> {
    repo: R,
}

impl<R: RuleRepository> TemplateService<R> {
    /// Create a new service backed by the given rule repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All templates in the catalog.
    #[must_use]
    pub fn list_templates(&self) -> &'static [Template] {
        template::catalog()
    }

    /// Install a template as a new rule owned by `tenant_id`.
    ///
    /// Installing the same template twice produces two independent rules;
    /// deduplication is the rule author's concern.
    ///
    /// # Errors
    ///
    /// Returns [`RingflowError::NotFound`] for unknown template ids, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn install(
        &self,
        tenant_id: TenantId,
        template_id: &str,
    ) -> Result<AutomationRule, RingflowError> {
        let template = template::find(template_id).ok_or_else(|| NotFoundError {
            entity: "Template",
            id: template_id.to_string(),
        })?;
        let rule = template.install(tenant_id);
        tracing::info!(tenant = %tenant_id, template = template.id, rule = %rule.id, "template installed");
        self.repo.create(rule).await
    }
}
