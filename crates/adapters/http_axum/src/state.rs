//! Shared application state for axum handlers.

use std::sync::Arc;

use ringflow_app::ports::{EventPublisher, ExecutionLogStore, RuleRepository};
use ringflow_app::scheduler::Scheduler;
use ringflow_app::services::rule_service::RuleService;
use ringflow_app::services::template_service::TemplateService;

/// Application state shared across all axum handlers.
///
/// Generic over the rule repository, execution log store, and event
/// publisher types to avoid dynamic dispatch. `Clone` is implemented
/// manually so the underlying types themselves do not need to be
/// `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<RR, LS, P> {
    /// Rule CRUD service.
    pub rule_service: Arc<RuleService<RR>>,
    /// Template catalog + installer.
    pub template_service: Arc<TemplateService<RR>>,
    /// Execution log store for audit queries.
    pub log_store: Arc<LS>,
    /// Scheduler handle for status and manual runs (itself cheap to clone).
    pub scheduler: Scheduler<RR, P>,
}

impl<RR, LS, P> Clone for AppState<RR, LS, P> {
    fn clone(&self) -> Self {
        Self {
            rule_service: Arc::clone(&self.rule_service),
            template_service: Arc::clone(&self.template_service),
            log_store: Arc::clone(&self.log_store),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<RR, LS, P> AppState<RR, LS, P>
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        rule_service: RuleService<RR>,
        template_service: TemplateService<RR>,
        log_store: LS,
        scheduler: Scheduler<RR, P>,
    ) -> Self {
        Self {
            rule_service: Arc::new(rule_service),
            template_service: Arc::new(template_service),
            log_store: Arc::new(log_store),
            scheduler,
        }
    }
}
