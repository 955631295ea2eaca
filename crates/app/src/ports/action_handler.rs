//! Action handler port and registry.
//!
//! Handlers are registered per [`ActionKind`] and resolved at dispatch
//! time. The trait is object-safe (via `async_trait`) because the
//! registry holds heterogeneous handlers behind `dyn`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use ringflow_domain::event::Event;
use ringflow_domain::rule::{Action, ActionKind};

/// Typed failure reasons an action handler can report.
///
/// Handlers must capture every failure as one of these — never panic and
/// never let a provider error escape uncaught. The engine converts them
/// into `FAILED` execution log entries.
#[derive(Debug, thiserror::Error)]
pub enum ActionFailure {
    /// A required field was blank or the referenced payload field is
    /// missing. Reported before any provider is contacted.
    #[error("validation: {0}")]
    Validation(String),

    /// The external provider rejected the call or was unreachable.
    #[error("provider: {0}")]
    Provider(String),

    /// The provider did not answer within the handler's deadline.
    #[error("timed out waiting for provider")]
    Timeout,

    /// No handler is registered for the action's type.
    #[error("no handler registered for {0}")]
    Unhandled(ActionKind),
}

/// Executes one action type against the outside world.
///
/// Contract: handlers should be idempotent enough to be retried by an
/// external layer, and must apply their own timeout so a hung provider
/// cannot stall the dispatcher.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// The action type this handler executes.
    fn kind(&self) -> ActionKind;

    /// Execute one action. The action arrives already rendered
    /// (`{{field}}` tokens substituted); the event supplies the payload
    /// for `*_field` references.
    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure>;
}

/// Maps action types to their handlers.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<ActionKind, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own [`ActionHandler::kind`].
    ///
    /// Registering a second handler for the same kind replaces the first.
    pub fn register(&mut self, handler: Arc<dyn ActionHandler>) {
        let kind = handler.kind();
        if self.handlers.insert(kind, handler).is_some() {
            tracing::warn!(%kind, "replaced previously registered action handler");
        }
    }

    /// Resolve the handler for an action type.
    #[must_use]
    pub fn get(&self, kind: ActionKind) -> Option<&Arc<dyn ActionHandler>> {
        self.handlers.get(&kind)
    }

    /// Action types with a registered handler.
    #[must_use]
    pub fn kinds(&self) -> Vec<ActionKind> {
        self.handlers.keys().copied().collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
