//! # ringflow-adapter-actions
//!
//! Side-effecting action handlers — the driven side of the
//! [`ActionHandler`](ringflow_app::ports::ActionHandler) port.
//!
//! ## Responsibilities
//! - Validate each action's required fields before contacting anything
//! - Call the provider relay (SMS, email, CRM, tasks, sequences) and
//!   arbitrary webhook endpoints over HTTP with a hard timeout
//! - Convert every transport/provider failure into a typed
//!   [`ActionFailure`](ringflow_app::ports::ActionFailure) — handlers
//!   never panic and never hang past their deadline
//!
//! ## Dependency rule
//! Depends on `ringflow-app` (for the port) and `ringflow-domain` (for
//! action/event types). The `app` and `domain` crates must never
//! reference this adapter.

pub mod handlers;
pub mod notify;
pub mod provider;
pub mod webhook;

use std::sync::Arc;

use ringflow_app::ports::ActionRegistry;

pub use provider::{ProviderConfig, ProviderGateway};

/// Build a registry with every built-in handler registered.
///
/// # Errors
///
/// Returns a [`reqwest::Error`] if an HTTP client cannot be constructed.
pub fn default_registry(config: &ProviderConfig) -> Result<ActionRegistry, reqwest::Error> {
    let gateway = Arc::new(ProviderGateway::new(config)?);

    let mut registry = ActionRegistry::new();
    registry.register(Arc::new(handlers::SendSmsHandler::new(gateway.clone())));
    registry.register(Arc::new(handlers::SendEmailHandler::new(gateway.clone())));
    registry.register(Arc::new(handlers::UpdateLeadHandler::new(gateway.clone())));
    registry.register(Arc::new(handlers::AssignLeadHandler::new(gateway.clone())));
    registry.register(Arc::new(handlers::CreateTaskHandler::new(gateway.clone())));
    registry.register(Arc::new(handlers::SyncCrmHandler::new(gateway.clone())));
    registry.register(Arc::new(handlers::AddToSequenceHandler::new(gateway)));
    registry.register(Arc::new(webhook::WebhookHandler::new(config.timeout)?));
    registry.register(Arc::new(notify::NotifyHandler));
    Ok(registry)
}
