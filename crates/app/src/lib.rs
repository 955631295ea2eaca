//! # ringflow-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleRepository` — tenant-scoped CRUD and lookup for automation rules
//!   - `ExecutionLogStore` — append & query the rule-firing audit log
//!   - `EventPublisher` — hand events to the in-process bus
//!   - `ActionHandler` — execute one side-effecting action
//! - Define **driving/inbound ports** as use-case structs:
//!   - `EventGateway` — the publish boundary (catalog check, fire-and-forget)
//!   - `RuleMatcher` — enabled-rule lookup + condition filter + priority order
//!   - `AutomationEngine` — match, render, dispatch, log
//!   - `Scheduler` — interval jobs feeding synthetic ticks into the pipeline
//!   - `RuleService` / `TemplateService` — management-API use-cases
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `ringflow-domain` only (plus `tokio::sync`/`time` for channels
//! and timers). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod engine;
pub mod event_bus;
pub mod gateway;
pub mod matcher;
pub mod ports;
pub mod scheduler;
pub mod services;

#[cfg(test)]
mod test_support;
