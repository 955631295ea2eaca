//! # ringflow-domain
//!
//! Pure domain model for the ringflow automation engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **trigger event catalog** (what can happen in the product)
//! - Define **Events** (tenant-scoped notifications flowing through the pipeline)
//! - Define **Automation rules** (trigger → conditions → actions bindings)
//! - Define **Conditions** and their pure evaluation against event payloads
//! - Define **Actions** (closed set of side effects) and template rendering
//! - Define **Execution log entries** (audit records of rule firings)
//! - Define **Templates** (installable rule blueprints)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod execution_log;
pub mod payload;
pub mod rule;
pub mod template;
