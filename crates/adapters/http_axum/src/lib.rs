//! # ringflow-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **management REST API** consumed by the (external) admin
//!   UI: rule CRUD, execution logs, templates, scheduler status and
//!   manual runs
//! - Scope every request to a tenant via the `X-Tenant-Id` header
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! Event ingestion is deliberately **not** served here — events enter
//! through `ringflow_app::gateway::EventGateway`, an internal call.
//!
//! ## Dependency rule
//! Depends on `ringflow-app` (for port traits and services) and
//! `ringflow-domain` (for types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
pub mod tenant;
