//! # ringflow-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `RuleRepository` and `ExecutionLogStore` port traits
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `ringflow-app` (for port traits) and `ringflow-domain`
//! (for domain types). The `app` and `domain` crates must never
//! reference this adapter.

pub mod error;
pub mod log_store;
pub mod pool;
pub mod rule_repo;

pub use error::StorageError;
pub use log_store::SqliteExecutionLogStore;
pub use pool::{Config, Database};
pub use rule_repo::SqliteRuleRepository;
