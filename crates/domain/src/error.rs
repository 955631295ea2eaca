//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RingflowError`] via `#[from]`. Adapters wrap their infrastructure
//! errors (sqlx, HTTP clients) in the boxed [`Storage`](RingflowError::Storage)
//! variant so the domain never depends on IO crates.

/// Top-level error type shared by all layers.
#[derive(Debug, thiserror::Error)]
pub enum RingflowError {
    /// A domain invariant was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A requested record does not exist (or belongs to another tenant).
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An event was published with a type the catalog does not know.
    #[error("unknown trigger event: {0}")]
    UnknownTrigger(String),

    /// Persistence failure from a storage adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Rule name must not be empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A rule without actions can never do anything.
    #[error("rule must have at least one action")]
    NoActions,

    /// Priority is constrained to the 0-100 range.
    #[error("priority {0} is outside the 0-100 range")]
    PriorityOutOfRange(u8),

    /// Event payloads are always JSON objects.
    #[error("event payload must be a JSON object")]
    PayloadNotObject,

    /// An identifier in a request could not be parsed.
    #[error("malformed identifier: {0}")]
    MalformedId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record, e.g. `"AutomationRule"`.
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}
