//! Execution log port — append-only persistence for rule-firing audit
//! records.

use std::future::Future;

use ringflow_domain::error::RingflowError;
use ringflow_domain::execution_log::ExecutionLogEntry;
use ringflow_domain::id::TenantId;

/// Store for [`ExecutionLogEntry`] records.
///
/// Entries are never updated or deleted by the engine; retention is an
/// external concern.
pub trait ExecutionLogStore {
    /// Append one entry.
    fn append(
        &self,
        entry: ExecutionLogEntry,
    ) -> impl Future<Output = Result<ExecutionLogEntry, RingflowError>> + Send;

    /// Most recent entries for a tenant, newest first.
    fn recent(
        &self,
        tenant_id: TenantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ExecutionLogEntry>, RingflowError>> + Send;
}

impl<T: ExecutionLogStore + Send + Sync> ExecutionLogStore for std::sync::Arc<T> {
    fn append(
        &self,
        entry: ExecutionLogEntry,
    ) -> impl Future<Output = Result<ExecutionLogEntry, RingflowError>> + Send {
        (**self).append(entry)
    }

    fn recent(
        &self,
        tenant_id: TenantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ExecutionLogEntry>, RingflowError>> + Send {
        (**self).recent(tenant_id, limit)
    }
}
