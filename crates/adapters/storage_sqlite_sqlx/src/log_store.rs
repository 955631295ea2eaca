//! `SQLite` implementation of [`ExecutionLogStore`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use ringflow_app::ports::ExecutionLogStore;
use ringflow_domain::error::RingflowError;
use ringflow_domain::event::TriggerEvent;
use ringflow_domain::execution_log::{ExecutionLogEntry, ExecutionStatus};
use ringflow_domain::id::{LogEntryId, RuleId, TenantId};

use crate::error::StorageError;

struct Wrapper(ExecutionLogEntry);

fn decode<E: std::error::Error + Send + Sync + 'static>(err: E) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let tenant_id: String = row.try_get("tenant_id")?;
        let rule_id: String = row.try_get("rule_id")?;
        let rule_name: String = row.try_get("rule_name")?;
        let trigger: String = row.try_get("trigger_event")?;
        let status: String = row.try_get("status")?;
        let error: Option<String> = row.try_get("error")?;
        let created_at: String = row.try_get("created_at")?;

        let status = match status.as_str() {
            "SUCCESS" => ExecutionStatus::Success,
            "FAILED" => ExecutionStatus::Failed,
            other => {
                return Err(sqlx::Error::Decode(
                    format!("unknown execution status: {other}").into(),
                ));
            }
        };

        Ok(Self(ExecutionLogEntry {
            id: LogEntryId::from_str(&id).map_err(decode)?,
            tenant_id: TenantId::from_str(&tenant_id).map_err(decode)?,
            rule_id: RuleId::from_str(&rule_id).map_err(decode)?,
            rule_name,
            trigger_event: TriggerEvent::from_str(&trigger).map_err(decode)?,
            status,
            error,
            created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.to_utc())
                .map_err(decode)?,
        }))
    }
}

/// `SQLite`-backed execution log store.
pub struct SqliteExecutionLogStore {
    pool: SqlitePool,
}

impl SqliteExecutionLogStore {
    /// Create a new store backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ExecutionLogStore for SqliteExecutionLogStore {
    async fn append(&self, entry: ExecutionLogEntry) -> Result<ExecutionLogEntry, RingflowError> {
        sqlx::query(
            "INSERT INTO execution_log (id, tenant_id, rule_id, rule_name, trigger_event, status, error, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(entry.tenant_id.to_string())
        .bind(entry.rule_id.to_string())
        .bind(&entry.rule_name)
        .bind(entry.trigger_event.as_str())
        .bind(entry.status.to_string())
        .bind(&entry.error)
        .bind(entry.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(entry)
    }

    async fn recent(
        &self,
        tenant_id: TenantId,
        limit: usize,
    ) -> Result<Vec<ExecutionLogEntry>, RingflowError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM execution_log WHERE tenant_id = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(tenant_id.to_string())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
