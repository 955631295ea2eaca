//! `SQLite` implementation of [`RuleRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use ringflow_app::ports::RuleRepository;
use ringflow_domain::error::{NotFoundError, RingflowError};
use ringflow_domain::event::TriggerEvent;
use ringflow_domain::id::{RuleId, TenantId};
use ringflow_domain::rule::{Action, AutomationRule, Condition};

use crate::error::StorageError;

struct Wrapper(AutomationRule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<AutomationRule> {
        value.map(|w| w.0)
    }
}

fn decode<E: std::error::Error + Send + Sync + 'static>(err: E) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

fn parse_timestamp(s: &str) -> Result<ringflow_domain::time::Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.to_utc())
        .map_err(decode)
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let tenant_id: String = row.try_get("tenant_id")?;
        let name: String = row.try_get("name")?;
        let description: Option<String> = row.try_get("description")?;
        let trigger: String = row.try_get("trigger_event")?;
        let conditions_json: String = row.try_get("conditions")?;
        let actions_json: String = row.try_get("actions")?;
        let enabled: bool = row.try_get("enabled")?;
        let priority: i64 = row.try_get("priority")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let id = RuleId::from_str(&id).map_err(decode)?;
        let tenant_id = TenantId::from_str(&tenant_id).map_err(decode)?;
        let trigger_event = TriggerEvent::from_str(&trigger).map_err(decode)?;
        let conditions: Vec<Condition> = serde_json::from_str(&conditions_json).map_err(decode)?;
        let actions: Vec<Action> = serde_json::from_str(&actions_json).map_err(decode)?;
        let priority = u8::try_from(priority).map_err(decode)?;

        Ok(Self(AutomationRule {
            id,
            tenant_id,
            name,
            description,
            trigger_event,
            conditions,
            actions,
            enabled,
            priority,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }
}

/// `SQLite`-backed rule repository.
pub struct SqliteRuleRepository {
    pool: SqlitePool,
}

impl SqliteRuleRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RuleRepository for SqliteRuleRepository {
    async fn create(&self, rule: AutomationRule) -> Result<AutomationRule, RingflowError> {
        let conditions_json = serde_json::to_string(&rule.conditions).map_err(StorageError::from)?;
        let actions_json = serde_json::to_string(&rule.actions).map_err(StorageError::from)?;

        sqlx::query(
            "INSERT INTO automation_rules (id, tenant_id, name, description, trigger_event, conditions, actions, enabled, priority, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(rule.id.to_string())
        .bind(rule.tenant_id.to_string())
        .bind(&rule.name)
        .bind(&rule.description)
        .bind(rule.trigger_event.as_str())
        .bind(&conditions_json)
        .bind(&actions_json)
        .bind(rule.enabled)
        .bind(i64::from(rule.priority))
        .bind(rule.created_at.to_rfc3339())
        .bind(rule.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn get(
        &self,
        tenant_id: TenantId,
        id: RuleId,
    ) -> Result<Option<AutomationRule>, RingflowError> {
        let row: Option<Wrapper> =
            sqlx::query_as("SELECT * FROM automation_rules WHERE id = ? AND tenant_id = ?")
                .bind(id.to_string())
                .bind(tenant_id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn list(&self, tenant_id: TenantId) -> Result<Vec<AutomationRule>, RingflowError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM automation_rules WHERE tenant_id = ? ORDER BY created_at")
                .bind(tenant_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_enabled(
        &self,
        tenant_id: TenantId,
        trigger: TriggerEvent,
    ) -> Result<Vec<AutomationRule>, RingflowError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM automation_rules WHERE tenant_id = ? AND trigger_event = ? AND enabled = 1 ORDER BY priority DESC, created_at",
        )
        .bind(tenant_id.to_string())
        .bind(trigger.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn tenants_with_trigger(
        &self,
        trigger: TriggerEvent,
    ) -> Result<Vec<TenantId>, RingflowError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT tenant_id FROM automation_rules WHERE trigger_event = ? AND enabled = 1 ORDER BY tenant_id",
        )
        .bind(trigger.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(tenant,)| {
                TenantId::from_str(&tenant)
                    .map_err(|err| StorageError::Database(decode(err)).into())
            })
            .collect()
    }

    async fn update(&self, rule: AutomationRule) -> Result<AutomationRule, RingflowError> {
        let conditions_json = serde_json::to_string(&rule.conditions).map_err(StorageError::from)?;
        let actions_json = serde_json::to_string(&rule.actions).map_err(StorageError::from)?;

        let result = sqlx::query(
            "UPDATE automation_rules SET name = ?, description = ?, trigger_event = ?, conditions = ?, actions = ?, enabled = ?, priority = ?, updated_at = ? WHERE id = ? AND tenant_id = ?",
        )
        .bind(&rule.name)
        .bind(&rule.description)
        .bind(rule.trigger_event.as_str())
        .bind(&conditions_json)
        .bind(&actions_json)
        .bind(rule.enabled)
        .bind(i64::from(rule.priority))
        .bind(rule.updated_at.to_rfc3339())
        .bind(rule.id.to_string())
        .bind(rule.tenant_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError {
                entity: "AutomationRule",
                id: rule.id.to_string(),
            }
            .into());
        }

        Ok(rule)
    }

    async fn delete(&self, tenant_id: TenantId, id: RuleId) -> Result<(), RingflowError> {
        sqlx::query("DELETE FROM automation_rules WHERE id = ? AND tenant_id = ?")
            .bind(id.to_string())
            .bind(tenant_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
