//! In-memory port implementations shared by the unit tests in this crate.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use async_trait::async_trait;

use ringflow_domain::error::RingflowError;
use ringflow_domain::event::{Event, TriggerEvent};
use ringflow_domain::execution_log::ExecutionLogEntry;
use ringflow_domain::id::{RuleId, TenantId};
use ringflow_domain::rule::{Action, ActionKind, AutomationRule};

use crate::ports::{ActionFailure, ActionHandler, EventPublisher, ExecutionLogStore, RuleRepository};

pub struct InMemoryRuleRepo {
    store: Mutex<HashMap<RuleId, AutomationRule>>,
}

impl InMemoryRuleRepo {
    pub fn with(rules: Vec<AutomationRule>) -> Self {
        let map: HashMap<_, _> = rules.into_iter().map(|r| (r.id, r)).collect();
        Self {
            store: Mutex::new(map),
        }
    }
}

impl RuleRepository for InMemoryRuleRepo {
    fn create(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, RingflowError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.insert(rule.id, rule.clone());
        async { Ok(rule) }
    }

    fn get(
        &self,
        tenant_id: TenantId,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<AutomationRule>, RingflowError>> + Send {
        let store = self.store.lock().unwrap();
        let r = store.get(&id).filter(|r| r.tenant_id == tenant_id).cloned();
        async { Ok(r) }
    }

    fn list(
        &self,
        tenant_id: TenantId,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, RingflowError>> + Send {
        let store = self.store.lock().unwrap();
        let mut r: Vec<_> = store
            .values()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect();
        r.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        async { Ok(r) }
    }

    fn find_enabled(
        &self,
        tenant_id: TenantId,
        trigger: TriggerEvent,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, RingflowError>> + Send {
        let store = self.store.lock().unwrap();
        let r: Vec<_> = store
            .values()
            .filter(|r| r.tenant_id == tenant_id && r.trigger_event == trigger && r.enabled)
            .cloned()
            .collect();
        async { Ok(r) }
    }

    fn tenants_with_trigger(
        &self,
        trigger: TriggerEvent,
    ) -> impl Future<Output = Result<Vec<TenantId>, RingflowError>> + Send {
        let store = self.store.lock().unwrap();
        let mut tenants: Vec<_> = store
            .values()
            .filter(|r| r.trigger_event == trigger && r.enabled)
            .map(|r| r.tenant_id)
            .collect();
        tenants.sort_by_key(|t| t.as_uuid());
        tenants.dedup();
        async { Ok(tenants) }
    }

    fn update(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, RingflowError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.insert(rule.id, rule.clone());
        async { Ok(rule) }
    }

    fn delete(
        &self,
        tenant_id: TenantId,
        id: RuleId,
    ) -> impl Future<Output = Result<(), RingflowError>> + Send {
        let mut store = self.store.lock().unwrap();
        if store.get(&id).is_some_and(|r| r.tenant_id == tenant_id) {
            store.remove(&id);
        }
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryLogStore {
    entries: Mutex<Vec<ExecutionLogEntry>>,
}

impl InMemoryLogStore {
    pub fn entries(&self) -> Vec<ExecutionLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl ExecutionLogStore for InMemoryLogStore {
    fn append(
        &self,
        entry: ExecutionLogEntry,
    ) -> impl Future<Output = Result<ExecutionLogEntry, RingflowError>> + Send {
        self.entries.lock().unwrap().push(entry.clone());
        async { Ok(entry) }
    }

    fn recent(
        &self,
        tenant_id: TenantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ExecutionLogEntry>, RingflowError>> + Send {
        let entries = self.entries.lock().unwrap();
        let mut r: Vec<_> = entries
            .iter()
            .filter(|e| e.tenant_id == tenant_id)
            .cloned()
            .collect();
        r.reverse();
        r.truncate(limit);
        async { Ok(r) }
    }
}

#[derive(Default)]
pub struct SpyPublisher {
    pub events: Mutex<Vec<Event>>,
}

impl EventPublisher for SpyPublisher {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), RingflowError>> + Send {
        self.events.lock().unwrap().push(event);
        async { Ok(()) }
    }
}

/// Handler double: records the rendered actions it receives and can be
/// configured to fail with a provider error.
pub struct RecordingHandler {
    kind: ActionKind,
    fail_with: Option<String>,
    executed: Mutex<Vec<Action>>,
}

impl RecordingHandler {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            fail_with: None,
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(kind: ActionKind, reason: &str) -> Self {
        Self {
            kind,
            fail_with: Some(reason.to_string()),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn executed(&self) -> Vec<Action> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionHandler for RecordingHandler {
    fn kind(&self) -> ActionKind {
        self.kind
    }

    async fn execute(&self, action: &Action, _event: &Event) -> Result<(), ActionFailure> {
        self.executed.lock().unwrap().push(action.clone());
        match &self.fail_with {
            Some(reason) => Err(ActionFailure::Provider(reason.clone())),
            None => Ok(()),
        }
    }
}
