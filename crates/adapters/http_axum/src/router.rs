//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use ringflow_app::ports::{EventPublisher, ExecutionLogStore, RuleRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the management API under `/api` and a `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<RR, LS, P>(state: AppState<RR, LS, P>) -> Router
where
    RR: RuleRepository + Send + Sync + 'static,
    LS: ExecutionLogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::tenant::TENANT_HEADER;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use ringflow_app::gateway::EventGateway;
    use ringflow_app::scheduler::Scheduler;
    use ringflow_app::services::rule_service::RuleService;
    use ringflow_app::services::template_service::TemplateService;
    use ringflow_domain::error::RingflowError;
    use ringflow_domain::event::{Event, TriggerEvent};
    use ringflow_domain::execution_log::ExecutionLogEntry;
    use ringflow_domain::id::{RuleId, TenantId};
    use ringflow_domain::rule::AutomationRule;
    use tower::ServiceExt;

    struct StubRuleRepo;
    struct StubLogStore;
    struct StubPublisher;

    impl RuleRepository for StubRuleRepo {
        async fn create(&self, rule: AutomationRule) -> Result<AutomationRule, RingflowError> {
            Ok(rule)
        }
        async fn get(
            &self,
            _tenant_id: TenantId,
            _id: RuleId,
        ) -> Result<Option<AutomationRule>, RingflowError> {
            Ok(None)
        }
        async fn list(&self, _tenant_id: TenantId) -> Result<Vec<AutomationRule>, RingflowError> {
            Ok(vec![])
        }
        async fn find_enabled(
            &self,
            _tenant_id: TenantId,
            _trigger: TriggerEvent,
        ) -> Result<Vec<AutomationRule>, RingflowError> {
            Ok(vec![])
        }
        async fn tenants_with_trigger(
            &self,
            _trigger: TriggerEvent,
        ) -> Result<Vec<TenantId>, RingflowError> {
            Ok(vec![])
        }
        async fn update(&self, rule: AutomationRule) -> Result<AutomationRule, RingflowError> {
            Ok(rule)
        }
        async fn delete(&self, _tenant_id: TenantId, _id: RuleId) -> Result<(), RingflowError> {
            Ok(())
        }
    }

    impl ringflow_app::ports::ExecutionLogStore for StubLogStore {
        async fn append(
            &self,
            entry: ExecutionLogEntry,
        ) -> Result<ExecutionLogEntry, RingflowError> {
            Ok(entry)
        }
        async fn recent(
            &self,
            _tenant_id: TenantId,
            _limit: usize,
        ) -> Result<Vec<ExecutionLogEntry>, RingflowError> {
            Ok(vec![])
        }
    }

    impl EventPublisher for StubPublisher {
        async fn publish(&self, _event: Event) -> Result<(), RingflowError> {
            Ok(())
        }
    }

    fn test_state() -> AppState<StubRuleRepo, StubLogStore, StubPublisher> {
        AppState::new(
            RuleService::new(StubRuleRepo),
            TemplateService::new(StubRuleRepo),
            StubLogStore,
            Scheduler::new(StubRuleRepo, EventGateway::new(StubPublisher)),
        )
    }

    fn tenant_header() -> String {
        TenantId::new().to_string()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_reject_rules_request_without_tenant_header() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/rules")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_list_rules_for_tenant() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/rules")
                    .header(TENANT_HEADER, tenant_header())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn should_create_rule_and_return_created() {
        let app = build(test_state());
        let body = serde_json::json!({
            "name": "Text back missed calls",
            "triggerEvent": "call:missed",
            "actions": [
                {"type": "sendSms", "phoneField": "callerPhone", "message": "We missed you"}
            ]
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/rules")
                    .header(TENANT_HEADER, tenant_header())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["triggerEvent"], "call:missed");
        assert_eq!(json["enabled"], true);
        assert_eq!(json["priority"], 0);
        assert!(json["id"].is_string());
    }

    #[tokio::test]
    async fn should_reject_rule_with_unknown_trigger() {
        let app = build(test_state());
        let body = serde_json::json!({
            "name": "Bad trigger",
            "triggerEvent": "call:exploded",
            "actions": [{"type": "notify", "message": "x"}]
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/rules")
                    .header(TENANT_HEADER, tenant_header())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn should_reject_rule_without_actions() {
        let app = build(test_state());
        let body = serde_json::json!({
            "name": "No actions",
            "triggerEvent": "lead:created",
            "actions": []
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/rules")
                    .header(TENANT_HEADER, tenant_header())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_rule() {
        let app = build(test_state());
        let body = serde_json::json!({
            "name": "Renamed",
            "triggerEvent": "lead:created",
            "conditions": [],
            "actions": [{"type": "notify", "message": "x"}],
            "enabled": true,
            "priority": 1
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/rules/{}", RuleId::new()))
                    .header(TENANT_HEADER, tenant_header())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_malformed_rule_id_on_delete() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/rules/not-a-uuid")
                    .header(TENANT_HEADER, tenant_header())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_list_execution_log() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/logs?limit=10")
                    .header(TENANT_HEADER, tenant_header())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_templates_without_tenant_header() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/templates")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(!json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_install_template_for_tenant() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/templates/missed-call-text-back/install")
                    .header(TENANT_HEADER, tenant_header())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["triggerEvent"], "call:missed");
        assert_eq!(json["enabled"], true);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_template() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/templates/no-such-template/install")
                    .header(TENANT_HEADER, tenant_header())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_report_scheduler_status() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/scheduler/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let names: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["name"].as_str().unwrap().to_string())
            .collect();
        assert!(names.contains(&"trialSweep".to_string()));
        assert_eq!(json[0]["state"], "IDLE");
    }

    #[tokio::test]
    async fn should_accept_manual_scheduler_run() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/scheduler/run/usageSweep")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_scheduler_job() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/scheduler/run/bogusSweep")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
