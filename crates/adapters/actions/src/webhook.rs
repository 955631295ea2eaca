//! Webhook action handler — calls arbitrary tenant-configured endpoints.

use std::time::Duration;

use async_trait::async_trait;

use ringflow_app::ports::{ActionFailure, ActionHandler};
use ringflow_domain::event::Event;
use ringflow_domain::rule::{Action, ActionKind};

use crate::provider::map_transport_error;

/// Calls the webhook's URL with the event payload as JSON body.
pub struct WebhookHandler {
    client: reqwest::Client,
}

impl WebhookHandler {
    /// Build a handler with the given per-request deadline.
    ///
    /// # Errors
    ///
    /// Returns a [`reqwest::Error`] if the client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ActionHandler for WebhookHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::Webhook
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::Webhook { url, method } = action else {
            return Err(ActionFailure::Validation(format!(
                "webhook handler received a {} action",
                action.kind()
            )));
        };

        let url: reqwest::Url = url
            .parse()
            .map_err(|err| ActionFailure::Validation(format!("invalid webhook url: {err}")))?;
        let method = reqwest::Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|_| ActionFailure::Validation(format!("invalid webhook method: {method}")))?;

        let mut request = self.client.request(method.clone(), url);
        // GET carries the payload in no body; everything else posts it.
        if method != reqwest::Method::GET {
            request = request.json(&event.payload);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ActionFailure::Provider(format!(
                "webhook returned {status}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringflow_domain::event::TriggerEvent;
    use ringflow_domain::id::TenantId;
    use serde_json::json;

    fn handler() -> WebhookHandler {
        WebhookHandler::new(Duration::from_secs(1)).unwrap()
    }

    fn event() -> Event {
        Event::new(TenantId::new(), TriggerEvent::LeadCreated, json!({}))
    }

    #[tokio::test]
    async fn should_reject_invalid_url() {
        let action = Action::Webhook {
            url: "not a url".to_string(),
            method: "POST".to_string(),
        };
        let result = handler().execute(&action, &event()).await;
        assert!(matches!(result, Err(ActionFailure::Validation(_))));
    }

    #[tokio::test]
    async fn should_reject_invalid_method() {
        let action = Action::Webhook {
            url: "https://example.com/hook".to_string(),
            method: "TELEPORT IT".to_string(),
        };
        let result = handler().execute(&action, &event()).await;
        assert!(matches!(
            result,
            Err(ActionFailure::Validation(reason)) if reason.contains("method")
        ));
    }

    #[tokio::test]
    async fn should_report_provider_failure_for_unreachable_endpoint() {
        let action = Action::Webhook {
            url: "http://127.0.0.1:1/hook".to_string(),
            method: "POST".to_string(),
        };
        let result = handler().execute(&action, &event()).await;
        assert!(matches!(
            result,
            Err(ActionFailure::Provider(_) | ActionFailure::Timeout)
        ));
    }
}
