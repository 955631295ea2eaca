//! Notify action handler — in-app notifications via the tracing pipeline.
//!
//! Notifications land on a dedicated tracing target that the surrounding
//! product forwards to its in-app inbox.

use async_trait::async_trait;

use ringflow_app::ports::{ActionFailure, ActionHandler};
use ringflow_domain::event::Event;
use ringflow_domain::rule::{Action, ActionKind};

pub struct NotifyHandler;

#[async_trait]
impl ActionHandler for NotifyHandler {
    fn kind(&self) -> ActionKind {
        ActionKind::Notify
    }

    async fn execute(&self, action: &Action, event: &Event) -> Result<(), ActionFailure> {
        let Action::Notify { message } = action else {
            return Err(ActionFailure::Validation(format!(
                "notify handler received a {} action",
                action.kind()
            )));
        };
        if message.trim().is_empty() {
            return Err(ActionFailure::Validation(
                "message must not be blank".to_string(),
            ));
        }

        tracing::info!(
            target: "ringflow::notify",
            tenant = %event.tenant_id,
            trigger = %event.trigger,
            message,
            "notification"
        );
        Ok(())
    }
}
