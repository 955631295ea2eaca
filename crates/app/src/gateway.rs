//! Event gateway — the publish boundary of the pipeline.
//!
//! Domain subsystems (call handling, leads, billing, …) hand their state
//! transitions to [`EventGateway::publish`]. Unknown trigger types and
//! non-object payloads are rejected here, before anything reaches the
//! bus — never silently dropped mid-pipeline.

use ringflow_domain::error::{RingflowError, ValidationError};
use ringflow_domain::event::{Event, ParseTriggerError, TriggerEvent};
use ringflow_domain::id::TenantId;

use crate::ports::EventPublisher;

/// Validating publisher facade over the event bus.
pub struct EventGateway<P> {
    publisher: P,
}

impl<P: EventPublisher> EventGateway<P> {
    /// Create a gateway over the given publisher.
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// Publish an event given its wire-format trigger identifier.
    ///
    /// This is the entry point for the surrounding product subsystems;
    /// it returns as soon as the event is on the bus.
    ///
    /// # Errors
    ///
    /// Returns [`RingflowError::UnknownTrigger`] for identifiers outside
    /// the catalog and [`RingflowError::Validation`] for non-object
    /// payloads.
    pub async fn publish(
        &self,
        tenant_id: TenantId,
        trigger: &str,
        payload: serde_json::Value,
    ) -> Result<Event, RingflowError> {
        let trigger: TriggerEvent = trigger
            .parse()
            .map_err(|ParseTriggerError(s)| RingflowError::UnknownTrigger(s))?;
        self.publish_typed(tenant_id, trigger, payload).await
    }

    /// Publish an event whose trigger is already a catalog type.
    ///
    /// # Errors
    ///
    /// Returns [`RingflowError::Validation`] for non-object payloads, or
    /// a publisher error.
    pub async fn publish_typed(
        &self,
        tenant_id: TenantId,
        trigger: TriggerEvent,
        payload: serde_json::Value,
    ) -> Result<Event, RingflowError> {
        if !payload.is_object() {
            return Err(ValidationError::PayloadNotObject.into());
        }
        let event = Event::new(tenant_id, trigger, payload);
        tracing::debug!(tenant = %tenant_id, trigger = %trigger, event = %event.id, "event published");
        self.publisher.publish(event.clone()).await?;
        Ok(event)
    }
}
