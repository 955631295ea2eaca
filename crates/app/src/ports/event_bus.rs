//! Event bus port — publish side of the in-process event pipeline.

use std::future::Future;

use ringflow_domain::error::RingflowError;
use ringflow_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), RingflowError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), RingflowError>> + Send {
        (**self).publish(event)
    }
}
