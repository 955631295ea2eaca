//! Trigger event catalog and the event envelope.
//!
//! Every event flowing through the pipeline carries a type from the
//! catalog below. The catalog is the single registry of trigger
//! identifiers — adding a product event means adding a variant here, not
//! scattering string literals through the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::{EventId, TenantId};
use crate::time::Timestamp;

/// A trigger identifier from the event catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// A call was answered and completed.
    CallCompleted,
    /// A call rang out or hit voicemail.
    CallMissed,
    /// A new lead was captured.
    LeadCreated,
    /// A lead moved to a different pipeline status.
    LeadStatusChanged,
    /// An appointment was booked.
    AppointmentScheduled,
    /// An appointment was cancelled.
    AppointmentCancelled,
    /// Tenant crossed 80% of its included usage.
    UsageThreshold80,
    /// Tenant crossed 100% of its included usage.
    UsageThreshold100,
    /// A trial subscription started.
    TrialStarted,
    /// A trial subscription is about to end.
    TrialEndingSoon,
    /// A trial subscription ended.
    TrialEnded,
    /// Reserved type for synthetic scheduler ticks.
    SchedulerTick,
}

/// Every trigger identifier in the catalog.
pub const ALL_TRIGGERS: &[TriggerEvent] = &[
    TriggerEvent::CallCompleted,
    TriggerEvent::CallMissed,
    TriggerEvent::LeadCreated,
    TriggerEvent::LeadStatusChanged,
    TriggerEvent::AppointmentScheduled,
    TriggerEvent::AppointmentCancelled,
    TriggerEvent::UsageThreshold80,
    TriggerEvent::UsageThreshold100,
    TriggerEvent::TrialStarted,
    TriggerEvent::TrialEndingSoon,
    TriggerEvent::TrialEnded,
    TriggerEvent::SchedulerTick,
];

impl TriggerEvent {
    /// Wire identifier as used by the management API and event publishers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CallCompleted => "call:completed",
            Self::CallMissed => "call:missed",
            Self::LeadCreated => "lead:created",
            Self::LeadStatusChanged => "lead:statusChanged",
            Self::AppointmentScheduled => "appointment:scheduled",
            Self::AppointmentCancelled => "appointment:cancelled",
            Self::UsageThreshold80 => "usage:threshold80",
            Self::UsageThreshold100 => "usage:threshold100",
            Self::TrialStarted => "trial:started",
            Self::TrialEndingSoon => "trial:endingSoon",
            Self::TrialEnded => "trial:ended",
            Self::SchedulerTick => "scheduler:tick",
        }
    }

    /// Payload fields this event type guarantees to carry.
    ///
    /// Rule authors reference these in conditions and `{{field}}` templates.
    #[must_use]
    pub fn payload_fields(self) -> &'static [&'static str] {
        match self {
            Self::CallCompleted => &[
                "callId",
                "callerName",
                "callerPhone",
                "durationSeconds",
                "outcome",
            ],
            Self::CallMissed => &["callId", "callerName", "callerPhone"],
            Self::LeadCreated => &["leadId", "name", "phone", "email", "source"],
            Self::LeadStatusChanged => &["leadId", "name", "phone", "previousStatus", "status"],
            Self::AppointmentScheduled => &["appointmentId", "leadId", "name", "phone", "startsAt"],
            Self::AppointmentCancelled => &["appointmentId", "leadId", "name", "phone"],
            Self::UsageThreshold80 | Self::UsageThreshold100 => {
                &["minutesUsed", "minutesIncluded", "percentUsed"]
            }
            Self::TrialStarted => &["ownerName", "ownerEmail", "endsAt"],
            Self::TrialEndingSoon => &["ownerName", "ownerEmail", "daysLeft", "endsAt"],
            Self::TrialEnded => &["ownerName", "ownerEmail"],
            Self::SchedulerTick => &["job", "firedAt"],
        }
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a catalog trigger identifier.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown trigger event: {0}")]
pub struct ParseTriggerError(pub String);

impl FromStr for TriggerEvent {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_TRIGGERS
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseTriggerError(s.to_string()))
    }
}

impl Serialize for TriggerEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TriggerEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A tenant-scoped notification that something happened in the product.
///
/// Events are ephemeral: they flow through the matching pipeline and are
/// only referenced (by trigger type) from the execution log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub tenant_id: TenantId,
    pub trigger: TriggerEvent,
    /// Always a JSON object; enforced at the publish boundary.
    pub payload: serde_json::Value,
    pub occurred_at: Timestamp,
}

impl Event {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(tenant_id: TenantId, trigger: TriggerEvent, payload: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            tenant_id,
            trigger,
            payload,
            occurred_at: crate::time::now(),
        }
    }
}
