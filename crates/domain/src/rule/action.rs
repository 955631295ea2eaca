//! Action — the side effect performed when a rule fires.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload;

/// An operation executed when a rule's trigger fires and all conditions
/// pass.
///
/// Actions are a closed set: each variant carries exactly the fields its
/// handler requires. Fields named `*_field` reference the event payload
/// (e.g. `phone_field: "callerPhone"`); the remaining string fields may
/// contain `{{field}}` tokens resolved at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Text the number found at `phone_field` in the payload.
    #[serde(rename_all = "camelCase")]
    SendSms { phone_field: String, message: String },
    /// Email the address found at `email_field` in the payload.
    #[serde(rename_all = "camelCase")]
    SendEmail {
        email_field: String,
        subject: String,
        body: String,
    },
    /// Move the referenced lead to a new pipeline status.
    #[serde(rename_all = "camelCase")]
    UpdateLead {
        lead_id_field: String,
        status: String,
    },
    /// Assign the referenced lead to a team member.
    #[serde(rename_all = "camelCase")]
    AssignLead {
        lead_id_field: String,
        assignee: String,
    },
    /// Create a follow-up task.
    #[serde(rename_all = "camelCase")]
    CreateTask {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    /// Push the referenced lead to the connected CRM.
    #[serde(rename_all = "camelCase")]
    SyncCrm { lead_id_field: String },
    /// Post an in-app notification.
    #[serde(rename_all = "camelCase")]
    Notify { message: String },
    /// Call an external HTTP endpoint.
    #[serde(rename_all = "camelCase")]
    Webhook { url: String, method: String },
    /// Enroll the referenced lead in a follow-up sequence.
    #[serde(rename_all = "camelCase")]
    AddToSequence {
        lead_id_field: String,
        sequence_id: String,
    },
}

impl Action {
    /// The registry identifier for this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::SendSms { .. } => ActionKind::SendSms,
            Self::SendEmail { .. } => ActionKind::SendEmail,
            Self::UpdateLead { .. } => ActionKind::UpdateLead,
            Self::AssignLead { .. } => ActionKind::AssignLead,
            Self::CreateTask { .. } => ActionKind::CreateTask,
            Self::SyncCrm { .. } => ActionKind::SyncCrm,
            Self::Notify { .. } => ActionKind::Notify,
            Self::Webhook { .. } => ActionKind::Webhook,
            Self::AddToSequence { .. } => ActionKind::AddToSequence,
        }
    }

    /// Return a copy with `{{field}}` tokens substituted from the payload.
    ///
    /// Payload references (`*_field`) and the webhook method are taken
    /// literally; every other string field is a template. Unresolved
    /// tokens stay verbatim.
    #[must_use]
    pub fn rendered(&self, event_payload: &Value) -> Self {
        let mut action = self.clone();
        match &mut action {
            Self::SendSms { message, .. } => {
                *message = payload::render(message, event_payload);
            }
            Self::SendEmail { subject, body, .. } => {
                *subject = payload::render(subject, event_payload);
                *body = payload::render(body, event_payload);
            }
            Self::UpdateLead { status, .. } => {
                *status = payload::render(status, event_payload);
            }
            Self::AssignLead { assignee, .. } => {
                *assignee = payload::render(assignee, event_payload);
            }
            Self::CreateTask { title, notes } => {
                *title = payload::render(title, event_payload);
                if let Some(notes) = notes {
                    *notes = payload::render(notes, event_payload);
                }
            }
            Self::Notify { message } => {
                *message = payload::render(message, event_payload);
            }
            Self::Webhook { url, .. } => {
                *url = payload::render(url, event_payload);
            }
            Self::SyncCrm { .. } | Self::AddToSequence { .. } => {}
        }
        action
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind().fmt(f)
    }
}

/// Registry identifier for an action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    SendSms,
    SendEmail,
    UpdateLead,
    AssignLead,
    CreateTask,
    SyncCrm,
    Notify,
    Webhook,
    AddToSequence,
}

/// Every action identifier in the registry.
pub const ALL_ACTION_KINDS: &[ActionKind] = &[
    ActionKind::SendSms,
    ActionKind::SendEmail,
    ActionKind::UpdateLead,
    ActionKind::AssignLead,
    ActionKind::CreateTask,
    ActionKind::SyncCrm,
    ActionKind::Notify,
    ActionKind::Webhook,
    ActionKind::AddToSequence,
];

impl ActionKind {
    /// Wire identifier as used in the `type` tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SendSms => "sendSms",
            Self::SendEmail => "sendEmail",
            Self::UpdateLead => "updateLead",
            Self::AssignLead => "assignLead",
            Self::CreateTask => "createTask",
            Self::SyncCrm => "syncCrm",
            Self::Notify => "notify",
            Self::Webhook => "webhook",
            Self::AddToSequence => "addToSequence",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
