//! Session timeline events.
//!
//! Recorded on the timeline sink after each committed transition:
//! - `SessionCreated` - New session booked
//! - `SessionUpdated` - Fields other than the schedule changed
//! - `SessionRescheduled` - Start or end moved
//! - `SessionCancelled` - Session cancelled
//! - `SessionConfirmed` - Photographer confirmed
//! - `SessionClientConfirmed` - Client confirmed
//! - `SessionNoteAdded` - Participant left a note
//! - `ReminderDispatched` - Reminder attempt, delivered or not

use serde::{Deserialize, Serialize};

use super::{FieldChange, ReminderKind};
use crate::domain::foundation::{domain_event, EventId, SessionId, Timestamp, UserId};
use crate::domain::notification::NotDeliveredReason;

// ════════════════════════════════════════════════════════════════════════════
// SessionCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a session is booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub photographer_id: UserId,
    pub client_id: UserId,
    pub session_type: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    /// Policy version stamped on the session.
    pub policy_version: u32,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

domain_event!(
    SessionCreated,
    event_type = "session.created",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when type, location or notes change without a reschedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub updated_by: UserId,
    pub changes: Vec<FieldChange>,
    pub updated_at: Timestamp,
}

domain_event!(
    SessionUpdated,
    event_type = "session.updated",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionRescheduled
// ════════════════════════════════════════════════════════════════════════════

/// Published when start or end moved. `changes` also lists any other
/// fields edited in the same update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRescheduled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub updated_by: UserId,
    pub previous_start: Timestamp,
    pub previous_end: Timestamp,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub changes: Vec<FieldChange>,
    pub rescheduled_at: Timestamp,
}

domain_event!(
    SessionRescheduled,
    event_type = "session.rescheduled",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = rescheduled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionCancelled
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCancelled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub cancelled_by: UserId,
    pub reason: Option<String>,
    pub cancelled_at: Timestamp,
}

domain_event!(
    SessionCancelled,
    event_type = "session.cancelled",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = cancelled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionConfirmed
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfirmed {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub confirmed_by: UserId,
    pub confirmed_at: Timestamp,
}

domain_event!(
    SessionConfirmed,
    event_type = "session.confirmed",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = confirmed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionClientConfirmed
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClientConfirmed {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub client_id: UserId,
    pub confirmed_at: Timestamp,
}

domain_event!(
    SessionClientConfirmed,
    event_type = "session.client_confirmed",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = confirmed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionNoteAdded
// ════════════════════════════════════════════════════════════════════════════

/// A note left on the session timeline. Visible to both participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionNoteAdded {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub author_id: UserId,
    pub note: String,
    pub added_at: Timestamp,
}

domain_event!(
    SessionNoteAdded,
    event_type = "session.note_added",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = added_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ReminderDispatched
// ════════════════════════════════════════════════════════════════════════════

/// Audit entry for one reminder attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderDispatched {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub reminder: ReminderKind,
    pub recipient_id: UserId,
    pub delivered: bool,
    pub reason: Option<NotDeliveredReason>,
    /// Set when the dispatch itself failed (storage, lookups).
    pub error: Option<String>,
    pub dispatched_at: Timestamp,
}

domain_event!(
    ReminderDispatched,
    event_type = "reminder.dispatched",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = dispatched_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn cancelled_event_envelope_carries_payload() {
        let now = Timestamp::from_unix_millis(1_705_312_800_000).unwrap();
        let event = SessionCancelled {
            event_id: EventId::new(),
            session_id: SessionId::new(),
            cancelled_by: UserId::new("client-1").unwrap(),
            reason: Some("Sick".to_string()),
            cancelled_at: now,
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "session.cancelled");
        assert_eq!(envelope.aggregate_id, event.session_id.to_string());
        assert_eq!(envelope.payload["reason"], "Sick");
        assert_eq!(event.occurred_at(), now);
    }

    #[test]
    fn reminder_event_serializes_reason() {
        let event = ReminderDispatched {
            event_id: EventId::new(),
            session_id: SessionId::new(),
            reminder: ReminderKind::Final,
            recipient_id: UserId::new("client-1").unwrap(),
            delivered: false,
            reason: Some(NotDeliveredReason::TypeDisabled),
            error: None,
            dispatched_at: Timestamp::from_unix_millis(0).unwrap(),
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "reminder.dispatched");
        assert_eq!(envelope.payload["reminder"], "reminder-24h");
        assert_eq!(envelope.payload["reason"], "type-disabled");
    }
}
