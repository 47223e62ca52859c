//! Session aggregate.
//!
//! A session is one booked engagement between a photographer and a client.
//! Every mutating method either applies the whole transition or leaves the
//! session untouched. Lead-time checks live on the aggregate
//! (`check_lead_time`) but are invoked by the command handlers, which need
//! the typed violation for their error.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{FieldChange, ReminderKind, SessionChanges, SessionDiff, SessionStatus};
use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, SessionTypeId, StateMachine, TimeRange, Timestamp, UserId,
};
use crate::domain::policy::{check_lead_time, LeadTimeViolation, PolicyAction, PolicySnapshot};

/// Maximum length for the location field.
pub const MAX_LOCATION_LENGTH: usize = 500;

/// Maximum length for free-text notes.
pub const MAX_NOTES_LENGTH: usize = 5000;

/// Input for booking a new session. Lookups (client, type) are resolved by
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub photographer_id: UserId,
    pub client_id: UserId,
    pub session_type_id: SessionTypeId,
    pub session_type_name: String,
    pub location: String,
    pub notes: Option<String>,
    pub range: TimeRange,
}

/// Every stored field, for rebuilding a session from persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParts {
    pub id: SessionId,
    pub photographer_id: UserId,
    pub client_id: UserId,
    pub session_type_id: SessionTypeId,
    pub session_type_name: String,
    pub location: String,
    pub notes: Option<String>,
    pub range: TimeRange,
    pub status: SessionStatus,
    pub policy: PolicySnapshot,
    pub reminder_48_sent: bool,
    pub reminder_24_sent: bool,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<Timestamp>,
    pub photographer_confirmed_at: Option<Timestamp>,
    pub client_confirmed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Session aggregate.
///
/// # Invariants
///
/// - `range.end > range.start`
/// - `policy` is the snapshot taken at booking and never changes
/// - reminder flags only go from false to true, except that a reschedule
///   resets both
/// - `cancelled_at` is set exactly when `status` is `Cancelled`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: SessionId,
    photographer_id: UserId,
    client_id: UserId,
    session_type_id: SessionTypeId,
    session_type_name: String,
    location: String,
    notes: Option<String>,
    range: TimeRange,
    status: SessionStatus,
    policy: PolicySnapshot,
    reminder_48_sent: bool,
    reminder_24_sent: bool,
    cancellation_reason: Option<String>,
    cancelled_at: Option<Timestamp>,
    photographer_confirmed_at: Option<Timestamp>,
    client_confirmed_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Books a new session in `Scheduled` with the given policy snapshot.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if location is blank or too long, or notes are
    ///   too long
    pub fn book(
        id: SessionId,
        new: NewSession,
        policy: PolicySnapshot,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let location = validate_location(&new.location)?;
        let notes = validate_notes(new.notes)?;

        Ok(Self {
            id,
            photographer_id: new.photographer_id,
            client_id: new.client_id,
            session_type_id: new.session_type_id,
            session_type_name: new.session_type_name,
            location,
            notes,
            range: new.range,
            status: SessionStatus::Scheduled,
            policy,
            reminder_48_sent: false,
            reminder_24_sent: false,
            cancellation_reason: None,
            cancelled_at: None,
            photographer_confirmed_at: None,
            client_confirmed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(parts: SessionParts) -> Self {
        Self {
            id: parts.id,
            photographer_id: parts.photographer_id,
            client_id: parts.client_id,
            session_type_id: parts.session_type_id,
            session_type_name: parts.session_type_name,
            location: parts.location,
            notes: parts.notes,
            range: parts.range,
            status: parts.status,
            policy: parts.policy,
            reminder_48_sent: parts.reminder_48_sent,
            reminder_24_sent: parts.reminder_24_sent,
            cancellation_reason: parts.cancellation_reason,
            cancelled_at: parts.cancelled_at,
            photographer_confirmed_at: parts.photographer_confirmed_at,
            client_confirmed_at: parts.client_confirmed_at,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn photographer_id(&self) -> &UserId {
        &self.photographer_id
    }

    pub fn client_id(&self) -> &UserId {
        &self.client_id
    }

    pub fn session_type_id(&self) -> &SessionTypeId {
        &self.session_type_id
    }

    pub fn session_type_name(&self) -> &str {
        &self.session_type_name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn starts_at(&self) -> Timestamp {
        self.range.start()
    }

    pub fn ends_at(&self) -> Timestamp {
        self.range.end()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Policy terms captured at booking.
    pub fn policy(&self) -> &PolicySnapshot {
        &self.policy
    }

    pub fn reminder_sent(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::Early => self.reminder_48_sent,
            ReminderKind::Final => self.reminder_24_sent,
        }
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn cancelled_at(&self) -> Option<&Timestamp> {
        self.cancelled_at.as_ref()
    }

    pub fn photographer_confirmed_at(&self) -> Option<&Timestamp> {
        self.photographer_confirmed_at.as_ref()
    }

    pub fn client_confirmed_at(&self) -> Option<&Timestamp> {
        self.client_confirmed_at.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Photographer or client of this session.
    pub fn is_participant(&self, user_id: &UserId) -> bool {
        &self.photographer_id == user_id || &self.client_id == user_id
    }

    /// The other participant, if `user_id` is one of them.
    pub fn counterpart_of(&self, user_id: &UserId) -> Option<&UserId> {
        if &self.photographer_id == user_id {
            Some(&self.client_id)
        } else if &self.client_id == user_id {
            Some(&self.photographer_id)
        } else {
            None
        }
    }

    /// Whether this session occupies any part of `range`.
    pub fn blocks(&self, range: &TimeRange) -> bool {
        self.status.is_blocking() && self.range.overlaps(range)
    }

    /// Time from `now` until the session starts (negative once started).
    pub fn time_until_start(&self, now: &Timestamp) -> Duration {
        self.range.start().duration_since(now)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Policy
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks the snapshot window for `action` against the current start.
    pub fn check_lead_time(
        &self,
        action: PolicyAction,
        now: &Timestamp,
    ) -> Result<(), LeadTimeViolation> {
        check_lead_time(&self.policy, action, &self.range.start(), now)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies edits and returns the fields that actually changed.
    ///
    /// Moving start or end resets both reminder flags. An empty diff leaves
    /// the session untouched, including `updated_at`.
    ///
    /// # Errors
    ///
    /// - `SessionCancelled` / `InvalidStateTransition` for terminal sessions
    /// - `ValidationFailed` for a blank location or oversized notes
    pub fn apply_changes(
        &mut self,
        changes: SessionChanges,
        now: Timestamp,
    ) -> Result<SessionDiff, DomainError> {
        self.ensure_editable()?;

        let mut next = self.clone();
        let mut diff = SessionDiff::default();

        if let Some((type_id, type_name)) = changes.session_type {
            if type_id != next.session_type_id {
                diff.push(FieldChange::new(
                    "sessionType",
                    next.session_type_name.clone(),
                    type_name.clone(),
                ));
                next.session_type_id = type_id;
                next.session_type_name = type_name;
            }
        }

        if let Some(location) = changes.location {
            let location = validate_location(&location)?;
            if location != next.location {
                diff.push(FieldChange::new(
                    "location",
                    next.location.clone(),
                    location.clone(),
                ));
                next.location = location;
            }
        }

        if let Some(notes) = changes.notes {
            let notes = validate_notes(Some(notes))?;
            if notes != next.notes {
                diff.push(FieldChange::new("notes", next.notes.clone(), notes.clone()));
                next.notes = notes;
            }
        }

        if let Some(range) = changes.range {
            if range.start() != next.range.start() {
                diff.push(FieldChange::new(
                    "startsAt",
                    next.range.start().to_string(),
                    range.start().to_string(),
                ));
            }
            if range.end() != next.range.end() {
                diff.push(FieldChange::new(
                    "endsAt",
                    next.range.end().to_string(),
                    range.end().to_string(),
                ));
            }
            if range != next.range {
                next.range = range;
                next.reminder_48_sent = false;
                next.reminder_24_sent = false;
            }
        }

        if !diff.is_empty() {
            next.updated_at = now;
            *self = next;
        }
        Ok(diff)
    }

    /// Cancels the session. Returns `false` if it was already cancelled.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session is completed
    pub fn cancel(&mut self, reason: Option<String>, now: Timestamp) -> Result<bool, DomainError> {
        if self.status == SessionStatus::Cancelled {
            return Ok(false);
        }
        self.status = self.status.transition_to(SessionStatus::Cancelled)?;
        self.cancellation_reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self.cancelled_at = Some(now);
        self.updated_at = now;
        Ok(true)
    }

    /// Photographer confirmation. Returns `false` if already confirmed by
    /// either party.
    pub fn confirm_by_photographer(&mut self, now: Timestamp) -> Result<bool, DomainError> {
        self.ensure_editable()?;
        if self.status != SessionStatus::Scheduled {
            return Ok(false);
        }
        self.status = self.status.transition_to(SessionStatus::Confirmed)?;
        self.photographer_confirmed_at = Some(now);
        self.updated_at = now;
        Ok(true)
    }

    /// Client confirmation. Returns `false` if the client already confirmed.
    pub fn confirm_by_client(&mut self, now: Timestamp) -> Result<bool, DomainError> {
        self.ensure_editable()?;
        if self.status == SessionStatus::ClientConfirmed {
            return Ok(false);
        }
        self.status = self.status.transition_to(SessionStatus::ClientConfirmed)?;
        self.client_confirmed_at = Some(now);
        self.updated_at = now;
        Ok(true)
    }

    /// Flips a reminder flag. Returns `false` if it was already set.
    ///
    /// Does not touch `updated_at`; the reminder path owns only the flags.
    pub fn mark_reminder_sent(&mut self, kind: ReminderKind) -> bool {
        let flag = match kind {
            ReminderKind::Early => &mut self.reminder_48_sent,
            ReminderKind::Final => &mut self.reminder_24_sent,
        };
        let changed = !*flag;
        *flag = true;
        changed
    }

    fn ensure_editable(&self) -> Result<(), DomainError> {
        match self.status {
            SessionStatus::Cancelled => Err(DomainError::new(
                ErrorCode::SessionCancelled,
                "Cancelled sessions cannot be modified",
            )
            .with_detail("session_id", self.id.to_string())),
            SessionStatus::Completed => Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Completed sessions cannot be modified",
            )
            .with_detail("session_id", self.id.to_string())),
            _ => Ok(()),
        }
    }
}

fn validate_location(location: &str) -> Result<String, DomainError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(DomainError::validation("location", "Location is required"));
    }
    if location.chars().count() > MAX_LOCATION_LENGTH {
        return Err(DomainError::validation(
            "location",
            format!("Location must be {} characters or less", MAX_LOCATION_LENGTH),
        ));
    }
    Ok(location.to_string())
}

fn validate_notes(notes: Option<String>) -> Result<Option<String>, DomainError> {
    let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    if let Some(n) = &notes {
        if n.chars().count() > MAX_NOTES_LENGTH {
            return Err(DomainError::validation(
                "notes",
                format!("Notes must be {} characters or less", MAX_NOTES_LENGTH),
            ));
        }
    }
    Ok(notes)
}
