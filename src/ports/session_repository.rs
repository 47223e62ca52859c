//! Session repository port.
//!
//! Shared by the booking handlers and the reminder sweep. The sweep only
//! ever flips reminder flags, through `set_reminder_sent`, so it never
//! overwrites fields owned by the request path.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, TimeRange, Timestamp, UserId};
use crate::domain::session::{ReminderKind, Session, SessionStatus};

/// Range/status query over sessions. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub photographer_id: Option<UserId>,
    pub client_id: Option<UserId>,
    pub statuses: Option<Vec<SessionStatus>>,
    /// Only sessions starting strictly after this instant.
    pub starts_after: Option<Timestamp>,
    /// Only sessions whose range overlaps this one (half-open).
    pub overlapping: Option<TimeRange>,
}

impl SessionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_photographer(photographer_id: UserId) -> Self {
        Self {
            photographer_id: Some(photographer_id),
            ..Self::default()
        }
    }

    /// Scheduled, confirmed or client-confirmed sessions starting after `now`.
    pub fn upcoming_active(now: Timestamp) -> Self {
        Self {
            statuses: Some(SessionStatus::ACTIVE.to_vec()),
            starts_after: Some(now),
            ..Self::default()
        }
    }

    pub fn with_client(mut self, client_id: UserId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_statuses(mut self, statuses: impl Into<Vec<SessionStatus>>) -> Self {
        self.statuses = Some(statuses.into());
        self
    }

    pub fn overlapping(mut self, range: TimeRange) -> Self {
        self.overlapping = Some(range);
        self
    }

    /// Reference predicate; adapters that filter in storage must agree.
    pub fn matches(&self, session: &Session) -> bool {
        if let Some(id) = &self.photographer_id {
            if session.photographer_id() != id {
                return false;
            }
        }
        if let Some(id) = &self.client_id {
            if session.client_id() != id {
                return false;
            }
        }
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&session.status()) {
                return false;
            }
        }
        if let Some(after) = &self.starts_after {
            if !session.starts_at().is_after(after) {
                return false;
            }
        }
        if let Some(range) = &self.overlapping {
            if !session.range().overlaps(range) {
                return false;
            }
        }
        true
    }
}

/// Repository port for Session aggregate persistence.
///
/// Sessions are never deleted; cancellation is a status.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Replace an existing session.
    ///
    /// Reminder flags already stored stay set unless the start or end
    /// changed, so a copy loaded before the sweep ran cannot clear them.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Sessions matching `filter`, ordered by start time ascending.
    async fn find_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError>;

    /// Sets one reminder flag to true without touching other fields.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    async fn set_reminder_sent(&self, id: &SessionId, kind: ReminderKind)
        -> Result<(), DomainError>;
}
