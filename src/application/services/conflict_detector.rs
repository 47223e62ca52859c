//! Conflict Detector - double-booking check against the session store.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionId, TimeRange, UserId};
use crate::domain::session::{find_conflict, BookingError};
use crate::ports::{SessionFilter, SessionRepository};

/// Re-queries the store at mutation time; no lock is held between the
/// check and the write.
pub struct ConflictDetector {
    sessions: Arc<dyn SessionRepository>,
}

impl ConflictDetector {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// Id of a non-cancelled session of `photographer_id` overlapping
    /// `range`, ignoring `exclude`.
    pub async fn find_conflict(
        &self,
        photographer_id: &UserId,
        range: &TimeRange,
        exclude: Option<&SessionId>,
    ) -> Result<Option<SessionId>, DomainError> {
        let filter = SessionFilter::for_photographer(photographer_id.clone()).overlapping(*range);
        let candidates = self.sessions.find_sessions(&filter).await?;
        Ok(find_conflict(&candidates, photographer_id, range, exclude).map(|s| *s.id()))
    }

    /// Fails with `BookingError::Conflict` when the range is taken.
    pub async fn ensure_free(
        &self,
        photographer_id: &UserId,
        range: &TimeRange,
        exclude: Option<&SessionId>,
    ) -> Result<(), BookingError> {
        match self.find_conflict(photographer_id, range, exclude).await? {
            None => Ok(()),
            Some(conflicting_session) => {
                tracing::info!(
                    photographer_id = %photographer_id,
                    conflicting_session = %conflicting_session,
                    "Booking rejected: overlapping session"
                );
                Err(BookingError::Conflict { conflicting_session })
            }
        }
    }
}
