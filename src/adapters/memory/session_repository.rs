//! In-memory session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::{ReminderKind, Session};
use crate::ports::{SessionFilter, SessionRepository};

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored session, ordered by start.
    pub async fn all(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self.sessions.read().await.values().cloned().collect();
        sessions.sort_by_key(|s| s.starts_at());
        sessions
    }
}

fn not_found(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        .with_detail("session_id", id.to_string())
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(DomainError::database(format!(
                "Session already exists: {}",
                session.id()
            )));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session.id()) {
            Some(existing) => {
                let mut updated = session.clone();
                // Flags written by the sweep survive unless the range moved.
                if existing.range() == session.range() {
                    for kind in [ReminderKind::Early, ReminderKind::Final] {
                        if existing.reminder_sent(kind) {
                            updated.mark_reminder_sent(kind);
                        }
                    }
                }
                *existing = updated;
                Ok(())
            }
            None => Err(not_found(session.id())),
        }
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        let mut found: Vec<Session> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        found.sort_by_key(|s| s.starts_at());
        Ok(found)
    }

    async fn set_reminder_sent(
        &self,
        id: &SessionId,
        kind: ReminderKind,
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.mark_reminder_sent(kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionTypeId, TimeRange, Timestamp, UserId};
    use crate::domain::policy::CancellationPolicy;
    use crate::domain::session::{NewSession, SessionChanges};

    fn at_hour(h: i64) -> Timestamp {
        Timestamp::from_unix_millis(1_705_312_800_000)
            .unwrap()
            .plus_hours(h)
    }

    fn session(start: i64) -> Session {
        Session::book(
            SessionId::new(),
            NewSession {
                photographer_id: UserId::new("p-1").unwrap(),
                client_id: UserId::new("c-1").unwrap(),
                session_type_id: SessionTypeId::new(),
                session_type_name: "Portrait".to_string(),
                location: "Studio".to_string(),
                notes: None,
                range: TimeRange::new(at_hour(start), at_hour(start + 1)).unwrap(),
            },
            CancellationPolicy::baseline(at_hour(-100)).snapshot(),
            at_hour(-100),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn find_sessions_orders_by_start() {
        let repo = InMemorySessionRepository::new();
        for start in [5, 1, 3] {
            repo.save(&session(start)).await.unwrap();
        }

        let found = repo.find_sessions(&SessionFilter::new()).await.unwrap();
        let starts: Vec<Timestamp> = found.iter().map(|s| s.starts_at()).collect();
        assert_eq!(starts, vec![at_hour(1), at_hour(3), at_hour(5)]);
    }

    #[tokio::test]
    async fn update_of_unknown_session_fails() {
        let repo = InMemorySessionRepository::new();
        let err = repo.update(&session(1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn reminder_flag_write_keeps_concurrent_edits() {
        let repo = InMemorySessionRepository::new();
        let original = session(1);
        repo.save(&original).await.unwrap();

        // A request edits the session after the sweep loaded its copy
        let mut edited = original.clone();
        edited
            .apply_changes(
                SessionChanges {
                    location: Some("Rooftop".to_string()),
                    ..SessionChanges::default()
                },
                at_hour(-10),
            )
            .unwrap();
        repo.update(&edited).await.unwrap();

        repo.set_reminder_sent(original.id(), ReminderKind::Final)
            .await
            .unwrap();

        let stored = repo.find_by_id(original.id()).await.unwrap().unwrap();
        assert_eq!(stored.location(), "Rooftop");
        assert!(stored.reminder_sent(ReminderKind::Final));
    }

    #[tokio::test]
    async fn stale_copy_does_not_clear_reminder_flag() {
        let repo = InMemorySessionRepository::new();
        let original = session(30);
        repo.save(&original).await.unwrap();
        repo.set_reminder_sent(original.id(), ReminderKind::Early)
            .await
            .unwrap();

        let mut stale = original.clone();
        stale
            .apply_changes(
                SessionChanges {
                    notes: Some("Bring props".to_string()),
                    ..SessionChanges::default()
                },
                at_hour(0),
            )
            .unwrap();
        repo.update(&stale).await.unwrap();

        let stored = repo.find_by_id(original.id()).await.unwrap().unwrap();
        assert!(stored.reminder_sent(ReminderKind::Early));
        assert_eq!(stored.notes(), Some("Bring props"));
    }

    #[tokio::test]
    async fn moving_only_the_end_rearms_reminders() {
        let repo = InMemorySessionRepository::new();
        let original = session(30);
        repo.save(&original).await.unwrap();
        for kind in [ReminderKind::Early, ReminderKind::Final] {
            repo.set_reminder_sent(original.id(), kind).await.unwrap();
        }

        let mut rescheduled = repo.find_by_id(original.id()).await.unwrap().unwrap();
        rescheduled
            .apply_changes(
                SessionChanges {
                    range: Some(TimeRange::new(at_hour(30), at_hour(32)).unwrap()),
                    ..SessionChanges::default()
                },
                at_hour(0),
            )
            .unwrap();
        repo.update(&rescheduled).await.unwrap();

        let stored = repo.find_by_id(original.id()).await.unwrap().unwrap();
        assert_eq!(stored.ends_at(), at_hour(32));
        assert!(!stored.reminder_sent(ReminderKind::Early));
        assert!(!stored.reminder_sent(ReminderKind::Final));
    }
}
