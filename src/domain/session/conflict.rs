//! Double-booking predicate.

use super::Session;
use crate::domain::foundation::{SessionId, TimeRange, UserId};

/// First non-cancelled session of `photographer_id` overlapping `range`,
/// skipping `exclude` (the session being edited).
pub fn find_conflict<'a, I>(
    sessions: I,
    photographer_id: &UserId,
    range: &TimeRange,
    exclude: Option<&SessionId>,
) -> Option<&'a Session>
where
    I: IntoIterator<Item = &'a Session>,
{
    sessions.into_iter().find(|s| {
        s.photographer_id() == photographer_id
            && Some(s.id()) != exclude
            && s.blocks(range)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionTypeId, Timestamp};
    use crate::domain::policy::PolicySnapshot;
    use crate::domain::session::NewSession;

    fn at_minute(m: i64) -> Timestamp {
        Timestamp::from_unix_millis(1_705_312_800_000)
            .unwrap()
            .plus_minutes(m)
    }

    fn range(a: i64, b: i64) -> TimeRange {
        TimeRange::new(at_minute(a), at_minute(b)).unwrap()
    }

    fn session(photographer: &str, a: i64, b: i64) -> Session {
        Session::book(
            SessionId::new(),
            NewSession {
                photographer_id: UserId::new(photographer).unwrap(),
                client_id: UserId::new("client").unwrap(),
                session_type_id: SessionTypeId::new(),
                session_type_name: "Portrait".to_string(),
                location: "Studio".to_string(),
                notes: None,
                range: range(a, b),
            },
            PolicySnapshot {
                version: 0,
                min_hours_cancel: 24,
                min_hours_reschedule: 24,
                tolerance_minutes: 0,
            },
            at_minute(-10_000),
        )
        .unwrap()
    }

    #[test]
    fn detects_partial_overlap() {
        let existing = vec![session("p1", 0, 60)];
        let p1 = UserId::new("p1").unwrap();
        assert!(find_conflict(&existing, &p1, &range(30, 90), None).is_some());
    }

    #[test]
    fn back_to_back_is_not_a_conflict() {
        let existing = vec![session("p1", 0, 60)];
        let p1 = UserId::new("p1").unwrap();
        assert!(find_conflict(&existing, &p1, &range(60, 120), None).is_none());
        assert!(find_conflict(&existing, &p1, &range(-60, 0), None).is_none());
    }

    #[test]
    fn other_photographers_do_not_conflict() {
        let existing = vec![session("p2", 0, 60)];
        let p1 = UserId::new("p1").unwrap();
        assert!(find_conflict(&existing, &p1, &range(0, 60), None).is_none());
    }

    #[test]
    fn excluded_session_is_ignored() {
        let existing = vec![session("p1", 0, 60)];
        let p1 = UserId::new("p1").unwrap();
        let own = *existing[0].id();
        assert!(find_conflict(&existing, &p1, &range(15, 75), Some(&own)).is_none());
    }

    #[test]
    fn cancelled_sessions_free_their_slot() {
        let mut cancelled = session("p1", 0, 60);
        cancelled.cancel(None, at_minute(-5_000)).unwrap();
        let existing = vec![cancelled];
        let p1 = UserId::new("p1").unwrap();
        assert!(find_conflict(&existing, &p1, &range(0, 60), None).is_none());
    }
}
