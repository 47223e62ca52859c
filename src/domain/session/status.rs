//! Session lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Status of a booked session.
///
/// `Cancelled` and `Completed` are terminal. `Completed` is set by an
/// external batch process and is never reached through this crate's
/// commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Scheduled,
    Confirmed,
    ClientConfirmed,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Statuses the reminder sweep looks at.
    pub const ACTIVE: [SessionStatus; 3] = [
        SessionStatus::Scheduled,
        SessionStatus::Confirmed,
        SessionStatus::ClientConfirmed,
    ];

    /// Scheduled, confirmed or client-confirmed.
    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// Whether a session in this status occupies its time range.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, SessionStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::ClientConfirmed => "client-confirmed",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(SessionStatus::Scheduled),
            "confirmed" => Some(SessionStatus::Confirmed),
            "client-confirmed" => Some(SessionStatus::ClientConfirmed),
            "completed" => Some(SessionStatus::Completed),
            "cancelled" => Some(SessionStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for SessionStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Scheduled => vec![Confirmed, ClientConfirmed, Completed, Cancelled],
            Confirmed => vec![ClientConfirmed, Completed, Cancelled],
            ClientConfirmed => vec![Completed, Cancelled],
            Completed => vec![],
            Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn scheduled_can_be_confirmed_by_either_party() {
        assert!(SessionStatus::Scheduled.can_transition_to(&SessionStatus::Confirmed));
        assert!(SessionStatus::Scheduled.can_transition_to(&SessionStatus::ClientConfirmed));
    }

    #[test]
    fn client_confirmed_does_not_fall_back_to_confirmed() {
        assert!(!SessionStatus::ClientConfirmed.can_transition_to(&SessionStatus::Confirmed));
    }

    #[test]
    fn cancelled_and_completed_are_terminal() {
        assert!(SessionStatus::Cancelled.is_terminal());
        assert!(SessionStatus::Completed.is_terminal());
        assert!(!SessionStatus::Scheduled.is_terminal());
    }

    #[test]
    fn transition_out_of_cancelled_fails() {
        let err = SessionStatus::Cancelled
            .transition_to(SessionStatus::Scheduled)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn only_cancelled_stops_blocking_the_calendar() {
        assert!(SessionStatus::Completed.is_blocking());
        assert!(SessionStatus::ClientConfirmed.is_blocking());
        assert!(!SessionStatus::Cancelled.is_blocking());
        assert!(!SessionStatus::Completed.is_active());
    }

    #[test]
    fn names_round_trip_through_parse_and_serde() {
        for status in [
            SessionStatus::Scheduled,
            SessionStatus::ClientConfirmed,
            SessionStatus::Cancelled,
        ] {
            assert_eq!(SessionStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }
}
