//! Availability matching.
//!
//! Decides whether a candidate booking range fits a photographer's weekly
//! availability. Pure and side-effect free.
//!
//! Rules, in order:
//! 1. The range must start and end on the same calendar day (no overnight
//!    sessions).
//! 2. A photographer with no slots accepts any same-day range.
//! 3. Otherwise some slot on the range's weekday must contain it entirely.

use serde::Serialize;

use super::AvailabilitySlot;
use crate::domain::foundation::TimeRange;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Outcome of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum AvailabilityDecision {
    Accepted,
    Rejected(String),
}

impl AvailabilityDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AvailabilityDecision::Accepted)
    }
}

/// Checks `range` against `slots`.
pub fn check_availability(slots: &[AvailabilitySlot], range: &TimeRange) -> AvailabilityDecision {
    if !range.is_single_day() {
        return AvailabilityDecision::Rejected(
            "Sessions must start and end on the same day".to_string(),
        );
    }

    if slots.is_empty() {
        return AvailabilityDecision::Accepted;
    }

    let start = range.start();
    let end = range.end();
    let day = start.weekday_from_sunday();
    let start_minutes = start.minutes_of_day();
    let end_minutes = end.minutes_of_day_rounded_up();

    if slots
        .iter()
        .any(|slot| slot.contains(day, start_minutes, end_minutes))
    {
        return AvailabilityDecision::Accepted;
    }

    let day_name = DAY_NAMES[day as usize];
    let windows: Vec<String> = slots
        .iter()
        .filter(|slot| slot.day_of_week() == day)
        .map(|slot| format!("{}-{}", slot.start_time(), slot.end_time()))
        .collect();

    if windows.is_empty() {
        AvailabilityDecision::Rejected(format!("Photographer is not available on {}", day_name))
    } else {
        AvailabilityDecision::Rejected(format!(
            "Requested time is outside working hours on {} ({})",
            day_name,
            windows.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use chrono::{DateTime, Utc};

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::new(at(start), at(end)).unwrap()
    }

    fn monday_nine_to_six() -> Vec<AvailabilitySlot> {
        vec![AvailabilitySlot::parse(1, "09:00", "18:00").unwrap()]
    }

    // 2024-01-15 is a Monday.

    #[test]
    fn accepts_range_inside_slot() {
        let decision = check_availability(
            &monday_nine_to_six(),
            &range("2024-01-15T10:00:00Z", "2024-01-15T11:00:00Z"),
        );
        assert!(decision.is_accepted());
    }

    #[test]
    fn slot_bounds_are_inclusive() {
        let decision = check_availability(
            &monday_nine_to_six(),
            &range("2024-01-15T09:00:00Z", "2024-01-15T18:00:00Z"),
        );
        assert!(decision.is_accepted());
    }

    #[test]
    fn rejects_range_spilling_past_slot_end() {
        let decision = check_availability(
            &monday_nine_to_six(),
            &range("2024-01-15T17:30:00Z", "2024-01-15T18:30:00Z"),
        );
        assert!(matches!(decision, AvailabilityDecision::Rejected(reason) if reason.contains("09:00-18:00")));
    }

    #[test]
    fn rejects_sub_minute_overrun_of_slot_end() {
        let decision = check_availability(
            &monday_nine_to_six(),
            &range("2024-01-15T17:00:00Z", "2024-01-15T18:00:30Z"),
        );
        assert!(!decision.is_accepted());
    }

    #[test]
    fn rejects_day_without_slots() {
        let decision = check_availability(
            &monday_nine_to_six(),
            &range("2024-01-16T10:00:00Z", "2024-01-16T11:00:00Z"),
        );
        assert_eq!(
            decision,
            AvailabilityDecision::Rejected("Photographer is not available on Tuesday".to_string())
        );
    }

    #[test]
    fn no_slots_means_open_door() {
        let decision = check_availability(&[], &range("2024-01-16T03:00:00Z", "2024-01-16T04:00:00Z"));
        assert!(decision.is_accepted());
    }

    #[test]
    fn overnight_rejected_even_with_open_door() {
        let decision = check_availability(&[], &range("2024-01-15T23:00:00Z", "2024-01-16T01:00:00Z"));
        assert!(!decision.is_accepted());
    }

    #[test]
    fn any_matching_slot_is_enough() {
        let slots = vec![
            AvailabilitySlot::parse(1, "09:00", "12:00").unwrap(),
            AvailabilitySlot::parse(1, "13:00", "18:00").unwrap(),
        ];
        assert!(check_availability(&slots, &range("2024-01-15T14:00:00Z", "2024-01-15T15:00:00Z")).is_accepted());
        assert!(!check_availability(&slots, &range("2024-01-15T11:30:00Z", "2024-01-15T13:30:00Z")).is_accepted());
    }
}
