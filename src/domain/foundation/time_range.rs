//! Half-open time interval `[start, end)`.

use serde::{Deserialize, Serialize};

use super::{Timestamp, ValidationError};

/// A validated `[start, end)` interval with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// Creates a range, rejecting empty or inverted intervals.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if !end.is_after(&start) {
            return Err(ValidationError::invalid_format(
                "end",
                "End time must be after start time",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Half-open overlap: `start < other.end && end > other.start`.
    ///
    /// Back-to-back ranges (one ends exactly when the other starts) do not
    /// overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start.is_before(&other.end) && self.end.is_after(&other.start)
    }

    /// True when start and end fall on the same UTC calendar day.
    pub fn is_single_day(&self) -> bool {
        self.start.date() == self.end.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn rejects_end_before_or_equal_start() {
        let t = at("2024-01-15T10:00:00Z");
        assert!(TimeRange::new(t, t).is_err());
        assert!(TimeRange::new(t, t.plus_minutes(-1)).is_err());
    }

    #[test]
    fn partial_overlap_is_detected_both_ways() {
        let a = range("2024-01-15T10:00:00Z", "2024-01-15T11:00:00Z");
        let b = range("2024-01-15T10:30:00Z", "2024-01-15T11:30:00Z");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let a = range("2024-01-15T10:00:00Z", "2024-01-15T11:00:00Z");
        let b = range("2024-01-15T11:00:00Z", "2024-01-15T12:00:00Z");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_overlaps() {
        let outer = range("2024-01-15T09:00:00Z", "2024-01-15T18:00:00Z");
        let inner = range("2024-01-15T10:00:00Z", "2024-01-15T11:00:00Z");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn overnight_range_is_not_single_day() {
        assert!(range("2024-01-15T10:00:00Z", "2024-01-15T11:00:00Z").is_single_day());
        assert!(!range("2024-01-15T23:00:00Z", "2024-01-16T01:00:00Z").is_single_day());
    }
}
