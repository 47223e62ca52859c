//! Weekly availability slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock time in 24h `HH:mm`, stored as minutes since midnight.
///
/// `24:00` is accepted so that a slot can run to the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        if minutes > MINUTES_PER_DAY {
            return Err(ValidationError::out_of_range(
                "time_of_day",
                0,
                MINUTES_PER_DAY as i64,
                minutes as i64,
            ));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::invalid_format("time_of_day", format!("'{}' is not HH:mm", s));

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        let hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;

        if minutes > 59 || hours > 24 || (hours == 24 && minutes != 0) {
            return Err(invalid());
        }
        Ok(Self(hours * 60 + minutes))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// One recurring weekly window during which a photographer accepts bookings.
///
/// # Invariants
///
/// - `day_of_week` is 0 (Sunday) through 6 (Saturday)
/// - `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSlot")]
pub struct AvailabilitySlot {
    day_of_week: u8,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlot {
    day_of_week: u8,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
}

impl TryFrom<RawSlot> for AvailabilitySlot {
    type Error = ValidationError;

    fn try_from(raw: RawSlot) -> Result<Self, Self::Error> {
        AvailabilitySlot::new(raw.day_of_week, raw.start_time, raw.end_time)
    }
}

impl AvailabilitySlot {
    pub fn new(
        day_of_week: u8,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Result<Self, ValidationError> {
        if day_of_week > 6 {
            return Err(ValidationError::out_of_range(
                "day_of_week",
                0,
                6,
                day_of_week as i64,
            ));
        }
        if start_time >= end_time {
            return Err(ValidationError::invalid_format(
                "end_time",
                format!("slot end {} must be after start {}", end_time, start_time),
            ));
        }
        Ok(Self {
            day_of_week,
            start_time,
            end_time,
        })
    }

    /// Convenience constructor from `HH:mm` strings.
    pub fn parse(day_of_week: u8, start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(day_of_week, start.parse()?, end.parse()?)
    }

    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    pub fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    pub fn end_time(&self) -> TimeOfDay {
        self.end_time
    }

    /// True when `[start_minutes, end_minutes]` lies inside this slot on `day`.
    pub fn contains(&self, day: u8, start_minutes: u16, end_minutes: u16) -> bool {
        self.day_of_week == day
            && self.start_time.minutes() <= start_minutes
            && end_minutes <= self.end_time.minutes()
    }
}
