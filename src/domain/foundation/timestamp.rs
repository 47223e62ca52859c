//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    ///
    /// Business rules never call this directly; they take "now" from the
    /// injected `Clock` port.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` when the value is outside chrono's supported range.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(Self)
    }

    /// Returns the timestamp as Unix milliseconds.
    pub fn as_unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Minutes from `now` until this timestamp, rounded down (negative if
    /// past). `minutes_from(now) < n` holds exactly when the true distance is
    /// under `n` minutes.
    pub fn minutes_from(&self, now: &Timestamp) -> i64 {
        self.duration_since(now).num_milliseconds().div_euclid(60_000)
    }

    /// Creates a new timestamp offset by the given number of minutes.
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }

    /// Creates a new timestamp offset by the given number of hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + Duration::hours(hours))
    }

    /// Calendar date (UTC).
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Day of week with Sunday = 0 through Saturday = 6.
    pub fn weekday_from_sunday(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    /// Minutes elapsed since midnight (UTC).
    pub fn minutes_of_day(&self) -> u16 {
        (self.0.hour() * 60 + self.0.minute()) as u16
    }

    /// Minutes since midnight, counting any started minute as a whole one.
    pub fn minutes_of_day_rounded_up(&self) -> u16 {
        let partial = self.0.second() > 0 || self.0.nanosecond() > 0;
        self.minutes_of_day() + u16::from(partial)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
