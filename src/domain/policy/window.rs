//! Lead-time window check.
//!
//! ```text
//! required = min_hours * 60 - tolerance_minutes
//! actual   = session_start - now           (minutes, rounded down)
//! reject when actual < required
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PolicySnapshot;
use crate::domain::foundation::Timestamp;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Which policy term governs the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyAction {
    Cancel,
    Reschedule,
}

impl PolicyAction {
    fn past_participle(&self) -> &'static str {
        match self {
            PolicyAction::Cancel => "cancelled",
            PolicyAction::Reschedule => "rescheduled",
        }
    }
}

/// The lead-time window was not met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadTimeViolation {
    pub action: PolicyAction,
    pub policy_version: u32,
    pub required_minutes: i64,
    pub actual_minutes: i64,
}

impl fmt::Display for LeadTimeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sessions must be {} at least {} in advance",
            self.action.past_participle(),
            format_lead_time(self.required_minutes)
        )
    }
}

/// `min_hours * 60 - tolerance_minutes` for the given action.
pub fn required_lead_minutes(policy: &PolicySnapshot, action: PolicyAction) -> i64 {
    let hours = match action {
        PolicyAction::Cancel => policy.min_hours_cancel,
        PolicyAction::Reschedule => policy.min_hours_reschedule,
    };
    i64::from(hours) * MINUTES_PER_HOUR - i64::from(policy.tolerance_minutes)
}

/// Checks that `session_start` is far enough from `now`.
pub fn check_lead_time(
    policy: &PolicySnapshot,
    action: PolicyAction,
    session_start: &Timestamp,
    now: &Timestamp,
) -> Result<(), LeadTimeViolation> {
    let required_minutes = required_lead_minutes(policy, action);
    let actual_minutes = session_start.minutes_from(now);

    if actual_minutes < required_minutes {
        return Err(LeadTimeViolation {
            action,
            policy_version: policy.version,
            required_minutes,
            actual_minutes,
        });
    }
    Ok(())
}

/// Renders a lead time in minutes, hours or days depending on magnitude.
///
/// Whole days print as days; anything under an hour prints as minutes;
/// everything else prints as hours with at most one decimal.
pub fn format_lead_time(minutes: i64) -> String {
    let minutes = minutes.max(0);

    if minutes < MINUTES_PER_HOUR {
        return plural(minutes, "minute");
    }
    if minutes % MINUTES_PER_DAY == 0 {
        return plural(minutes / MINUTES_PER_DAY, "day");
    }
    if minutes % MINUTES_PER_HOUR == 0 {
        return plural(minutes / MINUTES_PER_HOUR, "hour");
    }

    let hours = format!("{:.1}", minutes as f64 / MINUTES_PER_HOUR as f64);
    let hours = hours.strip_suffix(".0").unwrap_or(&hours);
    format!("{} hours", hours)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
