//! Cancellation policy versions and snapshots.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Upper bound for the hour-based settings (one year).
pub const MAX_POLICY_HOURS: u32 = 24 * 365;

/// Settings supplied when publishing a new policy version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySettings {
    pub min_hours_cancel: u32,
    pub min_hours_reschedule: u32,
    pub tolerance_minutes: u32,
}

impl PolicySettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, hours) in [
            ("min_hours_cancel", self.min_hours_cancel),
            ("min_hours_reschedule", self.min_hours_reschedule),
        ] {
            if hours > MAX_POLICY_HOURS {
                return Err(ValidationError::out_of_range(
                    field,
                    0,
                    MAX_POLICY_HOURS as i64,
                    hours as i64,
                ));
            }
        }
        if self.tolerance_minutes > MAX_POLICY_HOURS * 60 {
            return Err(ValidationError::out_of_range(
                "tolerance_minutes",
                0,
                (MAX_POLICY_HOURS * 60) as i64,
                self.tolerance_minutes as i64,
            ));
        }
        Ok(())
    }
}

impl Default for PolicySettings {
    /// Baseline used before any version has been published.
    fn default() -> Self {
        Self {
            min_hours_cancel: 24,
            min_hours_reschedule: 24,
            tolerance_minutes: 0,
        }
    }
}

/// One immutable version in the policy chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationPolicy {
    pub version: u32,
    #[serde(flatten)]
    pub settings: PolicySettings,
    pub created_at: Timestamp,
}

impl CancellationPolicy {
    /// Version 0: the defaults in force while the log is empty.
    pub fn baseline(at: Timestamp) -> Self {
        Self {
            version: 0,
            settings: PolicySettings::default(),
            created_at: at,
        }
    }

    /// Copy stamped onto a session at booking time.
    pub fn snapshot(&self) -> PolicySnapshot {
        PolicySnapshot {
            version: self.version,
            min_hours_cancel: self.settings.min_hours_cancel,
            min_hours_reschedule: self.settings.min_hours_reschedule,
            tolerance_minutes: self.settings.tolerance_minutes,
        }
    }
}

/// Policy terms frozen on a session when it was booked.
///
/// Never re-read from the live policy; later versions do not affect
/// existing bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySnapshot {
    pub version: u32,
    pub min_hours_cancel: u32,
    pub min_hours_reschedule: u32,
    pub tolerance_minutes: u32,
}
