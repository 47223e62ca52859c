//! Reminder thresholds.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::notification::{NotificationType, PreferenceCategory, TemplateKey};

/// The two reminders every active session receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderKind {
    #[serde(rename = "reminder-48h")]
    Early,
    #[serde(rename = "reminder-24h")]
    Final,
}

impl ReminderKind {
    pub fn notification_type(&self) -> NotificationType {
        match self {
            ReminderKind::Early => NotificationType::Reminder48h,
            ReminderKind::Final => NotificationType::Reminder24h,
        }
    }

    pub fn template_key(&self) -> TemplateKey {
        match self {
            ReminderKind::Early => TemplateKey::Reminder48h,
            ReminderKind::Final => TemplateKey::Reminder24h,
        }
    }

    pub fn preference_category(&self) -> PreferenceCategory {
        match self {
            ReminderKind::Early => PreferenceCategory::Reminder48h,
            ReminderKind::Final => PreferenceCategory::Reminder24h,
        }
    }

    /// Column holding the sent flag in persistent stores.
    pub fn flag_column(&self) -> &'static str {
        match self {
            ReminderKind::Early => "reminder_48_sent",
            ReminderKind::Final => "reminder_24_sent",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            ReminderKind::Early => "Session in 2 days",
            ReminderKind::Final => "Session tomorrow",
        }
    }

    pub fn default_body(&self) -> &'static str {
        match self {
            ReminderKind::Early => {
                "Hi {{clientName}}, your {{sessionType}} session with {{photographerName}} \
                 is on {{sessionDate}} at {{sessionLocation}}."
            }
            ReminderKind::Final => {
                "Reminder: your {{sessionType}} session with {{photographerName}} is \
                 tomorrow, {{sessionDate}}, at {{sessionLocation}}."
            }
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notification_type().as_str())
    }
}

/// Hour thresholds of the two reminder windows.
///
/// The early window is `(final, early]` hours before the start, the final
/// window is `(0, final]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderThresholds {
    pub early_hours: u32,
    pub final_hours: u32,
}

impl Default for ReminderThresholds {
    fn default() -> Self {
        Self {
            early_hours: 48,
            final_hours: 24,
        }
    }
}

impl ReminderThresholds {
    /// Window containing a start `until` away, if any. Compared at
    /// millisecond precision.
    pub fn window_for(&self, until: Duration) -> Option<ReminderKind> {
        let early = Duration::hours(i64::from(self.early_hours));
        let last = Duration::hours(i64::from(self.final_hours));

        if until <= Duration::zero() {
            None
        } else if until <= last {
            Some(ReminderKind::Final)
        } else if until <= early {
            Some(ReminderKind::Early)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_use_inclusive_upper_bounds() {
        let t = ReminderThresholds::default();
        assert_eq!(t.window_for(Duration::minutes(48 * 60 + 1)), None);
        assert_eq!(t.window_for(Duration::hours(48)), Some(ReminderKind::Early));
        assert_eq!(t.window_for(Duration::minutes(24 * 60 + 1)), Some(ReminderKind::Early));
        assert_eq!(t.window_for(Duration::hours(24)), Some(ReminderKind::Final));
        assert_eq!(t.window_for(Duration::minutes(1)), Some(ReminderKind::Final));
    }

    #[test]
    fn seconds_past_a_threshold_fall_in_the_earlier_window() {
        let t = ReminderThresholds::default();
        let half_minute = Duration::seconds(30);
        assert_eq!(
            t.window_for(Duration::hours(24) + half_minute),
            Some(ReminderKind::Early)
        );
        assert_eq!(t.window_for(Duration::hours(48) + half_minute), None);
        assert_eq!(t.window_for(Duration::milliseconds(1)), Some(ReminderKind::Final));
    }

    #[test]
    fn past_sessions_get_no_reminder() {
        let t = ReminderThresholds::default();
        assert_eq!(t.window_for(Duration::zero()), None);
        assert_eq!(t.window_for(Duration::minutes(-30)), None);
    }

    #[test]
    fn kinds_map_to_their_notification_types() {
        assert_eq!(ReminderKind::Early.notification_type(), NotificationType::Reminder48h);
        assert_eq!(ReminderKind::Final.template_key(), TemplateKey::Reminder24h);
        assert_eq!(ReminderKind::Early.to_string(), "reminder-48h");
    }
}
