//! Notification types, preference categories and delivery channels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event types that produce notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    SessionCreated,
    SessionUpdated,
    SessionRescheduled,
    SessionCancelled,
    SessionConfirmed,
    SessionClientConfirmed,
    SessionNote,
    #[serde(rename = "reminder-48h")]
    Reminder48h,
    #[serde(rename = "reminder-24h")]
    Reminder24h,
    GalleryReady,
}

/// Preference toggle governing a notification type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceCategory {
    Confirmation,
    Reminder48h,
    Reminder24h,
    Changes,
}

impl NotificationType {
    /// Category toggle for this type; `None` means always allowed.
    pub fn category(&self) -> Option<PreferenceCategory> {
        use NotificationType::*;
        match self {
            SessionCreated | SessionConfirmed | SessionClientConfirmed => {
                Some(PreferenceCategory::Confirmation)
            }
            SessionUpdated | SessionRescheduled | SessionCancelled | SessionNote => {
                Some(PreferenceCategory::Changes)
            }
            Reminder48h => Some(PreferenceCategory::Reminder48h),
            Reminder24h => Some(PreferenceCategory::Reminder24h),
            GalleryReady => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use NotificationType::*;
        match self {
            SessionCreated => "session-created",
            SessionUpdated => "session-updated",
            SessionRescheduled => "session-rescheduled",
            SessionCancelled => "session-cancelled",
            SessionConfirmed => "session-confirmed",
            SessionClientConfirmed => "session-client-confirmed",
            SessionNote => "session-note",
            Reminder48h => "reminder-48h",
            Reminder24h => "reminder-24h",
            GalleryReady => "gallery-ready",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Push,
    InApp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_event_families() {
        assert_eq!(
            NotificationType::SessionCreated.category(),
            Some(PreferenceCategory::Confirmation)
        );
        assert_eq!(
            NotificationType::SessionRescheduled.category(),
            Some(PreferenceCategory::Changes)
        );
        assert_eq!(
            NotificationType::Reminder24h.category(),
            Some(PreferenceCategory::Reminder24h)
        );
        assert_eq!(NotificationType::GalleryReady.category(), None);
    }

    #[test]
    fn serialized_names_match_display() {
        for kind in [
            NotificationType::SessionClientConfirmed,
            NotificationType::Reminder48h,
            NotificationType::GalleryReady,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }
}
