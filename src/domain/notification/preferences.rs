//! Per-user notification preferences.

use serde::{Deserialize, Serialize};

use super::{Channel, PreferenceCategory};

/// Fully resolved preferences. Every toggle defaults to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub push_enabled: bool,
    pub in_app_enabled: bool,
    pub confirmation: bool,
    pub reminder_48h: bool,
    pub reminder_24h: bool,
    pub changes: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            push_enabled: true,
            in_app_enabled: true,
            confirmation: true,
            reminder_48h: true,
            reminder_24h: true,
            changes: true,
        }
    }
}

impl NotificationPreferences {
    /// Whether events of `category` may be delivered at all.
    pub fn allows(&self, category: PreferenceCategory) -> bool {
        match category {
            PreferenceCategory::Confirmation => self.confirmation,
            PreferenceCategory::Reminder48h => self.reminder_48h,
            PreferenceCategory::Reminder24h => self.reminder_24h,
            PreferenceCategory::Changes => self.changes,
        }
    }

    /// Enabled channels, push first.
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels = Vec::with_capacity(2);
        if self.push_enabled {
            channels.push(Channel::Push);
        }
        if self.in_app_enabled {
            channels.push(Channel::InApp);
        }
        channels
    }
}

/// Preferences as stored on the account: any key may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_app_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_48h: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_24h: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<bool>,
}

impl StoredPreferences {
    /// Stored values over defaults; missing keys are `true`.
    pub fn merged(&self) -> NotificationPreferences {
        let defaults = NotificationPreferences::default();
        NotificationPreferences {
            push_enabled: self.push_enabled.unwrap_or(defaults.push_enabled),
            in_app_enabled: self.in_app_enabled.unwrap_or(defaults.in_app_enabled),
            confirmation: self.confirmation.unwrap_or(defaults.confirmation),
            reminder_48h: self.reminder_48h.unwrap_or(defaults.reminder_48h),
            reminder_24h: self.reminder_24h.unwrap_or(defaults.reminder_24h),
            changes: self.changes.unwrap_or(defaults.changes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_default_to_enabled() {
        let stored: StoredPreferences = serde_json::from_str(r#"{"reminder48h":false}"#).unwrap();
        let merged = stored.merged();

        assert!(!merged.reminder_48h);
        assert!(merged.reminder_24h);
        assert!(merged.push_enabled);
        assert!(merged.in_app_enabled);
    }

    #[test]
    fn channels_follow_toggles() {
        let prefs = NotificationPreferences {
            push_enabled: false,
            ..NotificationPreferences::default()
        };
        assert_eq!(prefs.channels(), vec![Channel::InApp]);

        let none = NotificationPreferences {
            push_enabled: false,
            in_app_enabled: false,
            ..NotificationPreferences::default()
        };
        assert!(none.channels().is_empty());
    }
}
