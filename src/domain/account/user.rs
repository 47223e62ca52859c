//! User account as seen by the booking engine.

use serde::{Deserialize, Serialize};

use crate::domain::availability::AvailabilitySlot;
use crate::domain::foundation::{Role, UserId};
use crate::domain::notification::{NotificationPreferences, StoredPreferences};

/// A user account: role, display name, stored notification preferences and
/// (for photographers) weekly availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,
    pub role: Role,
    pub display_name: String,
    #[serde(default)]
    pub notification_preferences: StoredPreferences,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
}

impl UserAccount {
    pub fn new(id: UserId, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            id,
            role,
            display_name: display_name.into(),
            notification_preferences: StoredPreferences::default(),
            availability: Vec::new(),
        }
    }

    pub fn with_availability(mut self, slots: Vec<AvailabilitySlot>) -> Self {
        self.availability = slots;
        self
    }

    pub fn with_preferences(mut self, preferences: StoredPreferences) -> Self {
        self.notification_preferences = preferences;
        self
    }

    /// Stored preferences merged over the all-enabled defaults.
    pub fn effective_preferences(&self) -> NotificationPreferences {
        self.notification_preferences.merged()
    }
}
