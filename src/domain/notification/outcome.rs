//! Dispatch outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Notification;

/// Why a notification was not delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotDeliveredReason {
    UserNotFound,
    TypeDisabled,
    ChannelsDisabled,
}

impl NotDeliveredReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotDeliveredReason::UserNotFound => "user-not-found",
            NotDeliveredReason::TypeDisabled => "type-disabled",
            NotDeliveredReason::ChannelsDisabled => "channels-disabled",
        }
    }
}

impl fmt::Display for NotDeliveredReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NotDeliveredReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl DispatchOutcome {
    pub fn delivered(notification: Notification) -> Self {
        Self {
            delivered: true,
            reason: None,
            notification: Some(notification),
        }
    }

    pub fn not_delivered(reason: NotDeliveredReason) -> Self {
        Self {
            delivered: false,
            reason: Some(reason),
            notification: None,
        }
    }
}
