//! Delivered notification record.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{Channel, NotificationType};
use crate::domain::foundation::{NotificationId, SessionId, Timestamp, UserId};

/// A notification that reached at least one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    pub channels: Vec<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<Timestamp>,
    pub metadata: JsonValue,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Stamps `read_at` once; later calls keep the first timestamp.
    pub fn mark_read(&mut self, at: Timestamp) -> bool {
        if self.read_at.is_some() {
            return false;
        }
        self.read_at = Some(at);
        true
    }

    pub fn used_channel(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}
