//! Push transport that only logs.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::notification::Notification;
use crate::ports::PushTransport;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPushTransport;

impl LoggingPushTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PushTransport for LoggingPushTransport {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        tracing::info!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            notification_type = %notification.notification_type,
            title = %notification.title,
            "Push notification"
        );
        Ok(())
    }
}
