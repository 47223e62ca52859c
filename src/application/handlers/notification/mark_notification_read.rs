//! MarkNotificationReadHandler - Command handler for acknowledging a notification.

use std::sync::Arc;

use crate::application::services::{enforce, load_actor};
use crate::domain::foundation::{
    authorize, AuthorizationContext, Capability, CommandMetadata, NotificationId,
};
use crate::domain::notification::Notification;
use crate::domain::session::BookingError;
use crate::ports::{AccountStore, Clock, NotificationRepository};

#[derive(Debug, Clone)]
pub struct MarkNotificationReadCommand {
    pub notification_id: NotificationId,
}

#[derive(Debug, Clone)]
pub struct MarkNotificationReadResult {
    pub notification: Notification,
    /// False when it had already been read.
    pub changed: bool,
}

/// Handler for marking notifications read.
///
/// Only the recipient may mark a notification; `read_at` keeps the first
/// acknowledgement.
pub struct MarkNotificationReadHandler {
    accounts: Arc<dyn AccountStore>,
    notifications: Arc<dyn NotificationRepository>,
    clock: Arc<dyn Clock>,
}

impl MarkNotificationReadHandler {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        notifications: Arc<dyn NotificationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            notifications,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: MarkNotificationReadCommand,
        metadata: CommandMetadata,
    ) -> Result<MarkNotificationReadResult, BookingError> {
        let mut notification = self
            .notifications
            .find_by_id(&cmd.notification_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Notification", cmd.notification_id))?;

        let actor = load_actor(self.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "mark_read",
            "Notification",
            cmd.notification_id.to_string(),
        );
        enforce(authorize(&ctx, Capability::ReadNotifications), "mark_read")?;
        enforce(ctx.require_user(&notification.recipient_id), "mark_read")?;

        let changed = notification.mark_read(self.clock.now());
        if changed {
            self.notifications.update(&notification).await?;
            tracing::debug!(notification_id = %notification.id, "Notification marked read");
        }

        Ok(MarkNotificationReadResult {
            notification,
            changed,
        })
    }
}
