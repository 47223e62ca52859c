//! ListNotificationsHandler - Query handler for a user's inbox.

use std::sync::Arc;

use crate::application::services::{enforce, load_actor};
use crate::domain::foundation::{authorize, AuthorizationContext, Capability, UserId};
use crate::domain::notification::Notification;
use crate::domain::session::BookingError;
use crate::ports::{AccountStore, NotificationRepository};

/// Query for the caller's own notifications.
#[derive(Debug, Clone)]
pub struct ListNotificationsQuery {
    pub user_id: UserId,
    pub unread_only: bool,
}

/// Returns notifications newest first. Users only ever see their own inbox.
pub struct ListNotificationsHandler {
    accounts: Arc<dyn AccountStore>,
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            accounts,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        query: ListNotificationsQuery,
    ) -> Result<Vec<Notification>, BookingError> {
        let actor = load_actor(self.accounts.as_ref(), &query.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "list",
            "Notification",
            query.user_id.to_string(),
        );
        enforce(authorize(&ctx, Capability::ReadNotifications), "list")?;

        Ok(self
            .notifications
            .find_by_recipient(&query.user_id, query.unread_only)
            .await?)
    }
}
