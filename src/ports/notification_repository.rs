//! Notification repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError>;

    /// A recipient's notifications, newest first.
    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DomainError>;

    /// # Errors
    ///
    /// - `NotificationNotFound` if the record doesn't exist
    async fn update(&self, notification: &Notification) -> Result<(), DomainError>;
}
