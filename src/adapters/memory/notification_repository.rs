//! In-memory notification repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.notifications.read().await.len()
    }

    /// Everything delivered to `recipient_id`, in delivery order.
    pub async fn for_recipient(&self, recipient_id: &UserId) -> Vec<Notification> {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| &n.recipient_id == recipient_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        self.notifications.write().await.push(notification.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError> {
        Ok(self
            .notifications
            .read()
            .await
            .iter()
            .find(|n| &n.id == id)
            .cloned())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DomainError> {
        let mut found: Vec<Notification> = self
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| &n.recipient_id == recipient_id && !(unread_only && n.is_read()))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut notifications = self.notifications.write().await;
        match notifications.iter_mut().find(|n| n.id == notification.id) {
            Some(existing) => {
                *existing = notification.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", notification.id),
            )
            .with_detail("notification_id", notification.id.to_string())),
        }
    }
}
