//! Notification Dispatcher.
//!
//! Decides whether and how a notification reaches its recipient:
//!
//! 1. Look up the recipient (`user-not-found`)
//! 2. Merge stored preferences over defaults
//! 3. Check the type's category toggle (`type-disabled`)
//! 4. Resolve channels (`channels-disabled`)
//! 5. Persist the record with the resolved channels
//! 6. Send push if enabled; a push failure only drops push from the
//!    channels reported in the outcome
//!
//! The transport is injected; there is no process-wide mailer.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, NotificationId, SessionId, UserId};
use crate::domain::notification::{
    Channel, DispatchOutcome, NotDeliveredReason, Notification, NotificationType,
};
use crate::ports::{AccountStore, Clock, NotificationRepository, PushTransport};

/// One notification to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub recipient_id: UserId,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub session_id: Option<SessionId>,
    pub metadata: JsonValue,
}

impl NotificationRequest {
    pub fn new(
        recipient_id: UserId,
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            notification_type,
            title: title.into(),
            message: message.into(),
            session_id: None,
            metadata: JsonValue::Null,
        }
    }

    pub fn for_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }
}

pub struct NotificationDispatcher {
    accounts: Arc<dyn AccountStore>,
    notifications: Arc<dyn NotificationRepository>,
    push: Arc<dyn PushTransport>,
    clock: Arc<dyn Clock>,
}

impl NotificationDispatcher {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        notifications: Arc<dyn NotificationRepository>,
        push: Arc<dyn PushTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            notifications,
            push,
            clock,
        }
    }

    /// Dispatches one notification.
    ///
    /// `Err` only for storage failures; every preference-driven refusal is
    /// an `Ok` outcome with a reason.
    pub async fn dispatch(&self, request: NotificationRequest) -> Result<DispatchOutcome, DomainError> {
        let recipient = match self.accounts.find_user(&request.recipient_id).await? {
            Some(user) => user,
            None => return Ok(self.refuse(&request, NotDeliveredReason::UserNotFound)),
        };

        let preferences = recipient.effective_preferences();

        if let Some(category) = request.notification_type.category() {
            if !preferences.allows(category) {
                return Ok(self.refuse(&request, NotDeliveredReason::TypeDisabled));
            }
        }

        let channels = preferences.channels();
        if channels.is_empty() {
            return Ok(self.refuse(&request, NotDeliveredReason::ChannelsDisabled));
        }

        let notification = Notification {
            id: NotificationId::new(),
            recipient_id: request.recipient_id,
            notification_type: request.notification_type,
            title: request.title,
            message: request.message,
            session_id: request.session_id,
            channels,
            read_at: None,
            metadata: request.metadata,
            created_at: self.clock.now(),
        };

        self.notifications.save(&notification).await?;

        let mut reported = notification;
        if reported.used_channel(Channel::Push) {
            if let Err(err) = self.push.send(&reported).await {
                tracing::warn!(
                    notification_id = %reported.id,
                    recipient_id = %reported.recipient_id,
                    error = %err,
                    "Push delivery failed"
                );
                reported.channels.retain(|c| *c != Channel::Push);
            }
        }

        tracing::info!(
            notification_id = %reported.id,
            recipient_id = %reported.recipient_id,
            notification_type = %reported.notification_type,
            channels = ?reported.channels,
            "Notification delivered"
        );

        Ok(DispatchOutcome::delivered(reported))
    }

    fn refuse(&self, request: &NotificationRequest, reason: NotDeliveredReason) -> DispatchOutcome {
        tracing::debug!(
            recipient_id = %request.recipient_id,
            notification_type = %request.notification_type,
            reason = %reason,
            "Notification not delivered"
        );
        DispatchOutcome::not_delivered(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::{InMemoryDirectory, InMemoryNotificationRepository};
    use crate::adapters::push::LoggingPushTransport;
    use crate::domain::account::UserAccount;
    use crate::domain::foundation::{ErrorCode, Role, Timestamp};
    use crate::domain::notification::StoredPreferences;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FailingPush {
        attempts: Mutex<u32>,
    }

    impl FailingPush {
        fn new() -> Self {
            Self {
                attempts: Mutex::new(0),
            }
        }

        fn attempts(&self) -> u32 {
            *self.attempts.lock().unwrap()
        }
    }

    #[async_trait]
    impl PushTransport for FailingPush {
        async fn send(&self, _notification: &Notification) -> Result<(), DomainError> {
            *self.attempts.lock().unwrap() += 1;
            Err(DomainError::new(ErrorCode::TransportError, "gateway timeout"))
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn setup(
        preferences: StoredPreferences,
        push: Arc<dyn PushTransport>,
    ) -> (NotificationDispatcher, Arc<InMemoryNotificationRepository>) {
        let directory = Arc::new(InMemoryDirectory::new());
        directory
            .add_user(UserAccount::new(user("client-1"), Role::Client, "Ada").with_preferences(preferences))
            .await;
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let clock = Arc::new(FixedClock::at(Timestamp::from_unix_millis(1_705_312_800_000).unwrap()));

        (
            NotificationDispatcher::new(directory, notifications.clone(), push, clock),
            notifications,
        )
    }

    fn request(kind: NotificationType) -> NotificationRequest {
        NotificationRequest::new(user("client-1"), kind, "Title", "Body")
    }

    #[tokio::test]
    async fn delivers_on_all_channels_by_default() {
        let (dispatcher, repo) =
            setup(StoredPreferences::default(), Arc::new(LoggingPushTransport::new())).await;

        let outcome = dispatcher
            .dispatch(request(NotificationType::SessionCreated))
            .await
            .unwrap();

        assert!(outcome.delivered);
        let record = outcome.notification.unwrap();
        assert_eq!(record.channels, vec![Channel::Push, Channel::InApp]);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn unknown_recipient_is_not_delivered() {
        let (dispatcher, repo) =
            setup(StoredPreferences::default(), Arc::new(LoggingPushTransport::new())).await;

        let outcome = dispatcher
            .dispatch(NotificationRequest::new(
                user("nobody"),
                NotificationType::SessionCreated,
                "t",
                "m",
            ))
            .await
            .unwrap();

        assert_eq!(outcome.reason, Some(NotDeliveredReason::UserNotFound));
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn disabled_category_writes_no_record() {
        let prefs = StoredPreferences {
            changes: Some(false),
            ..StoredPreferences::default()
        };
        let (dispatcher, repo) = setup(prefs, Arc::new(LoggingPushTransport::new())).await;

        let outcome = dispatcher
            .dispatch(request(NotificationType::SessionRescheduled))
            .await
            .unwrap();

        assert!(!outcome.delivered);
        assert_eq!(outcome.reason, Some(NotDeliveredReason::TypeDisabled));
        assert!(outcome.notification.is_none());
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn uncategorized_types_ignore_category_toggles() {
        let prefs = StoredPreferences {
            confirmation: Some(false),
            changes: Some(false),
            reminder_48h: Some(false),
            reminder_24h: Some(false),
            ..StoredPreferences::default()
        };
        let (dispatcher, _) = setup(prefs, Arc::new(LoggingPushTransport::new())).await;

        let outcome = dispatcher
            .dispatch(request(NotificationType::GalleryReady))
            .await
            .unwrap();
        assert!(outcome.delivered);
    }

    #[tokio::test]
    async fn no_channels_is_not_delivered() {
        let prefs = StoredPreferences {
            push_enabled: Some(false),
            in_app_enabled: Some(false),
            ..StoredPreferences::default()
        };
        let (dispatcher, _) = setup(prefs, Arc::new(LoggingPushTransport::new())).await;

        let outcome = dispatcher
            .dispatch(request(NotificationType::SessionCreated))
            .await
            .unwrap();
        assert_eq!(outcome.reason, Some(NotDeliveredReason::ChannelsDisabled));
    }

    #[tokio::test]
    async fn push_failure_drops_only_the_push_channel() {
        let push = Arc::new(FailingPush::new());
        let (dispatcher, repo) = setup(StoredPreferences::default(), push.clone()).await;

        let outcome = dispatcher
            .dispatch(request(NotificationType::SessionCreated))
            .await
            .unwrap();

        assert!(outcome.delivered);
        assert_eq!(outcome.notification.unwrap().channels, vec![Channel::InApp]);
        assert_eq!(push.attempts(), 1);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn push_only_failure_still_persists_the_record() {
        let prefs = StoredPreferences {
            in_app_enabled: Some(false),
            ..StoredPreferences::default()
        };
        let push = Arc::new(FailingPush::new());
        let (dispatcher, repo) = setup(prefs, push.clone()).await;

        let outcome = dispatcher
            .dispatch(request(NotificationType::SessionCreated))
            .await
            .unwrap();

        assert!(outcome.delivered);
        assert!(outcome.reason.is_none());
        assert!(outcome.notification.unwrap().channels.is_empty());
        assert_eq!(push.attempts(), 1);

        let stored = repo.for_recipient(&user("client-1")).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].channels, vec![Channel::Push]);
    }

    #[tokio::test]
    async fn in_app_only_never_touches_push() {
        let prefs = StoredPreferences {
            push_enabled: Some(false),
            ..StoredPreferences::default()
        };
        let push = Arc::new(FailingPush::new());
        let (dispatcher, _) = setup(prefs, push.clone()).await;

        let outcome = dispatcher
            .dispatch(request(NotificationType::SessionCreated))
            .await
            .unwrap();

        assert!(outcome.delivered);
        assert_eq!(push.attempts(), 0);
    }
}
