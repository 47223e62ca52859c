//! CancelSessionHandler - Command handler for cancelling sessions.

use super::BookingServices;
use crate::application::services::{enforce, load_actor, NotificationRequest, NotificationStatus};
use crate::domain::foundation::{
    authorize, AuthorizationContext, Capability, CommandMetadata, EventId, Role,
    SerializableDomainEvent, SessionId,
};
use crate::domain::notification::{NotificationType, TemplateKey};
use crate::domain::policy::PolicyAction;
use crate::domain::session::{BookingError, Session, SessionCancelled};

const DEFAULT_CANCELLED_MESSAGE: &str =
    "Your {{sessionType}} session on {{sessionDate}} has been cancelled.";

/// Command to cancel a session.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CancelSessionResult {
    pub session: Session,
    /// True when the session was already cancelled and nothing changed.
    pub already_cancelled: bool,
    pub notification: Option<NotificationStatus>,
}

/// Handler for cancelling sessions.
///
/// Photographers cancel their own sessions; a session's client may cancel
/// it too. Either way the lead time is checked against the policy snapshot
/// taken at booking.
pub struct CancelSessionHandler {
    services: BookingServices,
}

impl CancelSessionHandler {
    pub fn new(services: BookingServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: CancelSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelSessionResult, BookingError> {
        // 1. Load and authorize
        let session = self.services.load_session(&cmd.session_id).await?;
        let actor = load_actor(self.services.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "cancel",
            "Session",
            cmd.session_id.to_string(),
        );
        if actor.role == Role::Client {
            enforce(authorize(&ctx, Capability::CancelAsClient), "cancel")?;
            enforce(ctx.require_user(session.client_id()), "cancel")?;
        } else {
            enforce(authorize(&ctx, Capability::ManageSessions), "cancel")?;
            enforce(ctx.require_owner(session.photographer_id()), "cancel")?;
        }

        // 2. Apply to a copy; repeat cancellations succeed without changes
        let now = self.services.clock.now();
        let mut cancelled = session.clone();
        if !cancelled.cancel(cmd.reason, now)? {
            tracing::debug!(session_id = %session.id(), "Session already cancelled");
            return Ok(CancelSessionResult {
                session,
                already_cancelled: true,
                notification: None,
            });
        }

        // 3. Lead time from the pre-cancel start
        if let Err(violation) = session.check_lead_time(PolicyAction::Cancel, &now) {
            tracing::warn!(
                session_id = %session.id(),
                policy_version = violation.policy_version,
                required_minutes = violation.required_minutes,
                actual_minutes = violation.actual_minutes,
                "Cancellation rejected by policy"
            );
            return Err(violation.into());
        }

        // 4. Persist
        self.services.sessions.update(&cancelled).await?;

        tracing::info!(
            session_id = %cancelled.id(),
            cancelled_by = %metadata.user_id,
            "Session cancelled"
        );

        // 5. Timeline and counterpart notification
        let event = SessionCancelled {
            event_id: EventId::new(),
            session_id: *cancelled.id(),
            cancelled_by: metadata.user_id.clone(),
            reason: cancelled.cancellation_reason().map(str::to_string),
            cancelled_at: now,
        };
        self.services
            .notifier
            .record(
                event
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id())
                    .with_user_id(metadata.user_id.to_string())
                    .with_source(metadata.source()),
            )
            .await;

        let recipient = cancelled
            .counterpart_of(&metadata.user_id)
            .unwrap_or_else(|| cancelled.client_id())
            .clone();
        let message = self
            .services
            .notifier
            .render_for_session(
                &cancelled,
                TemplateKey::SessionCancelled,
                DEFAULT_CANCELLED_MESSAGE,
            )
            .await;
        let notification = self
            .services
            .notifier
            .notify(
                NotificationRequest::new(
                    recipient,
                    NotificationType::SessionCancelled,
                    "Session cancelled",
                    message,
                )
                .for_session(*cancelled.id()),
            )
            .await;

        Ok(CancelSessionResult {
            session: cancelled,
            already_cancelled: false,
            notification: Some(notification),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::policy::PolicySettings;
    use crate::domain::session::SessionStatus;
    use crate::ports::{Clock, PolicyStore, SessionRepository};

    fn cancel(session: &Session) -> CancelSessionCommand {
        CancelSessionCommand {
            session_id: *session.id(),
            reason: Some("Weather".to_string()),
        }
    }

    async fn tolerant_policy(fx: &Fixture) {
        fx.policies
            .create_policy_version(
                PolicySettings {
                    min_hours_cancel: 24,
                    min_hours_reschedule: 24,
                    tolerance_minutes: 30,
                },
                fx.clock.now(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancels_and_notifies_client() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;

        let result = CancelSessionHandler::new(fx.services.clone())
            .handle(cancel(&session), metadata(photographer()))
            .await
            .unwrap();

        assert_eq!(result.session.status(), SessionStatus::Cancelled);
        assert_eq!(result.session.cancellation_reason(), Some("Weather"));
        assert!(result.session.cancelled_at().is_some());
        assert_eq!(result.notification, Some(NotificationStatus::sent()));
        assert_eq!(fx.timeline.events_of_type("session.cancelled").await.len(), 1);

        let inbox = fx.notifications.for_recipient(&client()).await;
        assert!(inbox
            .iter()
            .any(|n| n.notification_type == NotificationType::SessionCancelled
                && n.message.contains("has been cancelled")));
    }

    #[tokio::test]
    async fn second_cancel_is_a_noop_success() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        let handler = CancelSessionHandler::new(fx.services.clone());

        let first = handler
            .handle(cancel(&session), metadata(photographer()))
            .await
            .unwrap();
        let second = handler
            .handle(cancel(&session), metadata(photographer()))
            .await
            .unwrap();

        assert!(!first.already_cancelled);
        assert!(second.already_cancelled);
        assert!(second.notification.is_none());
        assert_eq!(second.session.cancelled_at(), first.session.cancelled_at());
        assert_eq!(fx.timeline.events_of_type("session.cancelled").await.len(), 1);
    }

    #[tokio::test]
    async fn accepts_cancel_inside_tolerance() {
        let fx = fixture().await;
        tolerant_policy(&fx).await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        // 23h40m before start: 1420 >= 1410
        fx.clock.set(monday_at(10, 0).plus_minutes(-1420));

        let result = CancelSessionHandler::new(fx.services.clone())
            .handle(cancel(&session), metadata(photographer()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_cancel_past_tolerance() {
        let fx = fixture().await;
        tolerant_policy(&fx).await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        // 23h20m before start: 1400 < 1410
        fx.clock.set(monday_at(10, 0).plus_minutes(-1400));

        let err = CancelSessionHandler::new(fx.services.clone())
            .handle(cancel(&session), metadata(photographer()))
            .await
            .unwrap_err();

        match err {
            BookingError::PolicyViolation(violation) => {
                assert_eq!(violation.required_minutes, 1410);
                assert_eq!(violation.actual_minutes, 1400);
            }
            other => panic!("expected policy violation, got {other:?}"),
        }
        let stored = fx.sessions.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SessionStatus::Scheduled);
    }

    #[tokio::test]
    async fn later_policy_versions_do_not_apply() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        fx.policies
            .create_policy_version(
                PolicySettings {
                    min_hours_cancel: 72,
                    min_hours_reschedule: 72,
                    tolerance_minutes: 0,
                },
                fx.clock.now(),
            )
            .await
            .unwrap();

        // 48h out: fine under the 24h snapshot, not under the new 72h rule
        let result = CancelSessionHandler::new(fx.services.clone())
            .handle(cancel(&session), metadata(photographer()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn client_may_cancel_and_photographer_is_told() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;

        let result = CancelSessionHandler::new(fx.services.clone())
            .handle(cancel(&session), metadata(client()))
            .await
            .unwrap();

        assert_eq!(result.session.status(), SessionStatus::Cancelled);
        let inbox = fx.notifications.for_recipient(&photographer()).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].notification_type, NotificationType::SessionCancelled);
    }

    #[tokio::test]
    async fn other_clients_cannot_cancel() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        let stranger = crate::domain::foundation::UserId::new("client-2").unwrap();
        fx.directory
            .add_user(crate::domain::account::UserAccount::new(
                stranger.clone(),
                Role::Client,
                "Eve",
            ))
            .await;

        let err = CancelSessionHandler::new(fx.services.clone())
            .handle(cancel(&session), metadata(stranger))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Authorization(_)));
    }

    #[tokio::test]
    async fn cancelled_slot_can_be_rebooked() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        CancelSessionHandler::new(fx.services.clone())
            .handle(cancel(&session), metadata(photographer()))
            .await
            .unwrap();

        let rebooked = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        assert_ne!(rebooked.id(), session.id());
    }
}
