//! ConfirmSessionHandler - photographer confirmation.

use super::BookingServices;
use crate::application::services::{
    enforce, format_session_date, load_actor, NotificationRequest, NotificationStatus,
};
use crate::domain::foundation::{
    authorize, AuthorizationContext, Capability, CommandMetadata, EventId,
    SerializableDomainEvent, SessionId,
};
use crate::domain::notification::NotificationType;
use crate::domain::session::{BookingError, Session, SessionConfirmed};

#[derive(Debug, Clone)]
pub struct ConfirmSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct ConfirmSessionResult {
    pub session: Session,
    /// False when the session was already confirmed by either party.
    pub changed: bool,
    pub notification: Option<NotificationStatus>,
}

pub struct ConfirmSessionHandler {
    services: BookingServices,
}

impl ConfirmSessionHandler {
    pub fn new(services: BookingServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<ConfirmSessionResult, BookingError> {
        let session = self.services.load_session(&cmd.session_id).await?;
        let actor = load_actor(self.services.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "confirm",
            "Session",
            cmd.session_id.to_string(),
        );
        enforce(authorize(&ctx, Capability::ManageSessions), "confirm")?;
        enforce(ctx.require_owner(session.photographer_id()), "confirm")?;

        let now = self.services.clock.now();
        let mut confirmed = session.clone();
        if !confirmed.confirm_by_photographer(now)? {
            return Ok(ConfirmSessionResult {
                session,
                changed: false,
                notification: None,
            });
        }

        self.services.sessions.update(&confirmed).await?;
        tracing::info!(session_id = %confirmed.id(), "Session confirmed by photographer");

        self.services
            .notifier
            .record(
                SessionConfirmed {
                    event_id: EventId::new(),
                    session_id: *confirmed.id(),
                    confirmed_by: metadata.user_id.clone(),
                    confirmed_at: now,
                }
                .to_envelope()
                .with_correlation_id(metadata.correlation_id())
                .with_user_id(metadata.user_id.to_string())
                .with_source(metadata.source()),
            )
            .await;

        let notification = self
            .services
            .notifier
            .notify(
                NotificationRequest::new(
                    confirmed.client_id().clone(),
                    NotificationType::SessionConfirmed,
                    "Session confirmed",
                    format!(
                        "Your {} session on {} is confirmed.",
                        confirmed.session_type_name(),
                        format_session_date(&confirmed)
                    ),
                )
                .for_session(*confirmed.id()),
            )
            .await;

        Ok(ConfirmSessionResult {
            session: confirmed,
            changed: true,
            notification: Some(notification),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{CancelSessionCommand, CancelSessionHandler};
    use super::*;
    use crate::domain::session::SessionStatus;

    fn confirm(session: &Session) -> ConfirmSessionCommand {
        ConfirmSessionCommand {
            session_id: *session.id(),
        }
    }

    #[tokio::test]
    async fn confirms_scheduled_session() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;

        let result = ConfirmSessionHandler::new(fx.services.clone())
            .handle(confirm(&session), metadata(photographer()))
            .await
            .unwrap();

        assert!(result.changed);
        assert_eq!(result.session.status(), SessionStatus::Confirmed);
        assert!(result.session.photographer_confirmed_at().is_some());
        assert_eq!(fx.timeline.events_of_type("session.confirmed").await.len(), 1);
    }

    #[tokio::test]
    async fn repeat_confirmation_is_a_noop() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        let handler = ConfirmSessionHandler::new(fx.services.clone());
        handler
            .handle(confirm(&session), metadata(photographer()))
            .await
            .unwrap();
        let notified = fx.notifications.count().await;

        let again = handler
            .handle(confirm(&session), metadata(photographer()))
            .await
            .unwrap();

        assert!(!again.changed);
        assert!(again.notification.is_none());
        assert_eq!(fx.notifications.count().await, notified);
    }

    #[tokio::test]
    async fn cancelled_session_cannot_be_confirmed() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;
        CancelSessionHandler::new(fx.services.clone())
            .handle(
                CancelSessionCommand {
                    session_id: *session.id(),
                    reason: None,
                },
                metadata(photographer()),
            )
            .await
            .unwrap();

        let err = ConfirmSessionHandler::new(fx.services.clone())
            .handle(confirm(&session), metadata(photographer()))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::InvalidState(_)));
    }

    #[tokio::test]
    async fn clients_cannot_confirm_as_photographer() {
        let fx = fixture().await;
        let session = book(&fx, monday_at(10, 0), monday_at(11, 0)).await;

        let err = ConfirmSessionHandler::new(fx.services.clone())
            .handle(confirm(&session), metadata(client()))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Authorization(_)));
    }
}
