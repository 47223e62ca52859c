//! ClientConfirmSessionHandler - the client confirms attendance.
//!
//! The notification goes to the photographer, not the client.

use super::BookingServices;
use crate::application::services::{
    enforce, format_session_date, load_actor, NotificationRequest, NotificationStatus,
};
use crate::domain::foundation::{
    authorize, AuthorizationContext, Capability, CommandMetadata, EventId,
    SerializableDomainEvent, SessionId,
};
use crate::domain::notification::NotificationType;
use crate::domain::session::{BookingError, Session, SessionClientConfirmed};

#[derive(Debug, Clone)]
pub struct ClientConfirmSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct ClientConfirmSessionResult {
    pub session: Session,
    /// False when the client had already confirmed.
    pub changed: bool,
    pub notification: Option<NotificationStatus>,
}

pub struct ClientConfirmSessionHandler {
    services: BookingServices,
}

impl ClientConfirmSessionHandler {
    pub fn new(services: BookingServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: ClientConfirmSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<ClientConfirmSessionResult, BookingError> {
        let session = self.services.load_session(&cmd.session_id).await?;
        let actor = load_actor(self.services.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "client_confirm",
            "Session",
            cmd.session_id.to_string(),
        );
        enforce(authorize(&ctx, Capability::ConfirmAsClient), "client_confirm")?;
        enforce(ctx.require_user(session.client_id()), "client_confirm")?;

        let now = self.services.clock.now();
        let mut confirmed = session.clone();
        if !confirmed.confirm_by_client(now)? {
            return Ok(ClientConfirmSessionResult {
                session,
                changed: false,
                notification: None,
            });
        }

        self.services.sessions.update(&confirmed).await?;
        tracing::info!(session_id = %confirmed.id(), "Session confirmed by client");

        self.services
            .notifier
            .record(
                SessionClientConfirmed {
                    event_id: EventId::new(),
                    session_id: *confirmed.id(),
                    client_id: confirmed.client_id().clone(),
                    confirmed_at: now,
                }
                .to_envelope()
                .with_correlation_id(metadata.correlation_id())
                .with_user_id(metadata.user_id.to_string())
                .with_source(metadata.source()),
            )
            .await;

        let context = self.services.notifier.template_context(&confirmed).await;
        let client_name = context.get("clientName").unwrap_or("Your client").to_string();
        let notification = self
            .services
            .notifier
            .notify(
                NotificationRequest::new(
                    confirmed.photographer_id().clone(),
                    NotificationType::SessionClientConfirmed,
                    "Client confirmed",
                    format!(
                        "{} confirmed the {} session on {}.",
                        client_name,
                        confirmed.session_type_name(),
                        format_session_date(&confirmed)
                    ),
                )
                .for_session(*confirmed.id()),
            )
            .await;

        Ok(ClientConfirmSessionResult {
            session: confirmed,
            changed: true,
            notification: Some(notification),
        })
    }
}
