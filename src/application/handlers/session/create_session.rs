//! CreateSessionHandler - Command handler for booking new sessions.

use serde_json::json;

use super::{BookingServices, SessionTypeRef};
use crate::application::services::{
    enforce, load_actor, AvailabilityGuard, ConflictDetector, NotificationRequest,
    NotificationStatus,
};
use crate::domain::foundation::{
    authorize, AuthorizationContext, Capability, CommandMetadata, EventId,
    SerializableDomainEvent, SessionId, TimeRange, Timestamp, UserId,
};
use crate::domain::notification::{NotificationType, TemplateKey};
use crate::domain::session::{BookingError, NewSession, Session, SessionCreated};

const DEFAULT_CREATED_MESSAGE: &str = "Your {{sessionType}} session with {{photographerName}} \
     is booked for {{sessionDate}} at {{sessionLocation}}.";

/// Command to book a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub photographer_id: UserId,
    pub client_id: UserId,
    pub session_type: SessionTypeRef,
    pub location: String,
    pub notes: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
    pub event: SessionCreated,
    /// Delivery of the `session-created` notification to the client.
    pub notification: NotificationStatus,
}

/// Handler for booking sessions.
pub struct CreateSessionHandler {
    services: BookingServices,
    availability: AvailabilityGuard,
    conflicts: ConflictDetector,
}

impl CreateSessionHandler {
    pub fn new(services: BookingServices) -> Self {
        Self {
            availability: AvailabilityGuard::new(services.accounts.clone()),
            conflicts: ConflictDetector::new(services.sessions.clone()),
            services,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSessionResult, BookingError> {
        // 1. Authorize: session management, on the photographer's own calendar
        let actor = load_actor(self.services.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "create",
            "Session",
            cmd.photographer_id.to_string(),
        );
        enforce(authorize(&ctx, Capability::ManageSessions), "create")?;
        enforce(ctx.require_owner(&cmd.photographer_id), "create")?;

        // 2. Client must exist and belong to the photographer
        let client = self
            .services
            .clients
            .find_client(&cmd.client_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Client", &cmd.client_id))?;
        if !client.is_served_by(&cmd.photographer_id) {
            tracing::warn!(
                photographer_id = %cmd.photographer_id,
                client_id = %cmd.client_id,
                "Photographer is not authorized for client"
            );
            return Err(BookingError::Authorization(format!(
                "Photographer {} is not authorized for client {}",
                cmd.photographer_id, cmd.client_id
            )));
        }

        // 3. Time range, working hours, double booking
        let range = TimeRange::new(cmd.starts_at, cmd.ends_at)?;
        self.availability.check(&cmd.photographer_id, &range).await?;
        self.conflicts
            .ensure_free(&cmd.photographer_id, &range, None)
            .await?;

        // 4. Session type from the catalog
        let session_type = self
            .services
            .resolve_session_type(&cmd.photographer_id, &cmd.session_type)
            .await?;

        // 5. Stamp the current policy and persist
        let now = self.services.clock.now();
        let policy = self.services.policies.current_policy().await?;
        let session = Session::book(
            SessionId::new(),
            NewSession {
                photographer_id: cmd.photographer_id,
                client_id: cmd.client_id,
                session_type_id: session_type.id,
                session_type_name: session_type.name,
                location: cmd.location,
                notes: cmd.notes,
                range,
            },
            policy.snapshot(),
            now,
        )?;

        self.services.sessions.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            photographer_id = %session.photographer_id(),
            client_id = %session.client_id(),
            policy_version = session.policy().version,
            "Session created"
        );

        // 6. Timeline and client notification
        let event = SessionCreated {
            event_id: EventId::new(),
            session_id: *session.id(),
            photographer_id: session.photographer_id().clone(),
            client_id: session.client_id().clone(),
            session_type: session.session_type_name().to_string(),
            starts_at: session.starts_at(),
            ends_at: session.ends_at(),
            policy_version: session.policy().version,
            created_by: metadata.user_id.clone(),
            created_at: now,
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

        let message = self
            .services
            .notifier
            .render_for_session(&session, TemplateKey::SessionCreated, DEFAULT_CREATED_MESSAGE)
            .await;
        let notification = self
            .services
            .notifier
            .notify(
                NotificationRequest::new(
                    session.client_id().clone(),
                    NotificationType::SessionCreated,
                    "New session booked",
                    message,
                )
                .for_session(*session.id())
                .with_metadata(json!({
                    "startsAt": session.starts_at(),
                    "endsAt": session.ends_at(),
                })),
            )
            .await;

        Ok(CreateSessionResult {
            session,
            event,
            notification,
        })
    }
}
