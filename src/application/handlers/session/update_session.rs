//! UpdateSessionHandler - edits and reschedules.

use serde_json::json;

use super::{BookingServices, SessionTypeRef};
use crate::application::services::{
    enforce, format_session_date, load_actor, AvailabilityGuard, ConflictDetector,
    NotificationRequest, NotificationStatus,
};
use crate::domain::foundation::{
    authorize, AuthorizationContext, Capability, CommandMetadata, EventEnvelope, EventId,
    SerializableDomainEvent, SessionId, TimeRange, Timestamp,
};
use crate::domain::notification::NotificationType;
use crate::domain::policy::PolicyAction;
use crate::domain::session::{
    BookingError, Session, SessionChanges, SessionDiff, SessionRescheduled, SessionUpdated,
};

/// Command to edit a session. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSessionCommand {
    pub session_id: SessionId,
    pub session_type: Option<SessionTypeRef>,
    pub location: Option<String>,
    /// `Some("")` clears the notes.
    pub notes: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct UpdateSessionResult {
    pub session: Session,
    pub diff: SessionDiff,
    /// `None` when nothing changed and nobody was notified.
    pub notification: Option<NotificationStatus>,
}

pub struct UpdateSessionHandler {
    services: BookingServices,
    availability: AvailabilityGuard,
    conflicts: ConflictDetector,
}

impl UpdateSessionHandler {
    pub fn new(services: BookingServices) -> Self {
        Self {
            availability: AvailabilityGuard::new(services.accounts.clone()),
            conflicts: ConflictDetector::new(services.sessions.clone()),
            services,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateSessionResult, BookingError> {
        // 1. Load and authorize
        let session = self.services.load_session(&cmd.session_id).await?;
        let actor = load_actor(self.services.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "update",
            "Session",
            cmd.session_id.to_string(),
        );
        enforce(authorize(&ctx, Capability::ManageSessions), "update")?;
        enforce(ctx.require_owner(session.photographer_id()), "update")?;

        // 2. Build the requested changes
        let session_type = match &cmd.session_type {
            Some(reference) => {
                let resolved = self
                    .services
                    .resolve_session_type(session.photographer_id(), reference)
                    .await?;
                Some((resolved.id, resolved.name))
            }
            None => None,
        };
        let range = if cmd.starts_at.is_some() || cmd.ends_at.is_some() {
            Some(TimeRange::new(
                cmd.starts_at.unwrap_or_else(|| session.starts_at()),
                cmd.ends_at.unwrap_or_else(|| session.ends_at()),
            )?)
        } else {
            None
        };
        let changes = SessionChanges {
            session_type,
            location: cmd.location,
            notes: cmd.notes,
            range,
        };

        // 3. Apply to a copy; the stored session is untouched until every
        //    check has passed
        let now = self.services.clock.now();
        let mut updated = session.clone();
        let diff = updated.apply_changes(changes, now)?;

        if diff.is_empty() {
            return Ok(UpdateSessionResult {
                session,
                diff,
                notification: None,
            });
        }

        // 4. Reschedule rules: snapshot window from the original start,
        //    then availability and conflicts for the new range
        if diff.is_reschedule() {
            if let Err(violation) = session.check_lead_time(PolicyAction::Reschedule, &now) {
                tracing::warn!(
                    session_id = %session.id(),
                    policy_version = violation.policy_version,
                    required_minutes = violation.required_minutes,
                    actual_minutes = violation.actual_minutes,
                    "Reschedule rejected by policy"
                );
                return Err(violation.into());
            }
            self.availability
                .check(updated.photographer_id(), updated.range())
                .await?;
            self.conflicts
                .ensure_free(updated.photographer_id(), updated.range(), Some(updated.id()))
                .await?;
        }

        // 5. Persist
        self.services.sessions.update(&updated).await?;

        tracing::info!(
            session_id = %updated.id(),
            rescheduled = diff.is_reschedule(),
            fields = ?diff.fields(),
            "Session updated"
        );

        // 6. Timeline and client notification
        let correlation_id = metadata.correlation_id();
        let envelope: EventEnvelope = if diff.is_reschedule() {
            SessionRescheduled {
                event_id: EventId::new(),
                session_id: *updated.id(),
                updated_by: metadata.user_id.clone(),
                previous_start: session.starts_at(),
                previous_end: session.ends_at(),
                starts_at: updated.starts_at(),
                ends_at: updated.ends_at(),
                changes: diff.changes.clone(),
                rescheduled_at: now,
            }
            .to_envelope()
        } else {
            SessionUpdated {
                event_id: EventId::new(),
                session_id: *updated.id(),
                updated_by: metadata.user_id.clone(),
                changes: diff.changes.clone(),
                updated_at: now,
            }
            .to_envelope()
        };
        self.services
            .notifier
            .record(
                envelope
                    .with_correlation_id(correlation_id)
                    .with_user_id(metadata.user_id.to_string())
                    .with_source(metadata.source()),
            )
            .await;

        let request = if diff.is_reschedule() {
            NotificationRequest::new(
                updated.client_id().clone(),
                NotificationType::SessionRescheduled,
                "Session rescheduled",
                format!(
                    "Your {} session has moved to {}.",
                    updated.session_type_name(),
                    format_session_date(&updated)
                ),
            )
        } else {
            NotificationRequest::new(
                updated.client_id().clone(),
                NotificationType::SessionUpdated,
                "Session updated",
                format!(
                    "Your {} session on {} was updated: {}.",
                    updated.session_type_name(),
                    format_session_date(&updated),
                    diff.fields().join(", ")
                ),
            )
        };
        let notification = self
            .services
            .notifier
            .notify(
                request
                    .for_session(*updated.id())
                    .with_metadata(json!({ "changes": diff.changes })),
            )
            .await;

        Ok(UpdateSessionResult {
            session: updated,
            diff,
            notification: Some(notification),
        })
    }
}
