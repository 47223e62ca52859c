//! AddSessionNoteHandler - timeline notes visible to both participants.
//!
//! A note never changes the session; it is recorded on the timeline and the
//! other participant is notified.

use super::BookingServices;
use crate::application::services::{enforce, load_actor, NotificationRequest, NotificationStatus};
use crate::domain::foundation::{
    authorize, AuthorizationContext, Capability, CommandMetadata, EventId,
    SerializableDomainEvent, SessionId, UserId,
};
use crate::domain::notification::NotificationType;
use crate::domain::session::{BookingError, SessionNoteAdded, MAX_NOTES_LENGTH};

#[derive(Debug, Clone)]
pub struct AddSessionNoteCommand {
    pub session_id: SessionId,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct AddSessionNoteResult {
    pub event: SessionNoteAdded,
    /// One entry per notified participant.
    pub notifications: Vec<NotificationStatus>,
}

pub struct AddSessionNoteHandler {
    services: BookingServices,
}

impl AddSessionNoteHandler {
    pub fn new(services: BookingServices) -> Self {
        Self { services }
    }

    pub async fn handle(
        &self,
        cmd: AddSessionNoteCommand,
        metadata: CommandMetadata,
    ) -> Result<AddSessionNoteResult, BookingError> {
        let session = self.services.load_session(&cmd.session_id).await?;
        let actor = load_actor(self.services.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "add_note",
            "Session",
            cmd.session_id.to_string(),
        );
        enforce(authorize(&ctx, Capability::AddSessionNotes), "add_note")?;
        enforce(
            ctx.require_participant(&[session.photographer_id(), session.client_id()]),
            "add_note",
        )?;

        let note = cmd.note.trim();
        if note.is_empty() {
            return Err(BookingError::validation("note", "Note cannot be empty"));
        }
        if note.chars().count() > MAX_NOTES_LENGTH {
            return Err(BookingError::validation(
                "note",
                format!("Note exceeds {} characters", MAX_NOTES_LENGTH),
            ));
        }

        let now = self.services.clock.now();
        let event = SessionNoteAdded {
            event_id: EventId::new(),
            session_id: *session.id(),
            author_id: metadata.user_id.clone(),
            note: note.to_string(),
            added_at: now,
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

        tracing::info!(session_id = %session.id(), author_id = %metadata.user_id, "Session note added");

        // Admin authors are not participants; both sides are told.
        let recipients: Vec<UserId> = match session.counterpart_of(&metadata.user_id) {
            Some(other) => vec![other.clone()],
            None => vec![session.photographer_id().clone(), session.client_id().clone()],
        };

        let mut notifications = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let status = self
                .services
                .notifier
                .notify(
                    NotificationRequest::new(
                        recipient,
                        NotificationType::SessionNote,
                        format!("New note on your {} session", session.session_type_name()),
                        note.to_string(),
                    )
                    .for_session(*session.id()),
                )
                .await;
            notifications.push(status);
        }

        Ok(AddSessionNoteResult {
            event,
            notifications,
        })
    }
}
