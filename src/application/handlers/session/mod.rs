//! Session command handlers.
//!
//! Every handler follows the same sequence: load, authorize, validate,
//! persist, then record the timeline event and notify. Nothing is written
//! until every check has passed; timeline and notification failures never
//! undo a committed transition.

mod add_session_note;
mod cancel_session;
mod client_confirm_session;
mod confirm_session;
mod create_session;
mod update_session;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

pub use add_session_note::{AddSessionNoteCommand, AddSessionNoteHandler, AddSessionNoteResult};
pub use cancel_session::{CancelSessionCommand, CancelSessionHandler, CancelSessionResult};
pub use client_confirm_session::{
    ClientConfirmSessionCommand, ClientConfirmSessionHandler, ClientConfirmSessionResult,
};
pub use confirm_session::{ConfirmSessionCommand, ConfirmSessionHandler, ConfirmSessionResult};
pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use update_session::{UpdateSessionCommand, UpdateSessionHandler, UpdateSessionResult};

use crate::application::services::SessionNotifier;
use crate::domain::account::SessionType;
use crate::domain::foundation::{SessionId, SessionTypeId, UserId};
use crate::domain::session::{BookingError, Session};
use crate::ports::{
    AccountStore, ClientDirectory, Clock, PolicyStore, SessionRepository, SessionTypeCatalog,
};

/// Collaborators shared by the session command handlers.
#[derive(Clone)]
pub struct BookingServices {
    pub sessions: Arc<dyn SessionRepository>,
    pub accounts: Arc<dyn AccountStore>,
    pub clients: Arc<dyn ClientDirectory>,
    pub session_types: Arc<dyn SessionTypeCatalog>,
    pub policies: Arc<dyn PolicyStore>,
    pub notifier: Arc<SessionNotifier>,
    pub clock: Arc<dyn Clock>,
}

impl BookingServices {
    pub(crate) async fn load_session(&self, id: &SessionId) -> Result<Session, BookingError> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::not_found("Session", id))
    }

    /// Resolves a catalog reference for `photographer_id`.
    ///
    /// Only non-archived types owned by the photographer resolve; names
    /// match exactly after normalization.
    pub(crate) async fn resolve_session_type(
        &self,
        photographer_id: &UserId,
        reference: &SessionTypeRef,
    ) -> Result<SessionType, BookingError> {
        let found = match reference {
            SessionTypeRef::Id(id) => self
                .session_types
                .find_by_id(id)
                .await?
                .filter(|t| !t.archived && &t.photographer_id == photographer_id),
            SessionTypeRef::Name(name) => self
                .session_types
                .list_active(photographer_id)
                .await?
                .into_iter()
                .find(|t| t.matches_name(name)),
        };
        found.ok_or_else(|| BookingError::not_found("Session type", reference))
    }
}

/// How a command names its session type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTypeRef {
    Id(SessionTypeId),
    Name(String),
}

impl std::fmt::Display for SessionTypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionTypeRef::Id(id) => write!(f, "{}", id),
            SessionTypeRef::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn resolves_type_by_normalized_name() {
        let fx = fixture().await;
        let resolved = fx
            .services
            .resolve_session_type(&photographer(), &SessionTypeRef::Name("  portrait ".into()))
            .await
            .unwrap();
        assert_eq!(resolved.id, fx.session_type.id);
    }

    #[tokio::test]
    async fn archived_types_do_not_resolve() {
        let fx = fixture().await;
        let archived = SessionType::new(photographer(), "Wedding").archived();
        fx.directory.add_session_type(archived.clone()).await;

        for reference in [
            SessionTypeRef::Id(archived.id),
            SessionTypeRef::Name("Wedding".into()),
        ] {
            let err = fx
                .services
                .resolve_session_type(&photographer(), &reference)
                .await
                .unwrap_err();
            assert!(matches!(err, BookingError::NotFound { resource: "Session type", .. }));
        }
    }

    #[tokio::test]
    async fn other_photographers_types_do_not_resolve() {
        let fx = fixture().await;
        let foreign = SessionType::new(UserId::new("photographer-2").unwrap(), "Newborn");
        fx.directory.add_session_type(foreign.clone()).await;

        assert!(fx
            .services
            .resolve_session_type(&photographer(), &SessionTypeRef::Id(foreign.id))
            .await
            .is_err());
    }
}
