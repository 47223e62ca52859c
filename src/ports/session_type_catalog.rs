//! Session-type catalog port.
//!
//! The catalog is the source of truth for session types; booking never
//! creates a type on the fly.

use async_trait::async_trait;

use crate::domain::account::SessionType;
use crate::domain::foundation::{DomainError, SessionTypeId, UserId};

#[async_trait]
pub trait SessionTypeCatalog: Send + Sync {
    /// Looks up a type by id, archived or not.
    async fn find_by_id(&self, id: &SessionTypeId) -> Result<Option<SessionType>, DomainError>;

    /// Non-archived types offered by a photographer.
    async fn list_active(&self, photographer_id: &UserId)
        -> Result<Vec<SessionType>, DomainError>;
}
