//! Client directory port.

use async_trait::async_trait;

use crate::domain::account::ClientRecord;
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Returns `None` if no such client exists.
    async fn find_client(&self, id: &UserId) -> Result<Option<ClientRecord>, DomainError>;
}
