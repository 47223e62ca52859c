//! Account store port.

use async_trait::async_trait;

use crate::domain::account::UserAccount;
use crate::domain::foundation::{DomainError, UserId};

/// Read access to user accounts: role, preferences and availability.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Returns `None` if the user does not exist.
    async fn find_user(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError>;
}
