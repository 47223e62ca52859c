//! In-memory account store, client directory and session type catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::account::{ClientRecord, SessionType, UserAccount};
use crate::domain::foundation::{DomainError, SessionTypeId, UserId};
use crate::ports::{AccountStore, ClientDirectory, SessionTypeCatalog};

/// Users, clients and session types in one place.
///
/// The three are separate ports; one struct serves all of them so fixtures
/// only have to seed a single directory.
#[derive(Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<UserId, UserAccount>>,
    clients: RwLock<HashMap<UserId, ClientRecord>>,
    session_types: RwLock<HashMap<SessionTypeId, SessionType>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user account.
    pub async fn add_user(&self, account: UserAccount) {
        self.users.write().await.insert(account.id.clone(), account);
    }

    pub async fn add_client(&self, client: ClientRecord) {
        self.clients.write().await.insert(client.id.clone(), client);
    }

    pub async fn add_session_type(&self, session_type: SessionType) {
        self.session_types
            .write()
            .await
            .insert(session_type.id, session_type);
    }
}

#[async_trait]
impl AccountStore for InMemoryDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }
}

#[async_trait]
impl ClientDirectory for InMemoryDirectory {
    async fn find_client(&self, id: &UserId) -> Result<Option<ClientRecord>, DomainError> {
        Ok(self.clients.read().await.get(id).cloned())
    }
}

#[async_trait]
impl SessionTypeCatalog for InMemoryDirectory {
    async fn find_by_id(&self, id: &SessionTypeId) -> Result<Option<SessionType>, DomainError> {
        Ok(self.session_types.read().await.get(id).cloned())
    }

    async fn list_active(&self, photographer_id: &UserId) -> Result<Vec<SessionType>, DomainError> {
        let mut types: Vec<SessionType> = self
            .session_types
            .read()
            .await
            .values()
            .filter(|t| !t.archived && &t.photographer_id == photographer_id)
            .cloned()
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }
}
