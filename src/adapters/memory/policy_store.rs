//! In-memory policy store over a `PolicyLog`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::policy::{CancellationPolicy, PolicyLog, PolicySettings};
use crate::ports::PolicyStore;

#[derive(Default)]
pub struct InMemoryPolicyStore {
    log: RwLock<PolicyLog>,
}

impl InMemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn current_policy(&self) -> Result<CancellationPolicy, DomainError> {
        Ok(self.log.read().await.current(Timestamp::now()))
    }

    async fn policy_at_version(
        &self,
        version: u32,
    ) -> Result<Option<CancellationPolicy>, DomainError> {
        Ok(self.log.read().await.at_version(version).copied())
    }

    async fn create_policy_version(
        &self,
        settings: PolicySettings,
        at: Timestamp,
    ) -> Result<CancellationPolicy, DomainError> {
        Ok(self.log.write().await.append(settings, at)?)
    }
}
