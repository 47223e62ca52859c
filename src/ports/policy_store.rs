//! Policy store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::policy::{CancellationPolicy, PolicySettings};

/// Append-only store of cancellation policy versions.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Highest published version, or the version-0 baseline when none
    /// exists yet.
    async fn current_policy(&self) -> Result<CancellationPolicy, DomainError>;

    /// A specific version, if it was published.
    async fn policy_at_version(&self, version: u32)
        -> Result<Option<CancellationPolicy>, DomainError>;

    /// Appends a new version. Earlier versions are never modified.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for out-of-range settings
    async fn create_policy_version(
        &self,
        settings: PolicySettings,
        at: Timestamp,
    ) -> Result<CancellationPolicy, DomainError>;
}
