//! GetPolicyHandler - Query handler for policy versions.

use std::sync::Arc;

use crate::domain::policy::CancellationPolicy;
use crate::domain::session::BookingError;
use crate::ports::{Clock, PolicyStore};

/// `None` asks for the current policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPolicyQuery {
    pub version: Option<u32>,
}

pub struct GetPolicyHandler {
    policies: Arc<dyn PolicyStore>,
    clock: Arc<dyn Clock>,
}

impl GetPolicyHandler {
    pub fn new(policies: Arc<dyn PolicyStore>, clock: Arc<dyn Clock>) -> Self {
        Self { policies, clock }
    }

    pub async fn handle(&self, query: GetPolicyQuery) -> Result<CancellationPolicy, BookingError> {
        match query.version {
            None => Ok(self.policies.current_policy().await?),
            // Sessions booked before any version was published carry v0.
            Some(0) => Ok(CancellationPolicy::baseline(self.clock.now())),
            Some(version) => self
                .policies
                .policy_at_version(version)
                .await?
                .ok_or_else(|| BookingError::not_found("Policy version", version)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryPolicyStore;
    use crate::domain::foundation::Timestamp;
    use crate::domain::policy::PolicySettings;

    fn handler(policies: Arc<InMemoryPolicyStore>) -> GetPolicyHandler {
        GetPolicyHandler::new(
            policies,
            Arc::new(FixedClock::at(
                Timestamp::from_unix_millis(1_705_276_800_000).unwrap(),
            )),
        )
    }

    #[tokio::test]
    async fn empty_log_reports_baseline() {
        let policy = handler(Arc::new(InMemoryPolicyStore::new()))
            .handle(GetPolicyQuery::default())
            .await
            .unwrap();

        assert_eq!(policy.version, 0);
        assert_eq!(policy.settings, PolicySettings::default());
    }

    #[tokio::test]
    async fn unknown_version_is_not_found() {
        let err = handler(Arc::new(InMemoryPolicyStore::new()))
            .handle(GetPolicyQuery { version: Some(3) })
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::NotFound { resource: "Policy version", .. }));
    }

    #[tokio::test]
    async fn returns_requested_version() {
        let policies = Arc::new(InMemoryPolicyStore::new());
        let now = Timestamp::from_unix_millis(1_705_276_800_000).unwrap();
        for cancel in [24, 48] {
            policies
                .create_policy_version(
                    PolicySettings {
                        min_hours_cancel: cancel,
                        ..PolicySettings::default()
                    },
                    now,
                )
                .await
                .unwrap();
        }

        let policy = handler(policies)
            .handle(GetPolicyQuery { version: Some(1) })
            .await
            .unwrap();

        assert_eq!(policy.settings.min_hours_cancel, 24);
    }
}
