//! Append-only policy version chain.

use serde::{Deserialize, Serialize};

use super::{CancellationPolicy, PolicySettings};
use crate::domain::foundation::{Timestamp, ValidationError};

/// Append-only list of policy versions, numbered from 1.
///
/// Appending never touches earlier entries; `latest()` is a pure query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyLog {
    versions: Vec<CancellationPolicy>,
}

impl PolicyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new version and returns it.
    pub fn append(
        &mut self,
        settings: PolicySettings,
        at: Timestamp,
    ) -> Result<CancellationPolicy, ValidationError> {
        settings.validate()?;

        let version = self.latest().map(|p| p.version + 1).unwrap_or(1);
        let policy = CancellationPolicy {
            version,
            settings,
            created_at: at,
        };
        self.versions.push(policy);
        Ok(policy)
    }

    /// Highest version, if any has been published.
    pub fn latest(&self) -> Option<&CancellationPolicy> {
        self.versions.last()
    }

    /// Latest version, or the baseline when the log is empty.
    pub fn current(&self, now: Timestamp) -> CancellationPolicy {
        self.latest()
            .copied()
            .unwrap_or_else(|| CancellationPolicy::baseline(now))
    }

    pub fn at_version(&self, version: u32) -> Option<&CancellationPolicy> {
        self.versions.iter().find(|p| p.version == version)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(cancel: u32) -> PolicySettings {
        PolicySettings {
            min_hours_cancel: cancel,
            min_hours_reschedule: 24,
            tolerance_minutes: 0,
        }
    }

    #[test]
    fn empty_log_falls_back_to_baseline() {
        let log = PolicyLog::new();
        assert!(log.latest().is_none());
        assert_eq!(log.current(Timestamp::now()).version, 0);
    }

    #[test]
    fn versions_increase_and_history_is_preserved() {
        let mut log = PolicyLog::new();
        let v1 = log.append(settings(24), Timestamp::now()).unwrap();
        let v2 = log.append(settings(48), Timestamp::now()).unwrap();

        assert_eq!(v1.version, 1);
        assert_eq!(v2.version, 2);
        assert_eq!(log.latest().unwrap().settings.min_hours_cancel, 48);
        assert_eq!(log.at_version(1).unwrap().settings.min_hours_cancel, 24);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn invalid_settings_are_not_appended() {
        let mut log = PolicyLog::new();
        assert!(log.append(settings(u32::MAX), Timestamp::now()).is_err());
        assert!(log.is_empty());
    }
}
