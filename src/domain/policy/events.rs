//! Policy timeline events.

use serde::{Deserialize, Serialize};

use super::PolicySettings;
use crate::domain::foundation::{domain_event, EventId, Timestamp, UserId};

/// Published when a new policy version is appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyVersionCreated {
    pub event_id: EventId,
    pub version: u32,
    pub settings: PolicySettings,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

domain_event!(
    PolicyVersionCreated,
    event_type = "policy.version_created",
    schema_version = 1,
    aggregate_id = version,
    aggregate_type = "Policy",
    occurred_at = created_at,
    event_id = event_id
);
