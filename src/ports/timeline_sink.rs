//! Timeline sink port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Append-only session/audit timeline.
///
/// Callers treat this as fire-and-forget: a failed `record` is logged and
/// never rolls back or blocks the transition that produced the event.
#[async_trait]
pub trait TimelineSink: Send + Sync {
    async fn record(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
