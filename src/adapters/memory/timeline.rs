//! In-memory timeline sink.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::TimelineSink;

/// Keeps every recorded event for inspection.
#[derive(Default)]
pub struct InMemoryTimeline {
    events: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<EventEnvelope> {
        self.events.read().await.clone()
    }

    pub async fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub async fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TimelineSink for InMemoryTimeline {
    async fn record(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            "Timeline event recorded"
        );
        self.events.write().await.push(event);
        Ok(())
    }
}
