//! CreatePolicyVersionHandler - appends a cancellation policy version.
//!
//! Existing sessions keep the snapshot they were booked with.

use std::sync::Arc;

use crate::application::services::{enforce, load_actor, record_on_timeline};
use crate::domain::foundation::{
    authorize, AuthorizationContext, Capability, CommandMetadata, EventId,
    SerializableDomainEvent,
};
use crate::domain::policy::{CancellationPolicy, PolicySettings, PolicyVersionCreated};
use crate::domain::session::BookingError;
use crate::ports::{AccountStore, Clock, PolicyStore, TimelineSink};

#[derive(Debug, Clone)]
pub struct CreatePolicyVersionCommand {
    pub settings: PolicySettings,
}

pub struct CreatePolicyVersionHandler {
    accounts: Arc<dyn AccountStore>,
    policies: Arc<dyn PolicyStore>,
    timeline: Arc<dyn TimelineSink>,
    clock: Arc<dyn Clock>,
}

impl CreatePolicyVersionHandler {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        policies: Arc<dyn PolicyStore>,
        timeline: Arc<dyn TimelineSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            policies,
            timeline,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePolicyVersionCommand,
        metadata: CommandMetadata,
    ) -> Result<CancellationPolicy, BookingError> {
        let actor = load_actor(self.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "create",
            "Policy",
            "current",
        );
        enforce(authorize(&ctx, Capability::ManagePolicy), "create")?;

        cmd.settings.validate()?;

        let now = self.clock.now();
        let policy = self.policies.create_policy_version(cmd.settings, now).await?;

        tracing::info!(
            version = policy.version,
            min_hours_cancel = policy.settings.min_hours_cancel,
            min_hours_reschedule = policy.settings.min_hours_reschedule,
            tolerance_minutes = policy.settings.tolerance_minutes,
            "Policy version created"
        );

        let event = PolicyVersionCreated {
            event_id: EventId::new(),
            version: policy.version,
            settings: policy.settings,
            created_by: metadata.user_id.clone(),
            created_at: now,
        };
        record_on_timeline(
            self.timeline.as_ref(),
            event
                .to_envelope()
                .with_correlation_id(metadata.correlation_id())
                .with_user_id(metadata.user_id.to_string())
                .with_source(metadata.source()),
        )
        .await;

        Ok(policy)
    }
}
