//! Side effects of committed session transitions: timeline entries and
//! participant notifications.
//!
//! Nothing here can fail a command. Timeline and dispatch errors are logged
//! and folded into a `NotificationStatus` on the command result.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{NotificationDispatcher, NotificationRequest};
use crate::domain::foundation::{EventEnvelope, UserId};
use crate::domain::notification::{render_or_default, DispatchOutcome, TemplateContext, TemplateKey};
use crate::domain::session::Session;
use crate::ports::{AccountStore, ClientDirectory, TemplateStore, TimelineSink};

/// Delivery summary reported alongside a successful command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStatus {
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl NotificationStatus {
    pub fn sent() -> Self {
        Self {
            sent: true,
            reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            sent: false,
            reason: Some(reason.into()),
        }
    }
}

impl From<&DispatchOutcome> for NotificationStatus {
    fn from(outcome: &DispatchOutcome) -> Self {
        match outcome.reason {
            None if outcome.delivered => NotificationStatus::sent(),
            None => NotificationStatus::failed("not-delivered"),
            Some(reason) => NotificationStatus::failed(reason.as_str()),
        }
    }
}

/// Records an event on the timeline; a failing sink is logged and ignored.
pub async fn record_on_timeline(timeline: &dyn TimelineSink, envelope: EventEnvelope) {
    let event_type = envelope.event_type.clone();
    let aggregate_id = envelope.aggregate_id.clone();
    if let Err(err) = timeline.record(envelope).await {
        tracing::warn!(
            event_type = %event_type,
            aggregate_id = %aggregate_id,
            error = %err,
            "Failed to record timeline event"
        );
    }
}

pub struct SessionNotifier {
    dispatcher: Arc<NotificationDispatcher>,
    templates: Arc<dyn TemplateStore>,
    accounts: Arc<dyn AccountStore>,
    clients: Arc<dyn ClientDirectory>,
    timeline: Arc<dyn TimelineSink>,
}

impl SessionNotifier {
    pub fn new(
        dispatcher: Arc<NotificationDispatcher>,
        templates: Arc<dyn TemplateStore>,
        accounts: Arc<dyn AccountStore>,
        clients: Arc<dyn ClientDirectory>,
        timeline: Arc<dyn TimelineSink>,
    ) -> Self {
        Self {
            dispatcher,
            templates,
            accounts,
            clients,
            timeline,
        }
    }

    pub async fn record(&self, envelope: EventEnvelope) {
        record_on_timeline(self.timeline.as_ref(), envelope).await;
    }

    /// Dispatches and returns the raw outcome, or the error text.
    pub async fn dispatch(&self, request: NotificationRequest) -> Result<DispatchOutcome, String> {
        let recipient_id = request.recipient_id.clone();
        self.dispatcher.dispatch(request).await.map_err(|err| {
            tracing::warn!(
                recipient_id = %recipient_id,
                error = %err,
                "Notification dispatch failed"
            );
            err.to_string()
        })
    }

    /// Dispatches and summarises the outcome for a command result.
    pub async fn notify(&self, request: NotificationRequest) -> NotificationStatus {
        match self.dispatch(request).await {
            Ok(outcome) => NotificationStatus::from(&outcome),
            Err(_) => NotificationStatus::failed("dispatch-error"),
        }
    }

    /// Placeholder values for a session. Missing names fall back to ids.
    pub async fn template_context(&self, session: &Session) -> TemplateContext {
        let photographer_name = match self.accounts.find_user(session.photographer_id()).await {
            Ok(Some(account)) => account.display_name,
            _ => session.photographer_id().to_string(),
        };
        let client_name = match self.clients.find_client(session.client_id()).await {
            Ok(Some(client)) => client.name,
            _ => session.client_id().to_string(),
        };

        let mut context = TemplateContext::new()
            .with("photographerName", photographer_name)
            .with("clientName", client_name)
            .with("sessionDate", format_session_date(session))
            .with("sessionLocation", session.location())
            .with("sessionType", session.session_type_name());
        if let Some(notes) = session.notes() {
            context = context.with("sessionNotes", notes);
        }
        context
    }

    /// Renders the owner's stored template for `key`, else `default`.
    pub async fn render(
        &self,
        owner: &UserId,
        key: TemplateKey,
        default: &str,
        context: &TemplateContext,
    ) -> String {
        let template = match self.templates.find(owner, key).await {
            Ok(template) => template,
            Err(err) => {
                tracing::warn!(owner = %owner, key = %key, error = %err, "Template lookup failed");
                None
            }
        };
        render_or_default(template.as_ref(), default, context)
    }

    /// Renders `key` for `session` using the photographer's template.
    pub async fn render_for_session(&self, session: &Session, key: TemplateKey, default: &str) -> String {
        let context = self.template_context(session).await;
        self.render(session.photographer_id(), key, default, &context)
            .await
    }
}

/// "Monday, January 15, 2024 at 10:00 UTC"
pub fn format_session_date(session: &Session) -> String {
    session
        .starts_at()
        .as_datetime()
        .format("%A, %B %-d, %Y at %H:%M UTC")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotDeliveredReason;

    #[test]
    fn status_reports_reason_kebab_case() {
        let status = NotificationStatus::from(&DispatchOutcome::not_delivered(
            NotDeliveredReason::ChannelsDisabled,
        ));
        assert!(!status.sent);
        assert_eq!(status.reason.as_deref(), Some("channels-disabled"));
    }
}
