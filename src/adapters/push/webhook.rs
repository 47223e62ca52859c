//! HTTP webhook push transport.
//!
//! Each push is POSTed as JSON to a configured endpoint, typically a relay
//! in front of APNs/FCM. A non-2xx status is a transport failure.
//!
//! # Configuration
//!
//! ```ignore
//! let config = WebhookPushConfig::new("https://push.example.com/send")
//!     .with_api_key(key)
//!     .with_timeout(Duration::from_secs(5));
//! let transport = WebhookPushTransport::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, SessionId, UserId};
use crate::domain::notification::{Notification, NotificationType};
use crate::ports::PushTransport;

/// Configuration for the webhook transport.
#[derive(Debug, Clone)]
pub struct WebhookPushConfig {
    /// Endpoint receiving the POST.
    pub url: String,
    /// Sent as a bearer token when present.
    api_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl WebhookPushConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Body of the webhook request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushPayload<'a> {
    notification_id: NotificationId,
    recipient_id: &'a UserId,
    #[serde(rename = "type")]
    notification_type: NotificationType,
    title: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<SessionId>,
}

impl<'a> From<&'a Notification> for PushPayload<'a> {
    fn from(n: &'a Notification) -> Self {
        Self {
            notification_id: n.id,
            recipient_id: &n.recipient_id,
            notification_type: n.notification_type,
            title: &n.title,
            message: &n.message,
            session_id: n.session_id,
        }
    }
}

pub struct WebhookPushTransport {
    config: WebhookPushConfig,
    client: Client,
}

impl WebhookPushTransport {
    pub fn new(config: WebhookPushConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::TransportError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl PushTransport for WebhookPushTransport {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut request = self
            .client
            .post(&self.config.url)
            .json(&PushPayload::from(notification));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            let reason = if e.is_timeout() { "timed out" } else { "failed" };
            DomainError::new(
                ErrorCode::TransportError,
                format!("Push request {}: {}", reason, e),
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::new(
                ErrorCode::TransportError,
                format!("Push endpoint returned {}", status),
            )
            .with_detail("status", status.as_u16().to_string()));
        }

        tracing::debug!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            "Push delivered to webhook"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::notification::Channel;

    fn notification() -> Notification {
        Notification {
            id: NotificationId::new(),
            recipient_id: UserId::new("client-1").unwrap(),
            notification_type: NotificationType::Reminder24h,
            title: "Session tomorrow".to_string(),
            message: "See you at Studio A".to_string(),
            session_id: Some(SessionId::new()),
            channels: vec![Channel::Push],
            read_at: None,
            metadata: serde_json::json!({ "internal": true }),
            created_at: Timestamp::from_unix_millis(1_705_276_800_000).unwrap(),
        }
    }

    #[test]
    fn config_builder_sets_fields() {
        let config = WebhookPushConfig::new("https://push.example.com/send")
            .with_api_key(Secret::new("key".to_string()))
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.url, "https://push.example.com/send");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.has_api_key());
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let config = WebhookPushConfig::new("https://push.example.com/send")
            .with_api_key(Secret::new("super-secret".to_string()));

        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn payload_omits_metadata() {
        let n = notification();
        let json = serde_json::to_value(PushPayload::from(&n)).unwrap();

        assert_eq!(json["type"], "reminder-24h");
        assert_eq!(json["recipientId"], "client-1");
        assert!(json.get("metadata").is_none());
    }
}
