//! Push transport configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::push::WebhookPushConfig;

/// Push delivery settings. Without a webhook URL pushes are only logged.
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// Relay endpoint receiving each push as JSON
    pub webhook_url: Option<String>,

    /// Bearer token for the relay
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PushConfig {
    /// Webhook settings, or `None` when pushes should only be logged.
    pub fn webhook(&self) -> Option<WebhookPushConfig> {
        let url = self.webhook_url.as_ref()?;
        let mut config =
            WebhookPushConfig::new(url.clone()).with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        Some(config)
    }

    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(url) = &self.webhook_url {
            if production && !url.starts_with("https://") {
                return Err(ValidationError::WebhookMustBeHttps);
            }
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ValidationError::InvalidWebhookUrl);
            }
        }
        Ok(())
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_url_means_logging_only() {
        let config = PushConfig::default();
        assert!(config.webhook().is_none());
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn webhook_carries_key_and_timeout() {
        let config = PushConfig {
            webhook_url: Some("https://push.example.com/send".to_string()),
            api_key: Some(Secret::new("key".to_string())),
            timeout_secs: 5,
        };

        let webhook = config.webhook().unwrap();
        assert_eq!(webhook.url, "https://push.example.com/send");
        assert_eq!(webhook.timeout, Duration::from_secs(5));
        assert!(webhook.has_api_key());
    }

    #[test]
    fn plain_http_is_rejected_in_production_only() {
        let config = PushConfig {
            webhook_url: Some("http://relay.local/send".to_string()),
            ..Default::default()
        };
        assert!(config.validate(false).is_ok());
        assert_eq!(config.validate(true), Err(ValidationError::WebhookMustBeHttps));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let config = PushConfig {
            webhook_url: Some("relay.local".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(false), Err(ValidationError::InvalidWebhookUrl));
    }
}
