//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Scheduler interval must be positive")]
    InvalidSchedulerInterval,

    #[error("Reminder hours must satisfy 0 < final < early")]
    InvalidReminderThresholds,

    #[error("Invalid push webhook URL")]
    InvalidWebhookUrl,

    #[error("Push webhook must use HTTPS in production")]
    WebhookMustBeHttps,

    #[error("Invalid push timeout")]
    InvalidTimeout,
}
