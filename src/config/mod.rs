//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STUDIO_BOOKING` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use studio_booking::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Sweeping every {:?}", config.scheduler.interval());
//! ```

mod database;
mod error;
mod push;
mod scheduler;
mod server;
mod storage;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use push::PushConfig;
pub use scheduler::SchedulerConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults except `database`, which is only required
/// for the postgres storage backend.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment and log filter
    #[serde(default)]
    pub server: ServerConfig,

    /// Repository backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// PostgreSQL connection
    pub database: Option<DatabaseConfig>,

    /// Reminder sweep cadence and windows
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Push transport
    #[serde(default)]
    pub push: PushConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STUDIO_BOOKING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STUDIO_BOOKING__STORAGE__BACKEND=postgres` -> `storage.backend = postgres`
    /// - `STUDIO_BOOKING__SCHEDULER__INTERVAL_SECS=60` -> `scheduler.interval_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STUDIO_BOOKING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid, or
    /// if the postgres backend is selected without a database section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage.uses_postgres() {
            self.database
                .as_ref()
                .ok_or(ValidationError::MissingRequired("DATABASE__URL"))?
                .validate()?;
        }
        self.scheduler.validate()?;
        self.push.validate(self.is_production())?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "STUDIO_BOOKING__SERVER__ENVIRONMENT",
        "STUDIO_BOOKING__STORAGE__BACKEND",
        "STUDIO_BOOKING__DATABASE__URL",
        "STUDIO_BOOKING__SCHEDULER__INTERVAL_SECS",
        "STUDIO_BOOKING__SCHEDULER__FINAL_REMINDER_HOURS",
        "STUDIO_BOOKING__PUSH__WEBHOOK_URL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        clear_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.scheduler.interval_secs, 900);
        assert!(config.push.webhook_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_backend_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("STUDIO_BOOKING__STORAGE__BACKEND", "postgres"),
            ("STUDIO_BOOKING__DATABASE__URL", "postgresql://test@localhost/test"),
        ])
        .unwrap();

        assert!(config.storage.uses_postgres());
        assert_eq!(
            config.database.as_ref().map(|d| d.url.as_str()),
            Some("postgresql://test@localhost/test")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_backend_requires_database() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("STUDIO_BOOKING__STORAGE__BACKEND", "postgres")]).unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }

    #[test]
    fn test_scheduler_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("STUDIO_BOOKING__SCHEDULER__INTERVAL_SECS", "60"),
            ("STUDIO_BOOKING__SCHEDULER__FINAL_REMINDER_HOURS", "48"),
        ])
        .unwrap();

        assert_eq!(config.scheduler.interval_secs, 60);
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidReminderThresholds)
        );
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("STUDIO_BOOKING__SERVER__ENVIRONMENT", "production"),
            ("STUDIO_BOOKING__PUSH__WEBHOOK_URL", "http://relay.local/send"),
        ])
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::WebhookMustBeHttps));
    }
}
