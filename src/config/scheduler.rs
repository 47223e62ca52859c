//! Reminder scheduler configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::ReminderSchedulerConfig;
use crate::domain::session::ReminderThresholds;

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Run the reminder sweep at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between sweeps
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Hours before start at which the early reminder window opens
    #[serde(default = "default_early_hours")]
    pub early_reminder_hours: u32,

    /// Hours before start at which the final reminder window opens
    #[serde(default = "default_final_hours")]
    pub final_reminder_hours: u32,
}

impl SchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn thresholds(&self) -> ReminderThresholds {
        ReminderThresholds {
            early_hours: self.early_reminder_hours,
            final_hours: self.final_reminder_hours,
        }
    }

    /// Settings for [`crate::application::ReminderScheduler::with_config`].
    pub fn to_scheduler_config(&self) -> ReminderSchedulerConfig {
        ReminderSchedulerConfig::default()
            .with_interval(self.interval())
            .with_thresholds(self.thresholds())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_secs == 0 {
            return Err(ValidationError::InvalidSchedulerInterval);
        }
        if self.final_reminder_hours == 0 || self.final_reminder_hours >= self.early_reminder_hours
        {
            return Err(ValidationError::InvalidReminderThresholds);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval(),
            early_reminder_hours: default_early_hours(),
            final_reminder_hours: default_final_hours(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval() -> u64 {
    15 * 60
}

fn default_early_hours() -> u32 {
    48
}

fn default_final_hours() -> u32 {
    24
}
