//! ReminderScheduler - Background service that sends session reminders.
//!
//! Each sweep loads every active session that has not started yet and sends
//! at most one reminder per session:
//!
//! | Hours until start | Reminder | Flag |
//! |-------------------|----------|------|
//! | `(24, 48]` | `reminder-48h` | `reminder_48_sent` |
//! | `(0, 24]` | `reminder-24h` | `reminder_24_sent` |
//!
//! A flag is set once a dispatch was attempted, whatever the outcome, so a
//! reminder is never sent twice for the same schedule. Rescheduling clears
//! both flags. The photographer's own reminder toggle gates the attempt; when
//! it is off the flag stays unset.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 15 min | Time between sweeps |
//! | `thresholds` | 48h / 24h | Reminder windows |
//!
//! ## Graceful Shutdown
//!
//! The loop exits when the shutdown channel flips to `true`. A sweep in
//! progress finishes first.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use tokio::time;

use super::services::{NotificationRequest, SessionNotifier};
use crate::domain::foundation::{DomainError, EventId, SerializableDomainEvent, Timestamp};
use crate::domain::session::{ReminderDispatched, ReminderKind, ReminderThresholds, Session};
use crate::ports::{AccountStore, Clock, SessionFilter, SessionRepository};

/// Configuration for the ReminderScheduler service.
#[derive(Debug, Clone)]
pub struct ReminderSchedulerConfig {
    /// Time between sweeps.
    pub interval: Duration,

    /// Reminder windows.
    pub thresholds: ReminderThresholds,
}

impl Default for ReminderSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15 * 60),
            thresholds: ReminderThresholds::default(),
        }
    }
}

impl ReminderSchedulerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ReminderThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Active future sessions loaded.
    pub scanned: usize,
    /// Reminders that reached the client.
    pub sent: usize,
    /// Attempts the dispatcher declined or could not deliver.
    pub not_delivered: usize,
    /// Due reminders held back by the photographer's preferences.
    pub skipped: usize,
    /// Sessions inside a window whose flag was already set.
    pub already_sent: usize,
    /// Sessions that hit an error; retried next sweep.
    pub failed: usize,
}

enum Attempt {
    Delivered,
    NotDelivered,
    Disabled,
}

/// Background service that sends reminders for upcoming sessions.
pub struct ReminderScheduler {
    sessions: Arc<dyn SessionRepository>,
    accounts: Arc<dyn AccountStore>,
    notifier: Arc<SessionNotifier>,
    clock: Arc<dyn Clock>,
    config: ReminderSchedulerConfig,
}

impl ReminderScheduler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        accounts: Arc<dyn AccountStore>,
        notifier: Arc<SessionNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_config(
            sessions,
            accounts,
            notifier,
            clock,
            ReminderSchedulerConfig::default(),
        )
    }

    pub fn with_config(
        sessions: Arc<dyn SessionRepository>,
        accounts: Arc<dyn AccountStore>,
        notifier: Arc<SessionNotifier>,
        clock: Arc<dyn Clock>,
        config: ReminderSchedulerConfig,
    ) -> Self {
        Self {
            sessions,
            accounts,
            notifier,
            clock,
            config,
        }
    }

    /// Run sweeps until the shutdown signal is received.
    ///
    /// A failed sweep is logged and the loop carries on; the next tick
    /// retries.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            early_hours = self.config.thresholds.early_hours,
            final_hours = self.config.thresholds.final_hours,
            "Reminder scheduler started"
        );

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("Reminder scheduler stopping");
                        return Ok(());
                    }
                }

                _ = interval.tick() => {
                    if let Err(err) = self.sweep().await {
                        tracing::error!(error = %err, "Reminder sweep failed");
                    }
                }
            }
        }
    }

    /// Run exactly one sweep (for testing).
    pub async fn poll_once(&self) -> Result<SweepReport, DomainError> {
        self.sweep().await
    }

    /// One pass over all active future sessions.
    pub async fn sweep(&self) -> Result<SweepReport, DomainError> {
        let now = self.clock.now();
        let sessions = self
            .sessions
            .find_sessions(&SessionFilter::upcoming_active(now))
            .await?;

        let mut report = SweepReport {
            scanned: sessions.len(),
            ..SweepReport::default()
        };

        for session in &sessions {
            let until = session.time_until_start(&now);
            let Some(kind) = self.config.thresholds.window_for(until) else {
                continue;
            };
            if session.reminder_sent(kind) {
                report.already_sent += 1;
                continue;
            }

            match self.remind(session, kind, now).await {
                Ok(Attempt::Delivered) => report.sent += 1,
                Ok(Attempt::NotDelivered) => report.not_delivered += 1,
                Ok(Attempt::Disabled) => report.skipped += 1,
                Err(err) => {
                    tracing::warn!(
                        session_id = %session.id(),
                        reminder = %kind,
                        error = %err,
                        "Reminder failed; will retry next sweep"
                    );
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            sent = report.sent,
            not_delivered = report.not_delivered,
            skipped = report.skipped,
            already_sent = report.already_sent,
            failed = report.failed,
            "Reminder sweep complete"
        );

        Ok(report)
    }

    async fn remind(
        &self,
        session: &Session,
        kind: ReminderKind,
        now: Timestamp,
    ) -> Result<Attempt, DomainError> {
        // Photographer toggle; an unknown photographer keeps the defaults
        let enabled = match self.accounts.find_user(session.photographer_id()).await? {
            Some(photographer) => photographer
                .effective_preferences()
                .allows(kind.preference_category()),
            None => true,
        };
        if !enabled {
            tracing::debug!(
                session_id = %session.id(),
                reminder = %kind,
                "Reminder disabled by photographer"
            );
            return Ok(Attempt::Disabled);
        }

        let message = self
            .notifier
            .render_for_session(session, kind.template_key(), kind.default_body())
            .await;
        let request = NotificationRequest::new(
            session.client_id().clone(),
            kind.notification_type(),
            kind.default_title(),
            message,
        )
        .for_session(*session.id())
        .with_metadata(json!({
            "reminder": kind,
            "startsAt": session.starts_at(),
        }));

        let (delivered, reason, error) = match self.notifier.dispatch(request).await {
            Ok(outcome) => (outcome.delivered, outcome.reason, None),
            Err(err) => (false, None, Some(err)),
        };

        self.notifier
            .record(
                ReminderDispatched {
                    event_id: EventId::new(),
                    session_id: *session.id(),
                    reminder: kind,
                    recipient_id: session.client_id().clone(),
                    delivered,
                    reason,
                    error,
                    dispatched_at: now,
                }
                .to_envelope()
                .with_source("reminder-scheduler"),
            )
            .await;

        self.sessions.set_reminder_sent(session.id(), kind).await?;

        tracing::info!(
            session_id = %session.id(),
            reminder = %kind,
            delivered,
            "Reminder processed"
        );

        Ok(if delivered {
            Attempt::Delivered
        } else {
            Attempt::NotDelivered
        })
    }
}
