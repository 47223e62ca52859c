//! Reminder worker.
//!
//! Loads configuration, wires the adapters and runs the reminder sweep until
//! Ctrl-C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studio_booking::adapters::memory::{
    InMemoryDirectory, InMemoryNotificationRepository, InMemorySessionRepository,
    InMemoryTemplateStore, InMemoryTimeline,
};
use studio_booking::adapters::postgres::{self, PostgresSessionRepository};
use studio_booking::adapters::push::{LoggingPushTransport, WebhookPushTransport};
use studio_booking::adapters::SystemClock;
use studio_booking::application::{NotificationDispatcher, ReminderScheduler, SessionNotifier};
use studio_booking::config::{AppConfig, ConfigError};
use studio_booking::ports::{Clock, PushTransport, SessionRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // --- Configuration ---
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    // --- Tracing ---
    init_tracing(&config);
    tracing::info!(
        environment = ?config.server.environment,
        backend = ?config.storage.backend,
        "Loaded configuration"
    );

    // --- Storage ---
    let sessions = build_session_repository(&config).await?;

    // Accounts, clients, templates and notifications are owned by the studio
    // directory service; the worker keeps process-local copies.
    let directory = Arc::new(InMemoryDirectory::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let templates = Arc::new(InMemoryTemplateStore::new());
    let timeline = Arc::new(InMemoryTimeline::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // --- Push ---
    let push: Arc<dyn PushTransport> = match config.push.webhook() {
        Some(webhook) => {
            tracing::info!(url = %webhook.url, "Using webhook push transport");
            Arc::new(WebhookPushTransport::new(webhook)?)
        }
        None => {
            tracing::info!("No push webhook configured, logging pushes only");
            Arc::new(LoggingPushTransport::new())
        }
    };

    // --- Services ---
    let dispatcher = Arc::new(NotificationDispatcher::new(
        directory.clone(),
        notifications,
        push,
        clock.clone(),
    ));
    let notifier = Arc::new(SessionNotifier::new(
        dispatcher,
        templates,
        directory.clone(),
        directory.clone(),
        timeline,
    ));

    if !config.scheduler.enabled {
        tracing::warn!("Reminder scheduler disabled, nothing to do");
        return Ok(());
    }

    // --- Reminder scheduler ---
    let scheduler = ReminderScheduler::with_config(
        sessions,
        directory,
        notifier,
        clock,
        config.scheduler.to_scheduler_config(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping reminder scheduler");

    let _ = shutdown_tx.send(true);
    match tokio::time::timeout(Duration::from_secs(30), scheduler_handle).await {
        Ok(Ok(Ok(()))) => tracing::info!("Reminder scheduler stopped"),
        Ok(Ok(Err(err))) => tracing::error!(error = %err, "Reminder scheduler failed"),
        Ok(Err(err)) => tracing::error!(error = %err, "Reminder scheduler task panicked"),
        Err(_) => tracing::warn!("Reminder scheduler did not stop within 30s"),
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_session_repository(
    config: &AppConfig,
) -> Result<Arc<dyn SessionRepository>, BoxError> {
    let Some(database) = config.database.as_ref().filter(|_| config.storage.uses_postgres())
    else {
        tracing::warn!("Using in-memory session storage; sessions are lost on exit");
        return Ok(Arc::new(InMemorySessionRepository::new()));
    };

    let pool = database.pool_options().connect(&database.url).await?;
    tracing::info!("Database connection pool created");

    if database.run_migrations {
        postgres::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresSessionRepository::new(pool)))
}

/// Wait for Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
