//! In-memory wiring for the session handler tests.

use std::sync::Arc;

use super::{BookingServices, CreateSessionCommand, CreateSessionHandler, SessionTypeRef};
use crate::adapters::clock::FixedClock;
use crate::adapters::memory::{
    InMemoryDirectory, InMemoryNotificationRepository, InMemoryPolicyStore,
    InMemorySessionRepository, InMemoryTemplateStore, InMemoryTimeline,
};
use crate::adapters::push::LoggingPushTransport;
use crate::application::services::{NotificationDispatcher, SessionNotifier};
use crate::domain::account::{ClientRecord, SessionType, UserAccount};
use crate::domain::availability::AvailabilitySlot;
use crate::domain::foundation::{CommandMetadata, Role, Timestamp, UserId};
use crate::domain::session::Session;

/// 2024-01-15T00:00:00Z, a Monday.
pub const MONDAY_MILLIS: i64 = 1_705_276_800_000;

pub struct Fixture {
    pub services: BookingServices,
    pub directory: Arc<InMemoryDirectory>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub notifications: Arc<InMemoryNotificationRepository>,
    pub timeline: Arc<InMemoryTimeline>,
    pub policies: Arc<InMemoryPolicyStore>,
    pub templates: Arc<InMemoryTemplateStore>,
    pub clock: Arc<FixedClock>,
    pub session_type: SessionType,
}

pub fn photographer() -> UserId {
    UserId::new("photographer-1").unwrap()
}

pub fn client() -> UserId {
    UserId::new("client-1").unwrap()
}

pub fn admin() -> UserId {
    UserId::new("admin-1").unwrap()
}

pub fn metadata(user: UserId) -> CommandMetadata {
    CommandMetadata::new(user).with_correlation_id("test-correlation")
}

/// Monday 2024-01-15 at `hour:minute` UTC.
pub fn monday_at(hour: i64, minute: i64) -> Timestamp {
    Timestamp::from_unix_millis(MONDAY_MILLIS)
        .unwrap()
        .plus_minutes(hour * 60 + minute)
}

/// Clock starts Saturday 2024-01-13T10:00Z, 48 hours before Monday 10:00.
pub async fn fixture() -> Fixture {
    let clock = Arc::new(FixedClock::at(monday_at(10, 0).plus_hours(-48)));
    let directory = Arc::new(InMemoryDirectory::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let timeline = Arc::new(InMemoryTimeline::new());
    let policies = Arc::new(InMemoryPolicyStore::new());
    let templates = Arc::new(InMemoryTemplateStore::new());

    directory
        .add_user(
            UserAccount::new(photographer(), Role::Photographer, "Grace").with_availability(vec![
                AvailabilitySlot::parse(1, "09:00", "18:00").unwrap(),
            ]),
        )
        .await;
    directory
        .add_user(UserAccount::new(client(), Role::Client, "Ada"))
        .await;
    directory
        .add_user(UserAccount::new(admin(), Role::Admin, "Root"))
        .await;
    directory
        .add_client(ClientRecord::new(client(), "Ada Lovelace", photographer()))
        .await;

    let session_type = SessionType::new(photographer(), "Portrait");
    directory.add_session_type(session_type.clone()).await;

    let dispatcher = Arc::new(NotificationDispatcher::new(
        directory.clone(),
        notifications.clone(),
        Arc::new(LoggingPushTransport::new()),
        clock.clone(),
    ));
    let notifier = Arc::new(SessionNotifier::new(
        dispatcher,
        templates.clone(),
        directory.clone(),
        directory.clone(),
        timeline.clone(),
    ));

    let services = BookingServices {
        sessions: sessions.clone(),
        accounts: directory.clone(),
        clients: directory.clone(),
        session_types: directory.clone(),
        policies: policies.clone(),
        notifier,
        clock: clock.clone(),
    };

    Fixture {
        services,
        directory,
        sessions,
        notifications,
        timeline,
        policies,
        templates,
        clock,
        session_type,
    }
}

pub fn create_command(start: Timestamp, end: Timestamp) -> CreateSessionCommand {
    CreateSessionCommand {
        photographer_id: photographer(),
        client_id: client(),
        session_type: SessionTypeRef::Name("Portrait".to_string()),
        location: "Studio A".to_string(),
        notes: None,
        starts_at: start,
        ends_at: end,
    }
}

/// Books a session as the photographer; panics on rejection.
pub async fn book(fx: &Fixture, start: Timestamp, end: Timestamp) -> Session {
    CreateSessionHandler::new(fx.services.clone())
        .handle(create_command(start, end), metadata(photographer()))
        .await
        .unwrap()
        .session
}
