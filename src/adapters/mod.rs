//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and fixed clocks
//! - `memory` - In-memory stores for every port
//! - `postgres` - PostgreSQL session and policy persistence
//! - `push` - Push transports (logging, HTTP webhook)

pub mod clock;
pub mod memory;
pub mod postgres;
pub mod push;

pub use clock::{FixedClock, SystemClock};
pub use memory::{
    InMemoryDirectory, InMemoryNotificationRepository, InMemoryPolicyStore,
    InMemorySessionRepository, InMemoryTemplateStore, InMemoryTimeline,
};
pub use postgres::{PostgresPolicyStore, PostgresSessionRepository};
pub use push::{LoggingPushTransport, WebhookPushConfig, WebhookPushTransport};
