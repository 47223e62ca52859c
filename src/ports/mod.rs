//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Directory Ports
//!
//! - `AccountStore` - Users with role, preferences and availability
//! - `ClientDirectory` - Client records and their photographer
//! - `SessionTypeCatalog` - Session types offered by a photographer
//!
//! ## Booking Ports
//!
//! - `SessionRepository` - Session persistence and range/status queries
//! - `PolicyStore` - Append-only cancellation policy versions
//! - `TimelineSink` - Fire-and-forget timeline/audit entries
//!
//! ## Notification Ports
//!
//! - `NotificationRepository` - Delivery records and the inbox
//! - `TemplateStore` - Validated per-photographer templates
//! - `PushTransport` - External push delivery
//!
//! ## Time
//!
//! - `Clock` - Injectable "now"

mod account_store;
mod client_directory;
mod clock;
mod notification_repository;
mod policy_store;
mod push_transport;
mod session_repository;
mod session_type_catalog;
mod template_store;
mod timeline_sink;

pub use account_store::AccountStore;
pub use client_directory::ClientDirectory;
pub use clock::Clock;
pub use notification_repository::NotificationRepository;
pub use policy_store::PolicyStore;
pub use push_transport::PushTransport;
pub use session_repository::{SessionFilter, SessionRepository};
pub use session_type_catalog::SessionTypeCatalog;
pub use template_store::TemplateStore;
pub use timeline_sink::TimelineSink;
