//! In-memory adapters.
//!
//! Every port has an in-memory implementation backed by `tokio::sync::RwLock`.
//! They back the test suites and the `memory` storage backend of the
//! reminder worker.

mod directory;
mod notification_repository;
mod policy_store;
mod session_repository;
mod template_store;
mod timeline;

pub use directory::InMemoryDirectory;
pub use notification_repository::InMemoryNotificationRepository;
pub use policy_store::InMemoryPolicyStore;
pub use session_repository::InMemorySessionRepository;
pub use template_store::InMemoryTemplateStore;
pub use timeline::InMemoryTimeline;
