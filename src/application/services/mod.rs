//! Application services shared by the command handlers and the reminder
//! scheduler.

mod access;
mod availability_guard;
mod conflict_detector;
mod notification_dispatcher;
mod session_notifier;

pub use access::{enforce, load_actor};
pub use availability_guard::AvailabilityGuard;
pub use conflict_detector::ConflictDetector;
pub use notification_dispatcher::{NotificationDispatcher, NotificationRequest};
pub use session_notifier::{
    format_session_date, record_on_timeline, NotificationStatus, SessionNotifier,
};
