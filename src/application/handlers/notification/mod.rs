//! Notification inbox handlers.

mod list_notifications;
mod mark_notification_read;

pub use list_notifications::{ListNotificationsHandler, ListNotificationsQuery};
pub use mark_notification_read::{
    MarkNotificationReadCommand, MarkNotificationReadHandler, MarkNotificationReadResult,
};
