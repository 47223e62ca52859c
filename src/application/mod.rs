//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers own one transition each; the reminder scheduler is the
//! only background writer and only ever flips reminder flags.

pub mod handlers;
pub mod reminder_scheduler;
pub mod services;

pub use handlers::{
    // Session handlers
    AddSessionNoteCommand, AddSessionNoteHandler, AddSessionNoteResult,
    BookingServices, SessionTypeRef,
    CancelSessionCommand, CancelSessionHandler, CancelSessionResult,
    ClientConfirmSessionCommand, ClientConfirmSessionHandler, ClientConfirmSessionResult,
    ConfirmSessionCommand, ConfirmSessionHandler, ConfirmSessionResult,
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult,
    UpdateSessionCommand, UpdateSessionHandler, UpdateSessionResult,
    // Notification inbox
    ListNotificationsHandler, ListNotificationsQuery,
    MarkNotificationReadCommand, MarkNotificationReadHandler, MarkNotificationReadResult,
    // Policy and templates
    CreatePolicyVersionCommand, CreatePolicyVersionHandler, GetPolicyHandler, GetPolicyQuery,
    SaveTemplateCommand, SaveTemplateHandler,
};
pub use reminder_scheduler::{ReminderScheduler, ReminderSchedulerConfig, SweepReport};
pub use services::{
    AvailabilityGuard, ConflictDetector, NotificationDispatcher, NotificationRequest,
    NotificationStatus, SessionNotifier,
};
