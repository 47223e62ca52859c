//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod notification;
pub mod policy;
pub mod session;
pub mod template;

pub use notification::{
    ListNotificationsHandler, ListNotificationsQuery, MarkNotificationReadCommand,
    MarkNotificationReadHandler, MarkNotificationReadResult,
};
pub use policy::{
    CreatePolicyVersionCommand, CreatePolicyVersionHandler, GetPolicyHandler, GetPolicyQuery,
};
pub use session::{
    AddSessionNoteCommand, AddSessionNoteHandler, AddSessionNoteResult, BookingServices,
    CancelSessionCommand, CancelSessionHandler, CancelSessionResult, ClientConfirmSessionCommand,
    ClientConfirmSessionHandler, ClientConfirmSessionResult, ConfirmSessionCommand,
    ConfirmSessionHandler, ConfirmSessionResult, CreateSessionCommand, CreateSessionHandler,
    CreateSessionResult, SessionTypeRef, UpdateSessionCommand, UpdateSessionHandler,
    UpdateSessionResult,
};
pub use template::{SaveTemplateCommand, SaveTemplateHandler};
