//! Session module.
//!
//! The booked session aggregate and its lifecycle:
//!
//! ```text
//! scheduled ──► confirmed ──► client-confirmed ──► completed
//!     │             │                │
//!     └─────────────┴────────────────┴──► cancelled
//! ```
//!
//! Also holds the reminder windows, the double-booking predicate and the
//! error taxonomy returned by booking commands.

mod aggregate;
mod changes;
mod conflict;
mod errors;
mod events;
mod reminder;
mod status;

pub use aggregate::{NewSession, Session, SessionParts, MAX_LOCATION_LENGTH, MAX_NOTES_LENGTH};
pub use changes::{FieldChange, SessionChanges, SessionDiff};
pub use conflict::find_conflict;
pub use errors::BookingError;
pub use events::{
    ReminderDispatched, SessionCancelled, SessionClientConfirmed, SessionConfirmed,
    SessionCreated, SessionNoteAdded, SessionRescheduled, SessionUpdated,
};
pub use reminder::{ReminderKind, ReminderThresholds};
pub use status::SessionStatus;
