//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, authorization and event
//! infrastructure that form the vocabulary of the booking domain.

mod authorization;
mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod time_range;
mod timestamp;

pub use authorization::{
    authorize, capabilities, AuthorizationContext, AuthorizationResult, Capability, Role,
};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{NotificationId, SessionId, SessionTypeId, UserId};
pub use state_machine::StateMachine;
pub use time_range::TimeRange;
pub use timestamp::Timestamp;
