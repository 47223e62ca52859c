//! Booking command errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};
use crate::domain::notification::TemplateError;
use crate::domain::policy::LeadTimeViolation;

/// Terminal failure of a booking command. Nothing was written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    /// Malformed input: bad dates, missing fields.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Lead-time window of the session's policy snapshot not met.
    #[error("{0}")]
    PolicyViolation(LeadTimeViolation),

    /// Another non-cancelled session of the photographer overlaps.
    #[error("Photographer already has a session at that time")]
    Conflict { conflicting_session: SessionId },

    /// Outside the photographer's working hours.
    #[error("{0}")]
    Availability(String),

    /// Actor lacks rights over the target.
    #[error("{0}")]
    Authorization(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Transition not allowed from the current status.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl BookingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        BookingError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::Validation { .. } => ErrorCode::ValidationFailed,
            BookingError::PolicyViolation(_) => ErrorCode::PolicyViolation,
            BookingError::Conflict { .. } => ErrorCode::BookingConflict,
            BookingError::Availability(_) => ErrorCode::OutsideAvailability,
            BookingError::Authorization(_) => ErrorCode::Forbidden,
            BookingError::NotFound { resource, .. } => match *resource {
                "Session" => ErrorCode::SessionNotFound,
                "Client" => ErrorCode::ClientNotFound,
                "Session type" => ErrorCode::SessionTypeNotFound,
                "Notification" => ErrorCode::NotificationNotFound,
                "Policy version" => ErrorCode::PolicyNotFound,
                _ => ErrorCode::UserNotFound,
            },
            BookingError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => BookingError::Validation {
                field: err.detail("field").unwrap_or("input").to_string(),
                message: err.message,
            },
            ErrorCode::SessionNotFound => BookingError::NotFound {
                resource: "Session",
                id: err.detail("session_id").unwrap_or_default().to_string(),
            },
            ErrorCode::ClientNotFound => BookingError::NotFound {
                resource: "Client",
                id: err.detail("client_id").unwrap_or_default().to_string(),
            },
            ErrorCode::SessionTypeNotFound => BookingError::NotFound {
                resource: "Session type",
                id: err.detail("session_type").unwrap_or_default().to_string(),
            },
            ErrorCode::UserNotFound => BookingError::NotFound {
                resource: "User",
                id: err.detail("user_id").unwrap_or_default().to_string(),
            },
            ErrorCode::NotificationNotFound => BookingError::NotFound {
                resource: "Notification",
                id: err.detail("notification_id").unwrap_or_default().to_string(),
            },
            ErrorCode::PolicyNotFound => BookingError::NotFound {
                resource: "Policy version",
                id: err.detail("version").unwrap_or_default().to_string(),
            },
            ErrorCode::InvalidStateTransition | ErrorCode::SessionCancelled => {
                BookingError::InvalidState(err.message)
            }
            ErrorCode::OutsideAvailability => BookingError::Availability(err.message),
            ErrorCode::Unauthorized | ErrorCode::Forbidden => {
                BookingError::Authorization(err.message)
            }
            ErrorCode::PolicyViolation
            | ErrorCode::BookingConflict
            | ErrorCode::DatabaseError
            | ErrorCode::TransportError
            | ErrorCode::InternalError => BookingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<LeadTimeViolation> for BookingError {
    fn from(violation: LeadTimeViolation) -> Self {
        BookingError::PolicyViolation(violation)
    }
}

impl From<TemplateError> for BookingError {
    fn from(err: TemplateError) -> Self {
        BookingError::validation("body", err.to_string())
    }
}
