//! Session edits and the diff they produce.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{SessionTypeId, TimeRange};

/// Requested edits to a session. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionChanges {
    /// Resolved catalog entry (id and display name).
    pub session_type: Option<(SessionTypeId, String)>,
    pub location: Option<String>,
    /// `Some("")` clears the notes.
    pub notes: Option<String>,
    pub range: Option<TimeRange>,
}

impl SessionChanges {
    pub fn is_empty(&self) -> bool {
        self.session_type.is_none()
            && self.location.is_none()
            && self.notes.is_none()
            && self.range.is_none()
    }
}

/// One field that actually changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub from: JsonValue,
    pub to: JsonValue,
}

impl FieldChange {
    pub fn new(field: &str, from: impl Into<JsonValue>, to: impl Into<JsonValue>) -> Self {
        Self {
            field: field.to_string(),
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Fields changed by an update, in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionDiff {
    pub changes: Vec<FieldChange>,
}

impl SessionDiff {
    pub fn push(&mut self, change: FieldChange) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// True when the start or end time moved.
    pub fn is_reschedule(&self) -> bool {
        self.changes
            .iter()
            .any(|c| c.field == "startsAt" || c.field == "endsAt")
    }

    pub fn fields(&self) -> Vec<&str> {
        self.changes.iter().map(|c| c.field.as_str()).collect()
    }
}
