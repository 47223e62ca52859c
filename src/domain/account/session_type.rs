//! Session-type catalog entries and name matching.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionTypeId, UserId};

/// Catalog entry describing a kind of session (portrait, wedding, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionType {
    pub id: SessionTypeId,
    pub photographer_id: UserId,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

impl SessionType {
    pub fn new(photographer_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: SessionTypeId::new(),
            photographer_id,
            name: name.into(),
            archived: false,
        }
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    /// Exact match after normalization of both names.
    pub fn matches_name(&self, candidate: &str) -> bool {
        normalize_type_name(&self.name) == normalize_type_name(candidate)
    }
}

/// Trims, lowercases and collapses inner whitespace runs to one space.
pub fn normalize_type_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
