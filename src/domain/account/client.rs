//! Client directory entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// A client in a photographer's directory.
///
/// The client's id doubles as their account id, so notifications addressed
/// to a client go to `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: UserId,
    pub name: String,
    /// Photographer whose directory this client belongs to.
    pub photographer_id: UserId,
}

impl ClientRecord {
    pub fn new(id: UserId, name: impl Into<String>, photographer_id: UserId) -> Self {
        Self {
            id,
            name: name.into(),
            photographer_id,
        }
    }

    /// Whether the photographer may book sessions for this client.
    pub fn is_served_by(&self, photographer_id: &UserId) -> bool {
        &self.photographer_id == photographer_id
    }
}
