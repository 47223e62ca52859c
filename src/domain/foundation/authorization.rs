//! Role-based authorization.
//!
//! Roles form a closed set, each mapped to a fixed capability list by a
//! static table. Handlers call [`authorize`] with an [`AuthorizationContext`]
//! and log the resulting [`AuthorizationResult`] before converting it into
//! an error, so every denial is auditable.
//!
//! Capability checks answer "may this kind of user do this at all";
//! ownership checks (a photographer acting on their own sessions) are layered
//! on top through [`AuthorizationContext::require_owner`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, ErrorCode, UserId};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Photographer,
    Client,
}

impl Role {
    /// Admins bypass ownership checks.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Photographer => "photographer",
            Role::Client => "client",
        };
        write!(f, "{}", s)
    }
}

/// Something a role may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create, edit, cancel, confirm and annotate sessions.
    ManageSessions,
    /// Confirm attendance on one's own sessions.
    ConfirmAsClient,
    /// Cancel one's own sessions as the client.
    CancelAsClient,
    /// Annotate sessions one participates in.
    AddSessionNotes,
    /// Publish new cancellation policy versions.
    ManagePolicy,
    /// Save message templates.
    ManageTemplates,
    /// Read and acknowledge one's own notifications.
    ReadNotifications,
}

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ManageSessions,
    Capability::AddSessionNotes,
    Capability::ManagePolicy,
    Capability::ManageTemplates,
    Capability::ReadNotifications,
];

const PHOTOGRAPHER_CAPABILITIES: &[Capability] = &[
    Capability::ManageSessions,
    Capability::AddSessionNotes,
    Capability::ManageTemplates,
    Capability::ReadNotifications,
];

const CLIENT_CAPABILITIES: &[Capability] = &[
    Capability::ConfirmAsClient,
    Capability::CancelAsClient,
    Capability::AddSessionNotes,
    Capability::ReadNotifications,
];

/// Static role → capability table.
pub fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::Admin => ADMIN_CAPABILITIES,
        Role::Photographer => PHOTOGRAPHER_CAPABILITIES,
        Role::Client => CLIENT_CAPABILITIES,
    }
}

/// Result of an authorization check.
#[derive(Debug, Clone)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// The resource type being accessed (e.g., "Session", "Policy").
    pub resource_type: &'static str,

    /// The ID of the resource being accessed.
    pub resource_id: String,

    /// The user who requested access.
    pub user_id: String,

    /// Optional reason for denial (if denied).
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    /// Returns true if access was granted.
    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// Emits the decision to the log; denials at `warn`.
    pub fn log(&self, action: &str) {
        if self.granted {
            tracing::debug!(
                user_id = %self.user_id,
                resource_type = self.resource_type,
                resource_id = %self.resource_id,
                action,
                "Authorization granted"
            );
        } else {
            tracing::warn!(
                user_id = %self.user_id,
                resource_type = self.resource_type,
                resource_id = %self.resource_id,
                action,
                reason = self.denial_reason.as_deref().unwrap_or("unspecified"),
                "Authorization denied"
            );
        }
    }

    /// Converts this result to a `Result<(), DomainError>`.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                self.denial_reason
                    .unwrap_or_else(|| "Access denied".to_string()),
            )
            .with_detail("resource_type", self.resource_type)
            .with_detail("resource_id", self.resource_id)
            .with_detail("user_id", self.user_id))
        }
    }
}

/// Context for authorization decisions: who does what to which resource.
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    pub user_id: UserId,
    pub role: Role,
    pub action: &'static str,
    pub resource_type: &'static str,
    pub resource_id: String,
}

impl AuthorizationContext {
    pub fn new(
        user_id: UserId,
        role: Role,
        action: &'static str,
        resource_type: &'static str,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            role,
            action,
            resource_type,
            resource_id: resource_id.into(),
        }
    }

    fn grant(&self) -> AuthorizationResult {
        AuthorizationResult {
            granted: true,
            resource_type: self.resource_type,
            resource_id: self.resource_id.clone(),
            user_id: self.user_id.to_string(),
            denial_reason: None,
        }
    }

    fn deny(&self, reason: impl Into<String>) -> AuthorizationResult {
        AuthorizationResult {
            granted: false,
            resource_type: self.resource_type,
            resource_id: self.resource_id.clone(),
            user_id: self.user_id.to_string(),
            denial_reason: Some(reason.into()),
        }
    }

    /// Requires that `owner` is the acting user, unless the actor is an admin.
    pub fn require_owner(&self, owner: &UserId) -> AuthorizationResult {
        if self.role.is_admin() || &self.user_id == owner {
            self.grant()
        } else {
            self.deny(format!(
                "User {} does not own {} {}",
                self.user_id, self.resource_type, self.resource_id
            ))
        }
    }

    /// Requires the acting user to be one of `participants`, unless admin.
    pub fn require_participant(&self, participants: &[&UserId]) -> AuthorizationResult {
        if self.role.is_admin() || participants.contains(&&self.user_id) {
            self.grant()
        } else {
            self.deny(format!(
                "User {} is not a participant of {} {}",
                self.user_id, self.resource_type, self.resource_id
            ))
        }
    }

    /// Requires that the acting user is exactly `participant` (no admin bypass).
    pub fn require_user(&self, participant: &UserId) -> AuthorizationResult {
        if &self.user_id == participant {
            self.grant()
        } else {
            self.deny(format!(
                "Only {} may {} {} {}",
                participant, self.action, self.resource_type, self.resource_id
            ))
        }
    }
}

/// Checks the role's capability table.
pub fn authorize(ctx: &AuthorizationContext, capability: Capability) -> AuthorizationResult {
    if capabilities(ctx.role).contains(&capability) {
        ctx.grant()
    } else {
        ctx.deny(format!(
            "Role {} lacks capability {:?} required to {}",
            ctx.role, capability, ctx.action
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(user: &str, role: Role) -> AuthorizationContext {
        AuthorizationContext::new(
            UserId::new(user).unwrap(),
            role,
            "cancel",
            "Session",
            "s-1",
        )
    }

    #[test]
    fn photographer_can_manage_sessions_but_not_policy() {
        let c = ctx("p-1", Role::Photographer);
        assert!(authorize(&c, Capability::ManageSessions).is_granted());
        assert!(!authorize(&c, Capability::ManagePolicy).is_granted());
    }

    #[test]
    fn client_cannot_manage_sessions() {
        let c = ctx("c-1", Role::Client);
        assert!(!authorize(&c, Capability::ManageSessions).is_granted());
        assert!(authorize(&c, Capability::ConfirmAsClient).is_granted());
    }

    #[test]
    fn admin_bypasses_ownership_but_not_participant_checks() {
        let c = ctx("admin", Role::Admin);
        let owner = UserId::new("p-1").unwrap();
        assert!(c.require_owner(&owner).is_granted());
        assert!(!c.require_user(&owner).is_granted());
    }

    #[test]
    fn participants_and_admins_pass_participant_check() {
        let photographer = UserId::new("p-1").unwrap();
        let client = UserId::new("c-1").unwrap();

        assert!(ctx("c-1", Role::Client)
            .require_participant(&[&photographer, &client])
            .is_granted());
        assert!(ctx("admin", Role::Admin)
            .require_participant(&[&photographer, &client])
            .is_granted());
        assert!(!ctx("c-2", Role::Client)
            .require_participant(&[&photographer, &client])
            .is_granted());
    }

    #[test]
    fn denial_converts_to_forbidden_with_details() {
        let c = ctx("p-2", Role::Photographer);
        let err = c
            .require_owner(&UserId::new("p-1").unwrap())
            .into_result()
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.detail("resource_type"), Some("Session"));
        assert_eq!(err.detail("resource_id"), Some("s-1"));
        assert_eq!(err.detail("user_id"), Some("p-2"));
    }
}
