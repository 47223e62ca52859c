//! Actor lookup and authorization enforcement shared by the handlers.

use crate::domain::account::UserAccount;
use crate::domain::foundation::{AuthorizationResult, UserId};
use crate::domain::session::BookingError;
use crate::ports::AccountStore;

/// Loads the acting user. Unknown actors are an authorization failure,
/// not a missing resource.
pub async fn load_actor(
    accounts: &dyn AccountStore,
    user_id: &UserId,
) -> Result<UserAccount, BookingError> {
    match accounts.find_user(user_id).await? {
        Some(account) => Ok(account),
        None => {
            tracing::warn!(user_id = %user_id, "Command issued by unknown user");
            Err(BookingError::Authorization(format!("Unknown user {}", user_id)))
        }
    }
}

/// Logs the decision, then turns a denial into `BookingError::Authorization`.
pub fn enforce(result: AuthorizationResult, action: &str) -> Result<(), BookingError> {
    result.log(action);
    result.into_result().map_err(BookingError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDirectory;
    use crate::domain::foundation::{AuthorizationContext, Role};

    #[tokio::test]
    async fn unknown_actor_is_an_authorization_failure() {
        let directory = InMemoryDirectory::new();
        let err = load_actor(&directory, &UserId::new("ghost").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Authorization(_)));
    }

    #[test]
    fn enforce_maps_denial() {
        let ctx = AuthorizationContext::new(
            UserId::new("c-1").unwrap(),
            Role::Client,
            "confirm",
            "Session",
            "s-1",
        );
        let err = enforce(ctx.require_user(&UserId::new("c-2").unwrap()), "confirm").unwrap_err();
        assert!(matches!(err, BookingError::Authorization(_)));
        assert!(enforce(ctx.require_user(&UserId::new("c-1").unwrap()), "confirm").is_ok());
    }
}
