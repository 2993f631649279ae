/// Ownership checks
///
/// Every task has exactly one owner. Mutating or deleting a task requires the
/// authenticated identity to be that owner; this is re-checked on every path
/// rather than trusted from an earlier lookup.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::authorization::require_ownership;
/// use taskboard_shared::auth::middleware::AuthContext;
/// use uuid::Uuid;
///
/// let owner = Uuid::new_v4();
/// let auth = AuthContext { user_id: owner };
///
/// assert!(require_ownership(&auth, owner).is_ok());
/// assert!(require_ownership(&auth, Uuid::new_v4()).is_err());
/// ```

use uuid::Uuid;

use super::middleware::AuthContext;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// Caller doesn't own the resource
    #[error("User {user_id} does not own this resource")]
    NotOwner { user_id: Uuid },
}

/// Checks that the caller owns a resource
///
/// # Errors
///
/// Returns `AuthzError::NotOwner` if the IDs differ
pub fn require_ownership(auth: &AuthContext, resource_owner_id: Uuid) -> Result<(), AuthzError> {
    if auth.user_id != resource_owner_id {
        return Err(AuthzError::NotOwner {
            user_id: auth.user_id,
        });
    }

    Ok(())
}
