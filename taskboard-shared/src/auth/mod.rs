/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing
/// - [`jwt`]: Bearer token issuing and verification
/// - [`middleware`]: Axum bearer-auth middleware and the `AuthContext` extractor
/// - [`authorization`]: Resource ownership checks
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{TokenLifetime, TokenService};
/// use taskboard_shared::auth::password::{hash_password, verify_password, HashingParams};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password", &HashingParams::default())?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Token issuing
/// let tokens = TokenService::new("secret-key")?;
/// let token = tokens.issue(Uuid::new_v4(), TokenLifetime::Signup.duration())?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
