/// Account flow: signup, login and profile
///
/// Signup hashes the password with a fresh salt, stores the user and issues a
/// short-lived (1 hour) token. Login checks the password and issues a 24 hour
/// token. Both failure causes of login (unknown email, wrong password) yield
/// the same [`AccountError::InvalidCredentials`] after the same amount of
/// work: an unknown email is checked against a placeholder hash.
///
/// Argon2 is CPU-bound, so hashing and verification run on tokio's blocking
/// pool.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_shared::auth::jwt::TokenService;
/// use taskboard_shared::auth::password::HashingParams;
/// use taskboard_shared::services::accounts::{AccountService, Signup};
/// use taskboard_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let accounts = AccountService::new(
///     Arc::new(MemoryStore::new()),
///     TokenService::new("secret")?,
///     HashingParams::default(),
/// );
///
/// let session = accounts
///     .signup(Signup {
///         name: "Ann".into(),
///         email: "ann@x.com".into(),
///         password: "secret1".into(),
///     })
///     .await?;
/// println!("token: {}", session.token);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::jwt::{TokenError, TokenLifetime, TokenService};
use crate::auth::password::{hash_password, verify_password, HashingParams, PasswordError};
use crate::models::user::{NewUser, PublicUser};
use crate::store::{Datastore, StoreError, UserStore};

/// Error type for the account flow
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Email already registered
    #[error("User already exists")]
    Conflict,

    /// Unknown email or wrong password
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// Token refers to a user that no longer exists
    #[error("User not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => AccountError::Conflict,
            other => AccountError::Store(other),
        }
    }
}

/// Signup input
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// Token plus public user view, returned by signup and login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

const PLACEHOLDER_PASSWORD: &str = "taskboard-placeholder-password";

/// Account flow over a [`Datastore`]
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Datastore>,
    tokens: TokenService,
    hashing: HashingParams,
    /// Verified against when the email is unknown; hashed on first use
    placeholder_hash: Arc<OnceCell<String>>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Datastore>, tokens: TokenService, hashing: HashingParams) -> Self {
        Self {
            store,
            tokens,
            hashing,
            placeholder_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Registers a new user and issues a signup token
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Conflict` if the email is taken, including when
    /// a concurrent signup wins the insert
    pub async fn signup(&self, input: Signup) -> Result<AuthResponse, AccountError> {
        if self.store.find_user_by_email(&input.email).await?.is_some() {
            debug!(email = %input.email, "Signup rejected, email already registered");
            return Err(AccountError::Conflict);
        }

        let password_hash = hash_blocking(input.password, self.hashing).await?;

        let user = self
            .store
            .create_user(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await?;

        let token = self.tokens.issue(user.id, TokenLifetime::Signup.duration())?;

        info!(user_id = %user.id, "User signed up");

        Ok(AuthResponse {
            token,
            user: PublicUser::from(user),
        })
    }

    /// Checks credentials and issues a login token
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` for an unknown email and for
    /// a wrong password alike
    pub async fn login(&self, input: Login) -> Result<AuthResponse, AccountError> {
        let Some(user) = self.store.find_user_by_email(&input.email).await? else {
            let placeholder = self.placeholder_hash().await?;
            verify_blocking(input.password, placeholder).await?;

            debug!("Login rejected, unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        if !verify_blocking(input.password, user.password_hash.clone()).await? {
            debug!(user_id = %user.id, "Login rejected, wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, TokenLifetime::Login.duration())?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse {
            token,
            user: PublicUser::from(user),
        })
    }

    async fn placeholder_hash(&self) -> Result<String, PasswordError> {
        let params = self.hashing;
        let hash = self
            .placeholder_hash
            .get_or_try_init(|| hash_blocking(PLACEHOLDER_PASSWORD.to_string(), params))
            .await?;

        Ok(hash.clone())
    }

    /// Returns the public view of a user
    pub async fn profile(&self, user_id: Uuid) -> Result<PublicUser, AccountError> {
        self.store
            .find_user_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or(AccountError::NotFound)
    }

    /// Renames a user; blank names leave the record untouched
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
    ) -> Result<PublicUser, AccountError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());

        let Some(name) = name else {
            return self.profile(user_id).await;
        };

        let user = self
            .store
            .update_user_name(user_id, name)
            .await?
            .ok_or(AccountError::NotFound)?;

        info!(user_id = %user.id, "Profile updated");

        Ok(PublicUser::from(user))
    }
}

async fn hash_blocking(password: String, params: HashingParams) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password, &params))
        .await
        .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::VerifyError(format!("Verification task failed: {}", e)))?
}
