/// Client session context
///
/// A [`Session`] is an immutable value: either anonymous or holding a token
/// and the user it belongs to. Every transition (restore, login, signup,
/// logout) returns a new value and keeps the [`TokenStorage`] in step, so the
/// stored token and the session never disagree.
///
/// # Example
///
/// ```no_run
/// use taskboard_client::{ApiClient, FileTokenStorage, Session};
///
/// # async fn example() -> Result<(), taskboard_client::ClientError> {
/// let client = ApiClient::new("http://localhost:5000")?;
/// let storage = FileTokenStorage::new(".taskboard");
///
/// let mut session = Session::restore(&client, &storage).await?;
/// if !session.is_authenticated() {
///     session = Session::login(&client, &storage, "ann@x.com", "secret1").await?;
/// }
///
/// let user = session.user().expect("logged in");
/// println!("Hello, {}", user.name);
///
/// let session = session.logout(&storage)?;
/// assert!(!session.is_authenticated());
/// # Ok(())
/// # }
/// ```

use taskboard_shared::{models::user::PublicUser, services::AuthResponse};
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::storage::TokenStorage;

/// Current authentication state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// No valid token
    #[default]
    Anonymous,

    /// Token plus the user it was issued to
    Authenticated { token: String, user: PublicUser },
}

impl Session {
    /// Initializes a session from storage
    ///
    /// With a stored token the profile is fetched to confirm it. If that
    /// fails for any reason the token is discarded and the session starts
    /// anonymous.
    ///
    /// # Errors
    ///
    /// Only storage failures are returned.
    pub async fn restore(client: &ApiClient, storage: &dyn TokenStorage) -> ClientResult<Session> {
        let Some(token) = storage.load()? else {
            debug!("No stored token, starting anonymous session");
            return Ok(Session::Anonymous);
        };

        match client.profile(&token).await {
            Ok(user) => {
                info!(user_id = %user.id, "Restored session");
                Ok(Session::Authenticated { token, user })
            }
            Err(e) => {
                warn!(error = %e, "Stored token rejected, clearing it");
                storage.clear()?;
                Ok(Session::Anonymous)
            }
        }
    }

    /// Persists a freshly issued token and returns the authenticated session
    pub fn establish(storage: &dyn TokenStorage, auth: AuthResponse) -> ClientResult<Session> {
        storage.store(&auth.token)?;

        Ok(Session::Authenticated {
            token: auth.token,
            user: auth.user,
        })
    }

    /// Registers and logs in
    pub async fn signup(
        client: &ApiClient,
        storage: &dyn TokenStorage,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<Session> {
        let auth = client.signup(name, email, password).await?;
        Self::establish(storage, auth)
    }

    /// Logs in with email and password
    pub async fn login(
        client: &ApiClient,
        storage: &dyn TokenStorage,
        email: &str,
        password: &str,
    ) -> ClientResult<Session> {
        let auth = client.login(email, password).await?;
        Self::establish(storage, auth)
    }

    /// Discards the stored token
    ///
    /// The token itself stays valid on the server until it expires.
    pub fn logout(self, storage: &dyn TokenStorage) -> ClientResult<Session> {
        storage.clear()?;
        Ok(Session::Anonymous)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Bearer token for requests
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` for an anonymous session
    pub fn token(&self) -> ClientResult<&str> {
        match self {
            Session::Authenticated { token, .. } => Ok(token),
            Session::Anonymous => Err(ClientError::NotAuthenticated),
        }
    }

    pub fn user(&self) -> Option<&PublicUser> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    /// Renames the current user and returns the updated session
    pub async fn rename(self, client: &ApiClient, name: &str) -> ClientResult<Session> {
        let token = self.token()?.to_string();
        let user = client.update_profile(&token, name).await?;

        Ok(Session::Authenticated { token, user })
    }
}
