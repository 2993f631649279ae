/// Bearer token issuing and verification
///
/// Tokens are HS256-signed JWTs carrying the owner's user ID and an expiry.
/// Nothing is stored server-side: a token stays valid until `exp` passes,
/// even if the client discards it earlier.
///
/// # Lifetimes
///
/// - **Signup**: 1 hour
/// - **Login**: 24 hours
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{TokenLifetime, TokenService};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tokens = TokenService::new("your-secret-key-at-least-32-bytes")?;
/// let user_id = Uuid::new_v4();
///
/// let token = tokens.issue(user_id, TokenLifetime::Login.duration())?;
/// assert_eq!(tokens.verify(&token)?, user_id);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped on every token
pub const ISSUER: &str = "taskboard";

/// Which flow a token is issued for
///
/// Signup tokens are deliberately shorter-lived than login tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLifetime {
    /// Issued right after account creation (1 hour)
    Signup,

    /// Issued after a successful password check (24 hours)
    Login,
}

impl TokenLifetime {
    /// Gets the expiration duration for this lifetime
    pub fn duration(&self) -> Duration {
        match self {
            TokenLifetime::Signup => Duration::hours(1),
            TokenLifetime::Login => Duration::hours(24),
        }
    }
}

/// Error type for token operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// No signing secret configured
    #[error("Signing secret is empty")]
    MissingSecret,

    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token `exp` is in the past
    #[error("Token has expired")]
    Expired,

    /// Token is not a well-formed JWT for this service
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Token was signed with a different key
    #[error("Token signature is invalid")]
    SignatureInvalid,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - owner user ID
    pub sub: Uuid,

    /// Issuer - always [`ISSUER`]
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring `ttl` from now
    pub fn new(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies bearer tokens with a process-wide secret
///
/// Cheap to clone; keys are shared behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a token service from the signing secret
    ///
    /// # Errors
    ///
    /// Returns `TokenError::MissingSecret` if the secret is empty
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
        })
    }

    /// Issues a token for `user_id` that expires after `ttl`
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, TokenError> {
        self.sign(&Claims::new(user_id, ttl))
    }

    /// Signs arbitrary claims
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding)
            .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
    }

    /// Verifies a token and returns the owner ID it carries
    ///
    /// # Errors
    ///
    /// - `TokenError::Expired` once `exp` has passed (no leeway)
    /// - `TokenError::SignatureInvalid` if signed with another secret
    /// - `TokenError::Malformed` for anything that is not a valid token of ours
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Verifies a token and returns its full claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }
}
