/// Bearer authentication middleware for Axum
///
/// Extracts the token from `Authorization: Bearer <token>`, verifies it with
/// [`TokenService`] and inserts an [`AuthContext`] into the request
/// extensions. The check depends only on the headers, the signing secret and
/// the clock.
///
/// A missing header and a bad token produce the same 401 response; they are
/// only told apart in the logs.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use taskboard_shared::auth::jwt::TokenService;
/// use taskboard_shared::auth::middleware::{bearer_auth, AuthContext};
///
/// async fn protected_handler(auth: AuthContext) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tokens = TokenService::new("your-jwt-secret")?;
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler))
///     .layer(middleware::from_fn_with_state(tokens, bearer_auth));
/// # Ok(())
/// # }
/// ```

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use super::jwt::{TokenError, TokenService};

/// Identity resolved from a verified token
///
/// Handlers behind [`bearer_auth`] take it directly as an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Owner of the presented token
    pub user_id: Uuid,
}

/// Error type for authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header
    #[error("No token supplied")]
    MissingCredentials,

    /// Token present but failed verification
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Both cases share one body
        let body = Json(json!({
            "error": "unauthorized",
            "message": "Authorization denied",
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Extracts the bearer token from request headers
///
/// The scheme match is case-insensitive; an empty token counts as missing.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the caller's identity from request headers
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if there is no bearer token
/// - `AuthError::InvalidToken` if verification fails
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingCredentials)?;
    let user_id = tokens.verify(token)?;

    Ok(AuthContext { user_id })
}

/// Bearer authentication middleware
///
/// Install with `axum::middleware::from_fn_with_state(tokens, bearer_auth)`.
pub async fn bearer_auth(
    State(tokens): State<TokenService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth = match authenticate(req.headers(), &tokens) {
        Ok(auth) => auth,
        Err(AuthError::MissingCredentials) => {
            debug!(path = %req.uri().path(), "Request without bearer token rejected");
            return Err(AuthError::MissingCredentials);
        }
        Err(AuthError::InvalidToken(e)) => {
            warn!(path = %req.uri().path(), error = %e, "Bearer token rejected");
            return Err(AuthError::InvalidToken(e));
        }
    };

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AuthError::MissingCredentials)
    }
}
