/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/signup` - Register and get a 1 hour token
/// - `POST /api/auth/login` - Login and get a 24 hour token

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::services::{AuthResponse, Login, Signup};
use validator::Validate;

/// Signup request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Email address (unique, case-sensitive)
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
///
/// Not validated: every rejected login, however malformed, gets the same
/// `Invalid Credentials` answer.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/signup
/// Content-Type: application/json
///
/// { "name": "Ann", "email": "ann@x.com", "password": "secret1" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ...",
///   "user": { "id": "uuid", "name": "Ann", "email": "ann@x.com" }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: A field is missing or the email is already registered
/// - `500 Internal Server Error`: Server error
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let session = state
        .accounts
        .signup(Signup {
            name: req.name.trim().to_string(),
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// { "email": "ann@x.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `Invalid Credentials`, whatever the cause
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state
        .accounts
        .login(Login {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(session))
}
