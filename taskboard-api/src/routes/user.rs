/// Profile endpoint
///
/// - `GET /api/user/profile` - Current user's public view. An optional JSON
///   body `{ "name": "..." }` renames the user first.
/// - `PUT /api/user/profile` - Same handler
///
/// The password hash never leaves the server.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use taskboard_shared::{auth::middleware::AuthContext, models::user::PublicUser};

/// Optional profile update body
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
}

/// Returns (and optionally renames) the authenticated user
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Token owner no longer exists
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthContext,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Json<PublicUser>> {
    // No body (or an unreadable one) is a plain read
    let update = body.map(|Json(b)| b).unwrap_or_default();

    let user = state
        .accounts
        .update_profile(auth.user_id, update.name.as_deref())
        .await?;

    Ok(Json(user))
}
