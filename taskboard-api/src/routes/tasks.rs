/// Task endpoints
///
/// All routes require a bearer token and only ever see the caller's tasks.
///
/// # Endpoints
///
/// - `POST /api/tasks` - Create a task
/// - `GET /api/tasks` - List own tasks, newest first
/// - `PUT /api/tasks/:id` - Partially update a task
/// - `DELETE /api/tasks/:id` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::task::Task,
    services::TaskChanges,
};
use uuid::Uuid;

/// Create task request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    /// Title (required, non-blank)
    pub title: Option<String>,

    /// Optional description
    pub description: Option<String>,
}

/// Update task request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// One of `pending`, `in-progress`, `completed`
    pub status: Option<String>,
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(req: UpdateTaskRequest) -> Self {
        TaskChanges {
            title: req.title,
            description: req.description,
            status: req.status,
        }
    }
}

/// Delete confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub msg: String,
}

/// Parses a path ID; anything that is not a UUID cannot name a task
fn parse_task_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Task not found".to_string()))
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Authorization: Bearer <token>
///
/// { "title": "Buy milk", "description": "2 litres" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank title
/// - `401 Unauthorized`: Missing or invalid token
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.tasks.create(&auth, req.title, req.description).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List own tasks, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.tasks.list(&auth).await?))
}

/// Update a task
///
/// # Errors
///
/// Checked in this order:
///
/// - `404 Not Found`: No such task
/// - `401 Unauthorized`: Task owned by another user
/// - `400 Bad Request`: Invalid status or blank title
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task_id = parse_task_id(&id)?;

    let task = state.tasks.update(&auth, task_id, TaskChanges::from(req)).await?;

    Ok(Json(task))
}

/// Delete a task
///
/// # Errors
///
/// - `401 Unauthorized`: Missing/invalid token, or task owned by another user
/// - `404 Not Found`: No such task (including one already deleted)
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let task_id = parse_task_id(&id)?;

    state.tasks.delete(&auth, task_id).await?;

    Ok(Json(DeleteResponse {
        msg: "Task removed".to_string(),
    }))
}
