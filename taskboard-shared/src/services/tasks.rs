/// Task flow: per-owner CRUD
///
/// Every operation is scoped to the authenticated identity. Update and delete
/// first look the task up, then check ownership, then write with the owner in
/// the write's own filter, so a task can never be touched by anyone else.
///
/// # Failure order
///
/// 1. Task absent: [`TaskError::NotFound`]
/// 2. Task owned by someone else: [`TaskError::Forbidden`]
/// 3. Patch invalid: [`TaskError::Validation`]

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::authorization::{require_ownership, AuthzError};
use crate::auth::middleware::AuthContext;
use crate::models::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::store::{Datastore, StoreError, TaskStore};

/// Error type for the task flow
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Input rejected before touching the store
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// No task with that ID
    #[error("Task not found")]
    NotFound,

    /// Task belongs to another user
    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn title_required() -> TaskError {
    TaskError::Validation {
        field: "title",
        message: "Title is required".to_string(),
    }
}

/// Update request as received; nothing is validated until ownership is known
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Raw status string, parsed after the ownership check
    pub status: Option<String>,
}

impl TaskChanges {
    fn into_patch(self) -> Result<TaskPatch, TaskError> {
        let title = match self.title {
            Some(title) => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(title_required());
                }
                Some(title.to_string())
            }
            None => None,
        };

        let status = self
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()
            .map_err(|e| TaskError::Validation {
                field: "status",
                message: e.to_string(),
            })?;

        Ok(TaskPatch {
            title,
            description: self.description,
            status,
        })
    }
}

impl From<TaskPatch> for TaskChanges {
    fn from(patch: TaskPatch) -> Self {
        Self {
            title: patch.title,
            description: patch.description,
            status: patch.status.map(|s| s.as_str().to_string()),
        }
    }
}

/// Task flow over a [`Datastore`]
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Datastore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    /// Creates a pending task owned by the caller
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Validation` if the title is missing or blank
    pub async fn create(
        &self,
        auth: &AuthContext,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Task, TaskError> {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(title_required)?;

        let task = self
            .store
            .create_task(NewTask {
                user_id: auth.user_id,
                title,
                description,
            })
            .await?;

        info!(user_id = %auth.user_id, task_id = %task.id, "Task created");

        Ok(task)
    }

    /// Lists the caller's tasks, newest first
    pub async fn list(&self, auth: &AuthContext) -> Result<Vec<Task>, TaskError> {
        let tasks = self.store.list_tasks(auth.user_id).await?;

        debug!(user_id = %auth.user_id, count = tasks.len(), "Listed tasks");

        Ok(tasks)
    }

    /// Applies a partial update to one of the caller's tasks
    ///
    /// The changes are validated only after the task is found and owned by
    /// the caller. An empty update returns the task unchanged.
    pub async fn update(
        &self,
        auth: &AuthContext,
        task_id: Uuid,
        changes: impl Into<TaskChanges>,
    ) -> Result<Task, TaskError> {
        let task = self.owned_task(auth, task_id).await?;
        let changes: TaskChanges = changes.into();
        let patch = changes.into_patch()?;

        if patch.is_empty() {
            return Ok(task);
        }

        // Gone between lookup and write
        let updated = self
            .store
            .update_task(task_id, auth.user_id, patch)
            .await?
            .ok_or(TaskError::NotFound)?;

        info!(
            user_id = %auth.user_id,
            task_id = %task_id,
            status = %updated.status,
            "Task updated"
        );

        Ok(updated)
    }

    /// Deletes one of the caller's tasks
    pub async fn delete(&self, auth: &AuthContext, task_id: Uuid) -> Result<(), TaskError> {
        self.owned_task(auth, task_id).await?;

        if !self.store.delete_task(task_id, auth.user_id).await? {
            return Err(TaskError::NotFound);
        }

        info!(user_id = %auth.user_id, task_id = %task_id, "Task deleted");

        Ok(())
    }

    async fn owned_task(&self, auth: &AuthContext, task_id: Uuid) -> Result<Task, TaskError> {
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(TaskError::NotFound)?;

        if let Err(e) = require_ownership(auth, task.user_id) {
            warn!(user_id = %auth.user_id, task_id = %task_id, "Rejected access to foreign task");
            return Err(e.into());
        }

        Ok(task)
    }
}
