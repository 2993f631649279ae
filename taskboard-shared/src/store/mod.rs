/// Persistence for users and tasks
///
/// The flows in [`crate::services`] talk to storage only through the traits
/// defined here, so the same code runs against PostgreSQL in production and
/// against an in-process map in tests and local development.
///
/// # Implementations
///
/// - [`postgres::PgStore`]: sqlx/PostgreSQL
/// - [`memory::MemoryStore`]: tokio `RwLock` over hash maps
///
/// # Atomicity
///
/// Every write touches exactly one record, and each backend makes single
/// record writes atomic. Concurrent updates of the same task are
/// last-write-wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::task::{NewTask, Task, TaskPatch};
use crate::models::user::{NewUser, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (duplicate email)
    #[error("Duplicate value for {0}")]
    Duplicate(String),

    /// Backend failure (connection lost, query failed, ...)
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let field = db_err
                    .constraint()
                    .map(|c| if c.contains("email") { "email" } else { c })
                    .unwrap_or("unknown")
                    .to_string();
                return StoreError::Duplicate(field);
            }
        }

        StoreError::Backend(err.to_string())
    }
}

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user
    ///
    /// Returns `StoreError::Duplicate("email")` if the email is taken.
    async fn create_user(&self, data: NewUser) -> Result<User, StoreError>;

    /// Finds a user by exact email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Finds a user by ID
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Changes a user's display name (the only mutable user field)
    async fn update_user_name(&self, id: Uuid, name: &str) -> Result<Option<User>, StoreError>;
}

/// Task store
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a pending task stamped with the current time
    async fn create_task(&self, data: NewTask) -> Result<Task, StoreError>;

    /// Finds a task by ID regardless of owner
    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Lists all tasks of one owner, newest first
    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Applies a patch to a task owned by `user_id`
    ///
    /// Returns `None` if no task with that ID belongs to that owner.
    async fn update_task(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: TaskPatch,
    ) -> Result<Option<Task>, StoreError>;

    /// Deletes a task owned by `user_id`
    ///
    /// Returns `false` if no task with that ID belongs to that owner.
    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> Result<bool, StoreError>;
}

/// A complete backing store
#[async_trait]
pub trait Datastore: UserStore + TaskStore {
    /// Checks that the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}
