/// In-process store
///
/// Used when no `DATABASE_URL` is configured and throughout the test suites.
/// Data lives for the lifetime of the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Datastore, StoreError, TaskStore, UserStore};
use crate::models::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::models::user::{NewUser, User};

#[derive(Debug, Clone)]
struct StoredTask {
    // Insertion order, breaks ties between equal timestamps
    seq: u64,
    task: Task,
}

/// Hash-map backed [`Datastore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    tasks: RwLock<HashMap<Uuid, StoredTask>>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Number of stored tasks across all owners
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, data: NewUser) -> Result<User, StoreError> {
        // Check and insert under one write lock
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == data.email) {
            return Err(StoreError::Duplicate("email".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update_user_name(&self, id: Uuid, name: &str) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(&id).map(|user| {
            user.name = name.to_string();
            user.clone()
        }))
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, data: NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
        };

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.tasks.write().await.insert(
            task.id,
            StoredTask {
                seq,
                task: task.clone(),
            },
        );

        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(&id).map(|s| s.task.clone()))
    }

    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;

        let mut owned: Vec<&StoredTask> = tasks
            .values()
            .filter(|s| s.task.user_id == user_id)
            .collect();
        owned.sort_by(|a, b| {
            b.task
                .created_at
                .cmp(&a.task.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        Ok(owned.into_iter().map(|s| s.task.clone()).collect())
    }

    async fn update_task(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: TaskPatch,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;

        Ok(tasks
            .get_mut(&id)
            .filter(|s| s.task.user_id == user_id)
            .map(|s| {
                patch.apply_to(&mut s.task);
                s.task.clone()
            }))
    }

    async fn delete_task(&self, id: Uuid, user_id: Uuid) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;

        match tasks.get(&id) {
            Some(s) if s.task.user_id == user_id => {
                tasks.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
