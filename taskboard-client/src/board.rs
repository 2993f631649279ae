/// Task board
///
/// Local copy of the signed-in user's task list. It is fetched once by
/// [`TaskBoard::load`] and afterwards kept in sync from the server's
/// responses to each mutation, never by re-fetching.

use taskboard_shared::models::task::Task;
use tracing::debug;
use uuid::Uuid;

use crate::client::{ApiClient, TaskUpdate};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// The user's tasks, newest first
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Fetches the task list for the session's user
    ///
    /// # Errors
    ///
    /// `ClientError::NotAuthenticated` for an anonymous session, otherwise
    /// whatever the request returns.
    pub async fn load(client: &ApiClient, session: &Session) -> ClientResult<Self> {
        let tasks = client.list_tasks(session.token()?).await?;
        debug!(count = tasks.len(), "Loaded task board");

        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks whose title contains `query`, ignoring case
    ///
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Task> {
        let needle = query.to_lowercase();

        self.tasks
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Creates a task and puts it at the top of the board
    pub async fn create(
        &mut self,
        client: &ApiClient,
        session: &Session,
        title: &str,
        description: Option<&str>,
    ) -> ClientResult<&Task> {
        let task = client
            .create_task(session.token()?, title, description)
            .await?;

        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    /// Flips a task between pending and completed
    pub async fn toggle(&mut self, client: &ApiClient, session: &Session, id: Uuid) -> ClientResult<&Task> {
        let next = self
            .get(id)
            .ok_or(ClientError::UnknownTask(id))?
            .status
            .toggled();

        self.update(client, session, id, TaskUpdate::status(next)).await
    }

    /// Sends a partial update and replaces the local copy with the result
    pub async fn update(
        &mut self,
        client: &ApiClient,
        session: &Session,
        id: Uuid,
        update: TaskUpdate,
    ) -> ClientResult<&Task> {
        let index = self.position(id)?;
        let task = client.update_task(session.token()?, id, &update).await?;

        self.tasks[index] = task;
        Ok(&self.tasks[index])
    }

    /// Deletes a task and drops it from the board
    pub async fn delete(&mut self, client: &ApiClient, session: &Session, id: Uuid) -> ClientResult<()> {
        let index = self.position(id)?;
        client.delete_task(session.token()?, id).await?;

        self.tasks.remove(index);
        Ok(())
    }

    fn position(&self, id: Uuid) -> ClientResult<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(ClientError::UnknownTask(id))
    }
}

impl From<Vec<Task>> for TaskBoard {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
