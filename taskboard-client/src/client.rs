/// HTTP client for the Taskboard API
///
/// Thin `reqwest` wrapper: one method per endpoint, bearer token passed in
/// explicitly. Non-2xx responses become [`ClientError::Api`] carrying the
/// server's `error` code and `message`.
///
/// Most callers go through [`crate::Session`] and [`crate::TaskBoard`],
/// which supply the token.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use taskboard_shared::{
    models::{
        task::{Task, TaskStatus},
        user::PublicUser,
    },
    services::AuthResponse,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};

/// Partial task update; `None` fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    /// Update that only sets the status
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    #[allow(dead_code)]
    msg: String,
}

/// Taskboard API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = json!({ "name": name, "email": email, "password": password });
        self.send(self.request(Method::POST, "/api/auth/signup", None).json(&body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = json!({ "email": email, "password": password });
        self.send(self.request(Method::POST, "/api/auth/login", None).json(&body))
            .await
    }

    /// Fetches the token owner's public profile
    pub async fn profile(&self, token: &str) -> ClientResult<PublicUser> {
        self.send(self.request(Method::GET, "/api/user/profile", Some(token)))
            .await
    }

    /// Renames the token owner
    pub async fn update_profile(&self, token: &str, name: &str) -> ClientResult<PublicUser> {
        let body = json!({ "name": name });
        self.send(
            self.request(Method::PUT, "/api/user/profile", Some(token))
                .json(&body),
        )
        .await
    }

    /// Lists the token owner's tasks, newest first
    pub async fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
        self.send(self.request(Method::GET, "/api/tasks", Some(token)))
            .await
    }

    pub async fn create_task(
        &self,
        token: &str,
        title: &str,
        description: Option<&str>,
    ) -> ClientResult<Task> {
        let body = json!({ "title": title, "description": description });
        self.send(self.request(Method::POST, "/api/tasks", Some(token)).json(&body))
            .await
    }

    pub async fn update_task(&self, token: &str, id: Uuid, update: &TaskUpdate) -> ClientResult<Task> {
        let path = format!("/api/tasks/{}", id);
        self.send(self.request(Method::PUT, &path, Some(token)).json(update))
            .await
    }

    pub async fn delete_task(&self, token: &str, id: Uuid) -> ClientResult<()> {
        let path = format!("/api/tasks/{}", id);
        let _: DeleteBody = self
            .send(self.request(Method::DELETE, &path, Some(token)))
            .await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.error, body.message),
        Err(_) => (String::new(), text),
    };

    debug!(status = status.as_u16(), code = %code, "API request failed");

    ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    }
}
