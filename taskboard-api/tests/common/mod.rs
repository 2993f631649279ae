//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - Router over a fresh in-memory store with cheap password hashing
//! - Request helpers that drive the router with `tower::ServiceExt::oneshot`
//! - User signup shortcuts

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::store::MemoryStore;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test configuration without touching the process environment
pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("JWT_SECRET", TEST_SECRET),
        ("ARGON2_MEMORY_KIB", "1024"),
        ("ARGON2_ITERATIONS", "1"),
        ("ARGON2_PARALLELISM", "1"),
    ]);

    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("test config is valid")
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: axum::Router,
    pub config: Config,
}

/// Response status plus parsed JSON body (`Value::Null` when empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// A signed-up user
pub struct TestUser {
    pub id: String,
    pub token: String,
}

impl TestUser {
    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl TestContext {
    /// Creates a new test context over a fresh in-memory store
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = test_config();
        let state = AppState::new(store.clone(), config.clone()).expect("valid state");
        let app = build_router(state);

        Self { store, app, config }
    }

    /// Sends a request and parses the JSON response
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    /// Signs a user up and returns its ID and token
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> TestUser {
        let response = self
            .request(
                "POST",
                "/api/auth/signup",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        TestUser {
            id: response.body["user"]["id"].as_str().unwrap().to_string(),
            token: response.body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Creates a task and returns its JSON
    pub async fn create_task(&self, user: &TestUser, title: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/tasks",
                Some(&user.token),
                Some(serde_json::json!({ "title": title })),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body
    }
}
