//! Common utilities for client end-to-end tests
//!
//! Each test gets its own API server on an ephemeral port, backed by a fresh
//! in-memory store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_client::ApiClient;
use taskboard_shared::store::MemoryStore;
use tokio::net::TcpListener;

/// Server configuration with cheap password hashing
pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("JWT_SECRET", "client-test-secret-at-least-32-bytes"),
        ("ARGON2_MEMORY_KIB", "1024"),
        ("ARGON2_ITERATIONS", "1"),
        ("ARGON2_PARALLELISM", "1"),
    ]);

    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("test config is valid")
}

/// Starts a server in the background and returns its base URL
pub async fn spawn_server() -> String {
    let state = AppState::new(Arc::new(MemoryStore::new()), test_config()).expect("valid state");
    let app = build_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    format!("http://{}", addr)
}

/// Client pointed at a fresh server
pub async fn client() -> ApiClient {
    ApiClient::new(spawn_server().await).expect("client builds")
}
