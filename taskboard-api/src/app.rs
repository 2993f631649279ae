/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::store::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config)?;
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use taskboard_shared::{
    auth::{
        jwt::{TokenError, TokenService},
        middleware::bearer_auth,
    },
    services::{AccountService, TaskService},
    store::Datastore,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend
    pub store: Arc<dyn Datastore>,

    /// Token issuing and verification
    pub tokens: TokenService,

    /// Signup, login, profile
    pub accounts: AccountService,

    /// Task CRUD
    pub tasks: TaskService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    ///
    /// # Errors
    ///
    /// Returns `TokenError::MissingSecret` if the configured secret is empty
    pub fn new(store: Arc<dyn Datastore>, config: Config) -> Result<Self, TokenError> {
        let tokens = TokenService::new(&config.jwt.secret)?;
        let accounts = AccountService::new(store.clone(), tokens.clone(), config.hashing.into());
        let tasks = TaskService::new(store.clone());

        Ok(Self {
            store,
            tokens,
            accounts,
            tasks,
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// └── /api/
///     ├── /auth/                # Public
///     │   ├── POST /signup
///     │   └── POST /login
///     ├── /user/                # Bearer token
///     │   └── GET|PUT /profile
///     └── /tasks/               # Bearer token
///         ├── POST   /
///         ├── GET    /
///         ├── PUT    /:id
///         └── DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    // Import route handlers
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login));

    // Protected routes
    let user_routes = Router::new().route(
        "/profile",
        get(routes::user::profile).put(routes::user::profile),
    );

    let task_routes = Router::new()
        .route(
            "/",
            post(routes::tasks::create_task).get(routes::tasks::list_tasks),
        )
        .route(
            "/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        );

    let protected_routes = Router::new()
        .nest("/user", user_routes)
        .nest("/tasks", task_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.tokens.clone(),
            bearer_auth,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// CORS for the browser client
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive() {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
