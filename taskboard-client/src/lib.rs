//! # Taskboard Client
//!
//! Client-side session handling for the Taskboard API.
//!
//! ## Modules
//!
//! - `client`: HTTP client, one method per endpoint
//! - `session`: Anonymous/authenticated session tied to token storage
//! - `board`: Local task list kept in sync with the server
//! - `storage`: Token persistence
//! - `error`: Client error type

pub mod board;
pub mod client;
pub mod error;
pub mod session;
pub mod storage;

pub use board::TaskBoard;
pub use client::{ApiClient, TaskUpdate};
pub use error::{ClientError, ClientResult};
pub use session::Session;
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage, TOKEN_KEY};
