//! # Taskboard Shared Library
//!
//! Types and business logic shared by the Taskboard API server and client.
//!
//! ## Module Organization
//!
//! - `models`: Users, tasks and their public views
//! - `auth`: Password hashing, bearer tokens, auth middleware, ownership checks
//! - `store`: Persistence traits with PostgreSQL and in-memory backends
//! - `db`: Connection pool and embedded migrations
//! - `services`: Account and task flows

pub mod auth;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
