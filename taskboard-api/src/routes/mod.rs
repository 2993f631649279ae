/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Signup and login
/// - `user`: Profile
/// - `tasks`: Task CRUD

pub mod auth;
pub mod health;
pub mod tasks;
pub mod user;
