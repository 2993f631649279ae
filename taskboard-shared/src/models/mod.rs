/// Data models for Taskboard
///
/// # Models
///
/// - `user`: User accounts and the public user view
/// - `task`: Tasks, their status and partial updates
///
/// Persistence lives in [`crate::store`]; these types are plain data.

pub mod task;
pub mod user;
