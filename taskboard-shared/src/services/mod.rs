/// Application flows
///
/// HTTP-agnostic business logic used by the API handlers. Each flow owns its
/// error type; the API crate maps those to status codes.
///
/// - [`accounts`]: signup, login, profile
/// - [`tasks`]: per-owner task CRUD

pub mod accounts;
pub mod tasks;

pub use accounts::{AccountError, AccountService, AuthResponse, Login, Signup};
pub use tasks::{TaskChanges, TaskError, TaskService};
