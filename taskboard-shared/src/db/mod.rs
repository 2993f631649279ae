/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Embedded schema migrations
///
/// Queries live in [`crate::store::postgres`].

pub mod migrations;
pub mod pool;
