/// Database migration runner
///
/// Migrations live in `taskboard-shared/migrations/` and are embedded into the
/// binary at compile time, so a deployed server needs no files on disk.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

use sqlx::{
    migrate::{MigrateDatabase, MigrateError, Migrator},
    postgres::PgPool,
    Postgres,
};
use tracing::{debug, info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply or if an already applied
/// migration was modified after the fact
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    info!(
        embedded_migrations = MIGRATOR.iter().count(),
        "Starting database migrations"
    );

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Creates the database if it doesn't exist
///
/// Convenient for local development; production databases are provisioned
/// ahead of time.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
    } else {
        debug!("Database already exists");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_embedded_in_order() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();

        assert_eq!(versions.len(), 2);
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tasks_migration_defines_status_enum() {
        let tasks = MIGRATOR
            .iter()
            .find(|m| m.description.contains("tasks"))
            .expect("tasks migration present");

        assert!(tasks.sql.contains("'pending', 'in-progress', 'completed'"));
    }

    #[test]
    fn test_text_columns_are_unbounded() {
        // Any length the in-memory store accepts must fit in PostgreSQL too
        for migration in MIGRATOR.iter() {
            assert!(
                !migration.sql.to_uppercase().contains("VARCHAR"),
                "{} declares a bounded text column",
                migration.description
            );
        }
    }
}
