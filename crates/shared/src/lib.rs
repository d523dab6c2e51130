//! Shared infrastructure for the myFlix services
//!
//! Currently just database pool construction and the migration runner,
//! used by the API server binary and by external tooling.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create the connection pool used for regular request-path queries.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Create a pool for running migrations.
///
/// Single connection with a long acquire timeout; migrations must not
/// compete with request traffic and may hold locks for a while.
pub async fn create_migration_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(60))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Apply all pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
