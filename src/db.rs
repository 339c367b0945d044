use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;

pub type DbPool = SqlitePool;

/// Initialize the database connection pool and run migrations
///
/// File databases need `?mode=rwc` in the URL to be created on first use
/// (the default URL carries it).
pub async fn initialize_db(config: &SchedulerConfig) -> Result<DbPool, ScheduleError> {
  info!(url = %config.database_url, "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .connect(&config.database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}
