use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::repository::RepositoryError;

pub type DbPool = SqlitePool;

/// Open the connection pool for `database_url` and run migrations
pub async fn initialize_db(database_url: &str) -> Result<DbPool, RepositoryError> {
  tracing::info!(database_url, "initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("database initialized");

  Ok(pool)
}
