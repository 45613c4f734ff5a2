use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub type DbPool = SqlitePool;

/// Open (creating if needed) the tracker database and run migrations
pub async fn initialize_db(db_path: &Path) -> Result<DbPool, Box<dyn std::error::Error>> {
  if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }
  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  debug!("Initializing database at: {}", db_path.display());

  // The CLI is a single task; one connection keeps writes strictly ordered
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database ready at {}", db_path.display());

  Ok(pool)
}
