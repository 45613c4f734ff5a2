pub mod charts;
pub mod commands;
pub mod config;
pub mod db;
pub mod export;
pub mod heart_rate;
pub mod logging;
pub mod migration;
pub mod models;
pub mod plan;
pub mod program;
pub mod progress;
pub mod schedule;
pub mod state;
pub mod store;
pub mod time_format;
pub mod tracker;

#[cfg(test)]
pub mod test_utils;

use commands::Cli;
use config::TrackerConfig;
use store::Store;
use tracker::Tracker;
use tracing::debug;

/// Resolve configuration, open the database and run one command
pub async fn run(cli: Cli) -> Result<String, String> {
  let mut config = TrackerConfig::from_env().map_err(|e| e.to_string())?;
  logging::init(&config.log_filter, cli.verbose);

  if let Some(path) = cli.db {
    config.db_path = path;
  }
  if let Some(namespace) = cli.namespace {
    config.namespace = namespace;
  }
  debug!("Using {} with namespace {}", config.db_path.display(), config.namespace);

  let pool = db::initialize_db(&config.db_path)
    .await
    .map_err(|e| format!("Failed to initialize database: {}", e))?;

  let mut tracker = Tracker::load(Store::new(pool.clone(), config.namespace)).await;
  let result = commands::execute(&mut tracker, cli.command).await;
  pool.close().await;
  result
}
