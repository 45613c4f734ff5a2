use std::env;
use std::path::PathBuf;

use crate::store::DEFAULT_NAMESPACE;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const DB_PATH_VAR: &str = "FITNESS_TRACKER_DB_PATH";
pub const NAMESPACE_VAR: &str = "FITNESS_TRACKER_NAMESPACE";
pub const LOG_VAR: &str = "FITNESS_TRACKER_LOG";

const APP_DIR: &str = "fitness-tracker";
const DB_FILE: &str = "fitness-tracker.db";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("No data directory available; set FITNESS_TRACKER_DB_PATH")]
  NoDataDir,

  #[error("Invalid configuration: {0}")]
  Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
  pub db_path: PathBuf,
  pub namespace: String,
  pub log_filter: String,
}

fn non_empty_var(name: &str) -> Option<String> {
  env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl TrackerConfig {
  /// Read settings from the environment (after loading any `.env` file)
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();

    let db_path = match non_empty_var(DB_PATH_VAR) {
      Some(path) => PathBuf::from(path),
      None => dirs::data_dir()
        .ok_or(ConfigError::NoDataDir)?
        .join(APP_DIR)
        .join(DB_FILE),
    };

    let namespace = non_empty_var(NAMESPACE_VAR).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
    if namespace.contains(char::is_whitespace) {
      return Err(ConfigError::Invalid(format!("{} must not contain whitespace", NAMESPACE_VAR)));
    }

    Ok(Self {
      db_path,
      namespace,
      log_filter: non_empty_var(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
    })
  }
}
