//! Namespaced key-value access over the `kv_store` table
//!
//! Every entity is stored as one JSON document under a level-scoped key
//! (`<ns>_runningData_level1`); a couple of settings are global
//! (`<ns>_activeLevel`). Scalar settings are stored as plain text.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::Row;
use tracing::warn;

use crate::db::DbPool;
use crate::models::Level;

pub const DEFAULT_NAMESPACE: &str = "fitnessTracker";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Serialize for StoreError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// Per-level collections and values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
  RunningData,
  CyclingData,
  WeightData,
  WeightLogData,
  TargetWeight,
  ColdExposureData,
  YogaData,
  CollapsedWorkouts,
  ProgramStartDate,
}

impl Entity {
  pub fn as_str(self) -> &'static str {
    match self {
      Entity::RunningData => "runningData",
      Entity::CyclingData => "cyclingData",
      Entity::WeightData => "weightData",
      Entity::WeightLogData => "weightLogData",
      Entity::TargetWeight => "targetWeight",
      Entity::ColdExposureData => "coldExposureData",
      Entity::YogaData => "yogaData",
      Entity::CollapsedWorkouts => "collapsedWorkouts",
      Entity::ProgramStartDate => "programStartDate",
    }
  }
}

/// Settings shared by both levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKey {
  ActiveLevel,
  MaxHeartRate,
}

impl GlobalKey {
  pub fn as_str(self) -> &'static str {
    match self {
      GlobalKey::ActiveLevel => "activeLevel",
      GlobalKey::MaxHeartRate => "maxHeartRate",
    }
  }
}

#[derive(Debug, Clone)]
pub struct Store {
  pool: DbPool,
  namespace: String,
}

impl Store {
  pub fn new(pool: DbPool, namespace: impl Into<String>) -> Self {
    Self {
      pool,
      namespace: namespace.into(),
    }
  }

  pub fn pool(&self) -> &DbPool {
    &self.pool
  }

  pub fn namespace(&self) -> &str {
    &self.namespace
  }

  pub fn level_key(&self, entity: Entity, level: Level) -> String {
    format!("{}_{}_level{}", self.namespace, entity.as_str(), level.number())
  }

  pub fn global_key(&self, key: GlobalKey) -> String {
    format!("{}_{}", self.namespace, key.as_str())
  }

  /// Start date key from before dates were tracked per level
  pub fn legacy_start_date_key(&self) -> String {
    format!("{}_{}", self.namespace, Entity::ProgramStartDate.as_str())
  }

  /// ---------------------------------------------------------------------------
  /// Raw access
  /// ---------------------------------------------------------------------------

  pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
      .bind(key)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(|r| r.get::<String, _>("value")))
  }

  pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    sqlx::query(
      r#"
      INSERT INTO kv_store (key, value, updated_at)
      VALUES (?, ?, datetime('now'))
      ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
      "#,
    )
    .bind(key)
    .bind(value)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM kv_store WHERE key = ?")
      .bind(key)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  /// ---------------------------------------------------------------------------
  /// JSON documents
  /// ---------------------------------------------------------------------------

  pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
    match self.get(key).await? {
      Some(text) => Ok(Some(serde_json::from_str(&text)?)),
      None => Ok(None),
    }
  }

  pub async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
    let text = serde_json::to_string(value)?;
    self.set(key, &text).await
  }

  /// Best-effort read: failures are logged and reported as absent
  pub async fn read_json_or_log<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    match self.load_json(key).await {
      Ok(value) => value,
      Err(e) => {
        warn!("Failed to load {}: {}", key, e);
        None
      }
    }
  }

  /// Best-effort write: failures are logged and swallowed
  pub async fn write_json_or_log<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
    match self.save_json(key, value).await {
      Ok(()) => true,
      Err(e) => {
        warn!("Failed to save {}: {}", key, e);
        false
      }
    }
  }

  pub async fn read_or_log(&self, key: &str) -> Option<String> {
    match self.get(key).await {
      Ok(value) => value,
      Err(e) => {
        warn!("Failed to load {}: {}", key, e);
        None
      }
    }
  }

  pub async fn write_or_log(&self, key: &str, value: &str) -> bool {
    match self.set(key, value).await {
      Ok(()) => true,
      Err(e) => {
        warn!("Failed to save {}: {}", key, e);
        false
      }
    }
  }

  pub async fn remove_or_log(&self, key: &str) -> bool {
    match self.remove(key).await {
      Ok(()) => true,
      Err(e) => {
        warn!("Failed to remove {}: {}", key, e);
        false
      }
    }
  }
}
