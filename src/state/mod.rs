//! Per-level domain state
//!
//! Each state object owns one collection for the active level. It loads the
//! stored copy (or the level's defaults), runs its migration pipeline, and
//! writes the whole collection back after every mutation. Store failures are
//! logged and never surface to callers: the in-memory copy is authoritative.

pub mod cold_exposure;
pub mod collapsed;
pub mod cycling;
pub mod program_start;
pub mod running;
pub mod settings;
pub mod weight_log;
pub mod weights;
pub mod yoga;

pub use cold_exposure::ColdExposureState;
pub use collapsed::CollapsedState;
pub use cycling::CyclingState;
pub use program_start::ProgramStartState;
pub use running::RunningState;
pub use settings::Settings;
pub use weight_log::WeightLogState;
pub use weights::WeightsState;
pub use yoga::YogaState;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::migration::Migrated;
use crate::models::Level;
use crate::store::{Entity, Store};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
  #[error("No {kind} matches {key}")]
  NotFound { kind: &'static str, key: String },

  #[error("Invalid value: {0}")]
  Invalid(String),
}

impl StateError {
  pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
    StateError::NotFound {
      kind,
      key: key.into(),
    }
  }
}

impl Serialize for StateError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// One persisted JSON document for one level
#[derive(Debug, Clone)]
pub struct LevelState<T> {
  store: Store,
  entity: Entity,
  level: Level,
  data: T,
}

impl<T> LevelState<T>
where
  T: Serialize + DeserializeOwned,
{
  /// Load the stored document, falling back to `default` when it is absent or
  /// unreadable. A migration that changed something is written back at once.
  pub async fn load<D, M>(store: Store, entity: Entity, level: Level, default: D, migrate: M) -> Self
  where
    D: FnOnce() -> T,
    M: FnOnce(T) -> Migrated<T>,
  {
    let key = store.level_key(entity, level);
    match store.read_json_or_log::<T>(&key).await {
      Some(stored) => {
        let migrated = migrate(stored);
        let state = Self {
          store,
          entity,
          level,
          data: migrated.data,
        };
        if migrated.changed {
          info!("Migrated stored {}", key);
          state.persist().await;
        }
        state
      }
      None => {
        debug!("No stored {}, using defaults", key);
        Self {
          store,
          entity,
          level,
          data: default(),
        }
      }
    }
  }

  pub fn get(&self) -> &T {
    &self.data
  }

  pub fn level(&self) -> Level {
    self.level
  }

  pub fn key(&self) -> String {
    self.store.level_key(self.entity, self.level)
  }

  /// Apply `f` to the collection, then write it back
  pub async fn mutate<R, F>(&mut self, f: F) -> R
  where
    F: FnOnce(&mut T) -> R,
  {
    let result = f(&mut self.data);
    self.persist().await;
    result
  }

  /// Mutation that may be rejected; nothing is written on error
  pub async fn try_mutate<R, F>(&mut self, f: F) -> Result<R, StateError>
  where
    F: FnOnce(&mut T) -> Result<R, StateError>,
  {
    let result = f(&mut self.data)?;
    self.persist().await;
    Ok(result)
  }

  /// Change in memory only; the caller is responsible for a later `persist`
  pub fn mutate_deferred<R, F>(&mut self, f: F) -> R
  where
    F: FnOnce(&mut T) -> R,
  {
    f(&mut self.data)
  }

  pub async fn persist(&self) -> bool {
    self.store.write_json_or_log(&self.key(), &self.data).await
  }
}
