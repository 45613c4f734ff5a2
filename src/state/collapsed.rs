use std::collections::BTreeMap;

use super::LevelState;
use crate::migration::Migrated;
use crate::models::{ActivityRef, Level};
use crate::store::{Entity, Store};

/// Which workout cards are folded away, keyed by `ActivityRef::collapse_key`
pub struct CollapsedState {
  inner: LevelState<BTreeMap<String, bool>>,
}

impl CollapsedState {
  pub async fn load(store: Store, level: Level) -> Self {
    let inner = LevelState::load(
      store,
      Entity::CollapsedWorkouts,
      level,
      BTreeMap::new,
      Migrated::unchanged,
    )
    .await;
    Self { inner }
  }

  pub fn is_collapsed(&self, activity: &ActivityRef) -> bool {
    self.inner.get().get(&activity.collapse_key()).copied().unwrap_or(false)
  }

  /// Flip and return the new value
  pub async fn toggle(&mut self, activity: &ActivityRef) -> bool {
    let key = activity.collapse_key();
    self
      .inner
      .mutate(|map| {
        let value = !map.get(&key).copied().unwrap_or(false);
        map.insert(key, value);
        value
      })
      .await
  }

  pub async fn set(&mut self, activity: &ActivityRef, collapsed: bool) {
    let key = activity.collapse_key();
    self.inner.mutate(|map| map.insert(key, collapsed)).await;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Weekday;
  use crate::test_utils::{setup_test_db, teardown_test_db};

  #[tokio::test]
  async fn test_toggle_and_set_persist() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "t");
    let run = ActivityRef::Running {
      week: 1,
      day: Weekday::Monday,
      run: 1,
    };

    let mut state = CollapsedState::load(store.clone(), Level::One).await;
    assert!(!state.is_collapsed(&run));
    assert!(state.toggle(&run).await);
    assert!(!state.toggle(&run).await);
    state.set(&run, true).await;

    let stored = store.get("t_collapsedWorkouts_level1").await.unwrap().unwrap();
    assert_eq!(stored, r#"{"running-1-Monday-1":true}"#);

    let reloaded = CollapsedState::load(store, Level::One).await;
    assert!(reloaded.is_collapsed(&run));

    teardown_test_db(pool).await;
  }
}
