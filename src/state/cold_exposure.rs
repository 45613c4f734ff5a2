use chrono::{Local, NaiveDate, Utc};

use super::{LevelState, StateError};
use crate::migration::Migrated;
use crate::models::journal::sort_cold_exposure;
use crate::models::{ColdExposureEntry, ColdField, ColdMethod, Level};
use crate::store::{Entity, Store};
use crate::time_format::{normalize_duration_input, validate_mmss};

/// Millisecond timestamp id, bumped past any id already in use
pub(crate) fn next_id<I: IntoIterator<Item = i64>>(existing: I) -> i64 {
  let now = Utc::now().timestamp_millis();
  let max_existing = existing.into_iter().max().unwrap_or(i64::MIN);
  if now > max_existing {
    now
  } else {
    max_existing + 1
  }
}

pub struct ColdExposureState {
  inner: LevelState<Vec<ColdExposureEntry>>,
}

impl ColdExposureState {
  pub async fn load(store: Store, level: Level) -> Self {
    let inner = LevelState::load(
      store,
      Entity::ColdExposureData,
      level,
      Vec::new,
      |mut entries: Vec<ColdExposureEntry>| {
        sort_cold_exposure(&mut entries);
        Migrated::unchanged(entries)
      },
    )
    .await;
    Self { inner }
  }

  /// Newest first
  pub fn entries(&self) -> &[ColdExposureEntry] {
    self.inner.get()
  }

  /// Log a session; the date defaults to today
  pub async fn add(
    &mut self,
    date: Option<NaiveDate>,
    duration: &str,
    method: ColdMethod,
    temperature: Option<f64>,
  ) -> Result<i64, StateError> {
    if !validate_mmss(duration) {
      return Err(StateError::Invalid(format!("duration {:?} is not MM:SS", duration)));
    }
    let entry = ColdExposureEntry {
      id: next_id(self.entries().iter().map(|e| e.id)),
      date: date.unwrap_or_else(|| Local::now().date_naive()),
      duration: normalize_duration_input(duration),
      method,
      temperature: temperature.filter(|t| t.is_finite()),
    };
    let id = entry.id;
    self
      .inner
      .mutate(|entries| {
        entries.push(entry);
        sort_cold_exposure(entries);
      })
      .await;
    Ok(id)
  }

  pub async fn update(&mut self, id: i64, field: ColdField) -> Result<(), StateError> {
    if let ColdField::Duration(text) = &field {
      if !validate_mmss(text) {
        return Err(StateError::Invalid(format!("duration {:?} is not MM:SS", text)));
      }
    }
    self
      .inner
      .try_mutate(|entries| {
        let entry = entries
          .iter_mut()
          .find(|e| e.id == id)
          .ok_or_else(|| StateError::not_found("cold exposure entry", id.to_string()))?;
        match field {
          ColdField::Date(date) => entry.date = date,
          ColdField::Duration(text) => entry.duration = normalize_duration_input(&text),
          ColdField::Method(method) => entry.method = method,
          ColdField::Temperature(t) => entry.temperature = t.filter(|t| t.is_finite()),
        }
        sort_cold_exposure(entries);
        Ok(())
      })
      .await
  }

  pub async fn delete(&mut self, id: i64) -> Result<(), StateError> {
    self
      .inner
      .try_mutate(|entries| {
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
          Err(StateError::not_found("cold exposure entry", id.to_string()))
        } else {
          Ok(())
        }
      })
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{setup_test_db, teardown_test_db};

  fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
  }

  #[test]
  fn test_next_id_never_collides() {
    let far_future = Utc::now().timestamp_millis() + 1_000_000;
    assert_eq!(next_id(vec![far_future]), far_future + 1);
    assert!(next_id(Vec::new()) > 0);
  }

  #[tokio::test]
  async fn test_entries_kept_newest_first() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "t");
    let mut state = ColdExposureState::load(store.clone(), Level::One).await;

    let older = state
      .add(Some(date("2025-01-02")), "2:00", ColdMethod::Shower, None)
      .await
      .unwrap();
    let newer = state
      .add(Some(date("2025-01-09")), "3:30", ColdMethod::IceBath, Some(6.0))
      .await
      .unwrap();
    assert_ne!(older, newer);
    assert_eq!(state.entries()[0].id, newer);

    state.update(older, ColdField::Date(date("2025-02-01"))).await.unwrap();
    assert_eq!(state.entries()[0].id, older);

    let reloaded = ColdExposureState::load(store, Level::One).await;
    assert_eq!(reloaded.entries().len(), 2);
    assert_eq!(reloaded.entries()[0].id, older);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_invalid_duration_and_delete() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "t");
    let mut state = ColdExposureState::load(store, Level::One).await;

    assert!(state.add(None, "3:75", ColdMethod::Shower, None).await.is_err());

    let id = state.add(None, "", ColdMethod::SeaRiverSwim, None).await.unwrap();
    assert_eq!(state.entries()[0].date, Local::now().date_naive());
    state.delete(id).await.unwrap();
    assert!(state.entries().is_empty());
    assert!(state.delete(id).await.is_err());

    teardown_test_db(pool).await;
  }
}
