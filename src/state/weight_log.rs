use chrono::{Local, NaiveDate};
use tracing::warn;

use super::cold_exposure::next_id;
use super::{LevelState, StateError};
use crate::migration::Migrated;
use crate::models::journal::sort_weight_log;
use crate::models::{Level, WeightLogEntry, WeightLogField};
use crate::store::{Entity, Store};

/// Body-weight entries plus the level's target weight
pub struct WeightLogState {
  inner: LevelState<Vec<WeightLogEntry>>,
  store: Store,
  level: Level,
  target_weight: Option<f64>,
}

fn valid_weight(weight: f64) -> Result<f64, StateError> {
  if weight.is_finite() && weight > 0.0 {
    Ok(weight)
  } else {
    Err(StateError::Invalid(format!("weight {} must be a positive number", weight)))
  }
}

impl WeightLogState {
  pub async fn load(store: Store, level: Level) -> Self {
    let inner = LevelState::load(
      store.clone(),
      Entity::WeightLogData,
      level,
      Vec::new,
      |mut entries: Vec<WeightLogEntry>| {
        sort_weight_log(&mut entries);
        Migrated::unchanged(entries)
      },
    )
    .await;

    let target_key = store.level_key(Entity::TargetWeight, level);
    let target_weight = store.read_or_log(&target_key).await.and_then(|text| {
      let parsed = text.trim().parse::<f64>().ok().filter(|w| w.is_finite() && *w > 0.0);
      if parsed.is_none() {
        warn!("Ignoring unreadable target weight {:?}", text);
      }
      parsed
    });

    Self {
      inner,
      store,
      level,
      target_weight,
    }
  }

  /// Sorted by week, then date
  pub fn entries(&self) -> &[WeightLogEntry] {
    self.inner.get()
  }

  pub fn target_weight(&self) -> Option<f64> {
    self.target_weight
  }

  pub async fn set_target_weight(&mut self, target: Option<f64>) -> Result<(), StateError> {
    let key = self.store.level_key(Entity::TargetWeight, self.level);
    match target {
      Some(weight) => {
        let weight = valid_weight(weight)?;
        self.target_weight = Some(weight);
        self.store.write_or_log(&key, &weight.to_string()).await;
      }
      None => {
        self.target_weight = None;
        self.store.remove_or_log(&key).await;
      }
    }
    Ok(())
  }

  pub async fn add(&mut self, week: u32, weight: f64, date: Option<NaiveDate>) -> Result<i64, StateError> {
    let weight = valid_weight(weight)?;
    let entry = WeightLogEntry {
      id: next_id(self.entries().iter().map(|e| e.id)),
      week,
      weight: Some(weight),
      date: date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let id = entry.id;
    self
      .inner
      .mutate(|entries| {
        entries.push(entry);
        sort_weight_log(entries);
      })
      .await;
    Ok(id)
  }

  pub async fn update(&mut self, id: i64, field: WeightLogField) -> Result<(), StateError> {
    if let WeightLogField::Weight(Some(weight)) = &field {
      valid_weight(*weight)?;
    }
    self
      .inner
      .try_mutate(|entries| {
        let entry = entries
          .iter_mut()
          .find(|e| e.id == id)
          .ok_or_else(|| StateError::not_found("weight entry", id.to_string()))?;
        match field {
          WeightLogField::Week(week) => entry.week = week,
          WeightLogField::Weight(weight) => entry.weight = weight,
          WeightLogField::Date(date) => entry.date = date,
        }
        sort_weight_log(entries);
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
          Err(StateError::not_found("weight entry", id.to_string()))
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

  #[tokio::test]
  async fn test_entries_sorted_by_week_then_date() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "t");
    let mut state = WeightLogState::load(store, Level::One).await;

    let late = state.add(2, 81.0, Some(date("2025-01-10"))).await.unwrap();
    let early = state.add(1, 82.0, Some(date("2025-01-03"))).await.unwrap();
    assert_eq!(state.entries()[0].id, early);

    state.update(early, WeightLogField::Week(3)).await.unwrap();
    assert_eq!(state.entries()[0].id, late);

    assert!(state.add(1, -5.0, None).await.is_err());
    state.delete(late).await.unwrap();
    assert_eq!(state.entries().len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_target_weight_is_per_level() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "t");

    let mut level_one = WeightLogState::load(store.clone(), Level::One).await;
    level_one.set_target_weight(Some(75.5)).await.unwrap();
    assert_eq!(store.get("t_targetWeight_level1").await.unwrap().as_deref(), Some("75.5"));

    let level_two = WeightLogState::load(store.clone(), Level::Two).await;
    assert_eq!(level_two.target_weight(), None);

    let mut reloaded = WeightLogState::load(store.clone(), Level::One).await;
    assert_eq!(reloaded.target_weight(), Some(75.5));
    reloaded.set_target_weight(None).await.unwrap();
    assert_eq!(store.get("t_targetWeight_level1").await.unwrap(), None);

    teardown_test_db(pool).await;
  }
}
