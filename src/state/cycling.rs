use super::{LevelState, StateError};
use crate::migration::migrate_cycling;
use crate::models::{CycleField, CycleSegment, Level, Weekday, WorkoutStatus};
use crate::plan::default_cycling;
use crate::store::{Entity, Store};

pub struct CyclingState {
  inner: LevelState<Vec<CycleSegment>>,
}

impl CyclingState {
  pub async fn load(store: Store, level: Level) -> Self {
    let inner = LevelState::load(
      store,
      Entity::CyclingData,
      level,
      || default_cycling(level),
      migrate_cycling,
    )
    .await;
    Self { inner }
  }

  pub fn segments(&self) -> &[CycleSegment] {
    self.inner.get()
  }

  pub fn segments_for_week(&self, week: u32) -> impl Iterator<Item = &CycleSegment> {
    self.segments().iter().filter(move |s| s.week == week)
  }

  pub async fn update(&mut self, week: u32, segment: &str, field: CycleField) -> Result<(), StateError> {
    self
      .inner
      .try_mutate(|segments| {
        let entry = segments
          .iter_mut()
          .find(|s| s.week == week && s.segment == segment)
          .ok_or_else(|| StateError::not_found("cycling segment", format!("week {} {}", week, segment)))?;
        entry.apply(field);
        Ok(())
      })
      .await
  }

  /// Status belongs to the session, so every segment of the day changes
  pub async fn set_status(&mut self, week: u32, day: Weekday, status: WorkoutStatus) -> Result<(), StateError> {
    self
      .inner
      .try_mutate(|segments| {
        let mut found = false;
        for segment in segments.iter_mut().filter(|s| s.week == week && s.day == day) {
          segment.status = status;
          found = true;
        }
        if found {
          Ok(())
        } else {
          Err(StateError::not_found("cycling session", format!("week {} {}", week, day)))
        }
      })
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{setup_test_db, teardown_test_db};

  #[tokio::test]
  async fn test_status_applies_to_every_segment_of_the_day() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "t");

    let mut state = CyclingState::load(store, Level::One).await;
    state.set_status(2, Weekday::Friday, WorkoutStatus::Completed).await.unwrap();

    let week_two: Vec<_> = state.segments_for_week(2).collect();
    assert_eq!(week_two.len(), 10);
    assert!(week_two.iter().all(|s| s.status == WorkoutStatus::Completed));
    assert!(state.segments_for_week(1).all(|s| s.status == WorkoutStatus::NotDone));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_segment_update_and_pace_migration_on_load() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "t");
    store
      .set(
        "t_cyclingData_level1",
        r#"[{"week": 1, "day": "Friday", "segment": "Steady Cycle", "duration": 40, "distance": "16", "pace": "25", "rpe": "", "status": "not_done"}]"#,
      )
      .await
      .unwrap();

    let mut state = CyclingState::load(store, Level::One).await;
    let segment = &state.segments()[0];
    assert_eq!(segment.duration, "40:00");
    assert_eq!(segment.pace, "2:24");

    state.update(1, "Steady Cycle", CycleField::Distance(Some(20.0))).await.unwrap();
    assert_eq!(state.segments()[0].pace, "2:00");

    let missing = state.update(1, "Hard 1", CycleField::Rpe(Some(2))).await;
    assert!(missing.is_err());

    teardown_test_db(pool).await;
  }
}
