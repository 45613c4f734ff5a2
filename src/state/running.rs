use super::{LevelState, StateError};
use crate::migration::migrate_running;
use crate::models::{Level, RunField, RunSession, Weekday, WorkoutStatus};
use crate::plan::default_running;
use crate::store::{Entity, Store};

pub struct RunningState {
  inner: LevelState<Vec<RunSession>>,
}

impl RunningState {
  pub async fn load(store: Store, level: Level) -> Self {
    let inner = LevelState::load(
      store,
      Entity::RunningData,
      level,
      || default_running(level),
      |runs| migrate_running(runs, level),
    )
    .await;
    Self { inner }
  }

  pub fn runs(&self) -> &[RunSession] {
    self.inner.get()
  }

  pub fn find(&self, week: u32, day: Weekday, run: u8) -> Option<&RunSession> {
    self.runs().iter().find(|r| r.matches(week, day, run))
  }

  pub async fn update(&mut self, week: u32, day: Weekday, run: u8, field: RunField) -> Result<(), StateError> {
    self
      .inner
      .try_mutate(|runs| {
        let session = runs
          .iter_mut()
          .find(|r| r.matches(week, day, run))
          .ok_or_else(|| StateError::not_found("run", format!("week {} {} run {}", week, day, run)))?;
        session.apply(field);
        Ok(())
      })
      .await
  }

  pub async fn set_status(&mut self, week: u32, day: Weekday, run: u8, status: WorkoutStatus) -> Result<(), StateError> {
    self
      .inner
      .try_mutate(|runs| {
        let session = runs
          .iter_mut()
          .find(|r| r.matches(week, day, run))
          .ok_or_else(|| StateError::not_found("run", format!("week {} {} run {}", week, day, run)))?;
        session.status = status;
        Ok(())
      })
      .await
  }
}
