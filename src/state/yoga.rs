use super::LevelState;
use crate::migration::migrate_yoga;
use crate::models::{Level, Weekday, WorkoutStatus, YogaEntry};
use crate::store::{Entity, Store};
use crate::time_format::normalize_duration_input;

/// Yoga entries appear lazily: the schedule creates one the first time it
/// places yoga on a rest day.
pub struct YogaState {
  inner: LevelState<Vec<YogaEntry>>,
  dirty: bool,
}

impl YogaState {
  pub async fn load(store: Store, level: Level) -> Self {
    let inner = LevelState::load(store, Entity::YogaData, level, Vec::new, migrate_yoga).await;
    Self { inner, dirty: false }
  }

  pub fn entries(&self) -> &[YogaEntry] {
    self.inner.get()
  }

  pub fn find(&self, week: u32, day: Weekday) -> Option<&YogaEntry> {
    self.entries().iter().find(|y| y.week == week && y.day == day)
  }

  /// Fetch the entry for `(week, day)`, creating it in memory if needed.
  /// Created entries are written by the next `flush` or mutation.
  pub fn get_or_create(&mut self, week: u32, day: Weekday) -> YogaEntry {
    if let Some(existing) = self.find(week, day) {
      return existing.clone();
    }
    let entry = YogaEntry::new(week, day);
    self.inner.mutate_deferred(|entries| entries.push(entry.clone()));
    self.dirty = true;
    entry
  }

  /// Write entries created by `get_or_create`
  pub async fn flush(&mut self) {
    if self.dirty {
      self.inner.persist().await;
      self.dirty = false;
    }
  }

  pub async fn set_duration(&mut self, week: u32, day: Weekday, text: &str) {
    let duration = normalize_duration_input(text);
    self.update(week, day, |entry| entry.duration = duration).await;
  }

  pub async fn set_status(&mut self, week: u32, day: Weekday, status: WorkoutStatus) {
    self.update(week, day, |entry| entry.status = status).await;
  }

  async fn update<F>(&mut self, week: u32, day: Weekday, f: F)
  where
    F: FnOnce(&mut YogaEntry),
  {
    self
      .inner
      .mutate(|entries| {
        let index = match entries.iter().position(|y| y.week == week && y.day == day) {
          Some(index) => index,
          None => {
            entries.push(YogaEntry::new(week, day));
            entries.len() - 1
          }
        };
        f(&mut entries[index]);
      })
      .await;
    self.dirty = false;
  }
}
