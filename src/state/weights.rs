use super::{LevelState, StateError};
use crate::migration::migrate_weights;
use crate::models::{Level, SetField, Weekday, WeightExercise, WeightRecommendation, WorkoutStatus};
use crate::plan::default_weights;
use crate::store::{Entity, Store};

/// Upper bound on sets per exercise accepted from input
pub const MAX_SETS: u32 = 10;

pub struct WeightsState {
  inner: LevelState<Vec<WeightExercise>>,
}

fn exercise_mut<'a>(
  exercises: &'a mut [WeightExercise],
  week: u32,
  day: Weekday,
  exercise: &str,
) -> Result<&'a mut WeightExercise, StateError> {
  exercises
    .iter_mut()
    .find(|e| e.matches(week, day, exercise))
    .ok_or_else(|| StateError::not_found("exercise", format!("week {} {} {}", week, day, exercise)))
}

impl WeightsState {
  pub async fn load(store: Store, level: Level) -> Self {
    let inner = LevelState::load(
      store,
      Entity::WeightData,
      level,
      || default_weights(level),
      migrate_weights,
    )
    .await;
    Self { inner }
  }

  pub fn exercises(&self) -> &[WeightExercise] {
    self.inner.get()
  }

  pub fn find(&self, week: u32, day: Weekday, exercise: &str) -> Option<&WeightExercise> {
    self.exercises().iter().find(|e| e.matches(week, day, exercise))
  }

  pub async fn set_num_sets(&mut self, week: u32, day: Weekday, exercise: &str, num_sets: u32) -> Result<(), StateError> {
    if num_sets > MAX_SETS {
      return Err(StateError::Invalid(format!("at most {} sets", MAX_SETS)));
    }
    self
      .inner
      .try_mutate(|exercises| {
        exercise_mut(exercises, week, day, exercise)?.resize_sets(num_sets);
        Ok(())
      })
      .await
  }

  pub async fn update_set(
    &mut self,
    week: u32,
    day: Weekday,
    exercise: &str,
    set_number: u32,
    field: SetField,
  ) -> Result<(), StateError> {
    self
      .inner
      .try_mutate(|exercises| {
        let entry = exercise_mut(exercises, week, day, exercise)?;
        if entry.update_set(set_number, field) {
          Ok(())
        } else {
          Err(StateError::not_found("set", format!("{} set {}", exercise, set_number)))
        }
      })
      .await
  }

  /// Advance the recommendation one step and return the new value
  pub async fn cycle_recommendation(
    &mut self,
    week: u32,
    day: Weekday,
    exercise: &str,
  ) -> Result<Option<WeightRecommendation>, StateError> {
    self
      .inner
      .try_mutate(|exercises| {
        let entry = exercise_mut(exercises, week, day, exercise)?;
        entry.weight_recommendation = WeightRecommendation::cycle(entry.weight_recommendation);
        Ok(entry.weight_recommendation)
      })
      .await
  }

  /// Status belongs to the workout, so every exercise in it changes
  pub async fn set_status(
    &mut self,
    week: u32,
    day: Weekday,
    workout_name: &str,
    status: WorkoutStatus,
  ) -> Result<(), StateError> {
    self
      .inner
      .try_mutate(|exercises| {
        let mut found = false;
        for exercise in exercises.iter_mut().filter(|e| e.in_workout(week, day, workout_name)) {
          exercise.status = status;
          found = true;
        }
        if found {
          Ok(())
        } else {
          Err(StateError::not_found("workout", format!("week {} {} {}", week, day, workout_name)))
        }
      })
      .await
  }
}
