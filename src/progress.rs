//! Completion statistics
//!
//! Records come at different granularities: one run is one workout, but a
//! cycling session is many segments and a weights workout is many exercises.
//! Everything here counts workout occurrences, taking each group's status from
//! its first member.

use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

use crate::models::{
  ActivityRef, CycleSegment, RunSession, Weekday, WeightExercise, WorkoutStatus, YogaEntry,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
  pub total: u32,
  pub completed: u32,
  pub skipped: u32,
  pub not_done: u32,
  /// Whole percent of `total` that is completed
  pub completion_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallProgress {
  #[serde(flatten)]
  pub progress: Progress,
  /// Latest week with anything completed; a hint, not the program clock
  pub current_week: u32,
}

impl Progress {
  fn from_statuses<I>(statuses: I) -> Self
  where
    I: IntoIterator<Item = WorkoutStatus>,
  {
    let mut progress = Progress::default();
    for status in statuses {
      progress.total += 1;
      match status {
        WorkoutStatus::Completed => progress.completed += 1,
        WorkoutStatus::Skipped => progress.skipped += 1,
        WorkoutStatus::NotDone => {}
      }
    }
    progress.not_done = progress.total - progress.completed - progress.skipped;
    progress.completion_rate = if progress.total == 0 {
      0
    } else {
      (100.0 * progress.completed as f64 / progress.total as f64).round() as u32
    };
    progress
  }
}

/// Status of the first member of each distinct group
fn group_statuses<'a, T, K, F>(records: impl IntoIterator<Item = &'a T>, key: F) -> Vec<WorkoutStatus>
where
  T: HasStatus + 'a,
  K: Eq + Hash,
  F: Fn(&T) -> K,
{
  let mut seen = HashSet::new();
  records
    .into_iter()
    .filter(|&r| seen.insert(key(r)))
    .map(|r| r.status())
    .collect()
}

trait HasStatus {
  fn status(&self) -> WorkoutStatus;
}

impl HasStatus for RunSession {
  fn status(&self) -> WorkoutStatus {
    self.status
  }
}

impl HasStatus for CycleSegment {
  fn status(&self) -> WorkoutStatus {
    self.status
  }
}

impl HasStatus for WeightExercise {
  fn status(&self) -> WorkoutStatus {
    self.status
  }
}

impl HasStatus for YogaEntry {
  fn status(&self) -> WorkoutStatus {
    self.status
  }
}

fn occurrence_statuses<P>(
  runs: &[RunSession],
  cycles: &[CycleSegment],
  weights: &[WeightExercise],
  yoga: &[YogaEntry],
  in_scope: P,
) -> Vec<WorkoutStatus>
where
  P: Fn(u32) -> bool,
{
  let mut statuses = group_statuses(runs.iter().filter(|r| in_scope(r.week)), |r| {
    (r.week, r.day, r.run)
  });
  statuses.extend(group_statuses(cycles.iter().filter(|c| in_scope(c.week)), |c| {
    (c.week, c.day)
  }));
  statuses.extend(group_statuses(weights.iter().filter(|e| in_scope(e.week)), |e| {
    (e.week, e.day, e.workout_name.clone())
  }));
  statuses.extend(group_statuses(yoga.iter().filter(|y| in_scope(y.week)), |y| {
    (y.week, y.day)
  }));
  statuses
}

pub fn week_progress(
  week: u32,
  runs: &[RunSession],
  cycles: &[CycleSegment],
  weights: &[WeightExercise],
  yoga: &[YogaEntry],
) -> Progress {
  Progress::from_statuses(occurrence_statuses(runs, cycles, weights, yoga, |w| w == week))
}

pub fn overall_progress(
  runs: &[RunSession],
  cycles: &[CycleSegment],
  weights: &[WeightExercise],
  yoga: &[YogaEntry],
) -> OverallProgress {
  let progress = Progress::from_statuses(occurrence_statuses(runs, cycles, weights, yoga, |_| true));

  let completed_weeks = runs
    .iter()
    .filter(|r| r.status == WorkoutStatus::Completed)
    .map(|r| r.week)
    .chain(cycles.iter().filter(|c| c.status == WorkoutStatus::Completed).map(|c| c.week))
    .chain(weights.iter().filter(|e| e.status == WorkoutStatus::Completed).map(|e| e.week))
    .chain(yoga.iter().filter(|y| y.status == WorkoutStatus::Completed).map(|y| y.week));

  OverallProgress {
    progress,
    current_week: completed_weeks.max().unwrap_or(1).max(1),
  }
}

/// Status of one workout occurrence; unknown workouts are `not_done`
pub fn workout_status(
  activity: &ActivityRef,
  runs: &[RunSession],
  cycles: &[CycleSegment],
  weights: &[WeightExercise],
  yoga: &[YogaEntry],
) -> WorkoutStatus {
  let status = match activity {
    ActivityRef::Running { week, day, run } => runs
      .iter()
      .find(|r| r.matches(*week, *day, *run))
      .map(|r| r.status),
    ActivityRef::Cycling { week, day } => cycles
      .iter()
      .find(|c| c.week == *week && c.day == *day)
      .map(|c| c.status),
    ActivityRef::Weights {
      week,
      day,
      workout_name,
    } => weights
      .iter()
      .find(|e| e.in_workout(*week, *day, workout_name))
      .map(|e| e.status),
    ActivityRef::Yoga { week, day } => yoga
      .iter()
      .find(|y| y.week == *week && y.day == *day)
      .map(|y| y.status),
  };
  status.unwrap_or_default()
}

/// ---------------------------------------------------------------------------
/// Last week's weight
/// ---------------------------------------------------------------------------

pub const NO_PREVIOUS_WEIGHT: &str = "-";

/// Weight lifted for the same day, exercise and set one week earlier
pub fn last_week_weight(
  week: u32,
  day: Weekday,
  exercise: &str,
  set_number: u32,
  weights: &[WeightExercise],
) -> String {
  if week <= 1 {
    return NO_PREVIOUS_WEIGHT.to_string();
  }
  weights
    .iter()
    .find(|e| e.matches(week - 1, day, exercise))
    .and_then(|e| e.sets.iter().find(|s| s.set == set_number))
    .map(|s| s.weight.trim())
    .filter(|w| !w.is_empty())
    .unwrap_or(NO_PREVIOUS_WEIGHT)
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{Level, SetField};
  use crate::plan::{default_cycling, default_running, default_weights};
  use crate::test_utils::mock_run;

  fn level_one() -> (Vec<RunSession>, Vec<CycleSegment>, Vec<WeightExercise>) {
    (
      default_running(Level::One),
      default_cycling(Level::One),
      default_weights(Level::One),
    )
  }

  #[test]
  fn test_week_counts_workouts_not_records() {
    let (runs, cycles, weights) = level_one();
    let yoga = vec![YogaEntry::new(2, Weekday::Sunday), YogaEntry::new(2, Weekday::Tuesday)];

    // Week 2 cycles as ten interval segments but counts once
    let progress = week_progress(2, &runs, &cycles, &weights, &yoga);
    assert_eq!(progress.total, 3 + 1 + 4 + 2);
    assert_eq!(progress.not_done, progress.total);
    assert_eq!(progress.completion_rate, 0);
  }

  #[test]
  fn test_group_status_from_first_member() {
    let (mut runs, mut cycles, weights) = level_one();
    for segment in cycles.iter_mut().filter(|c| c.week == 2) {
      segment.status = WorkoutStatus::Completed;
    }
    runs
      .iter_mut()
      .find(|r| r.matches(2, Weekday::Monday, 1))
      .unwrap()
      .status = WorkoutStatus::Skipped;

    let progress = week_progress(2, &runs, &cycles, &weights, &[]);
    assert_eq!(progress.total, 8);
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.skipped, 1);
    assert_eq!(progress.not_done, 6);
    assert_eq!(progress.completion_rate, 13);
  }

  #[test]
  fn test_totals_always_add_up() {
    let (mut runs, cycles, mut weights) = level_one();
    for (i, run) in runs.iter_mut().enumerate() {
      run.status = match i % 3 {
        0 => WorkoutStatus::Completed,
        1 => WorkoutStatus::Skipped,
        _ => WorkoutStatus::NotDone,
      };
    }
    for exercise in weights.iter_mut().filter(|e| e.week % 2 == 0) {
      exercise.status = WorkoutStatus::Completed;
    }

    for week in 1..=8 {
      let p = week_progress(week, &runs, &cycles, &weights, &[]);
      assert_eq!(p.completed + p.skipped + p.not_done, p.total);
    }
    let overall = overall_progress(&runs, &cycles, &weights, &[]).progress;
    assert_eq!(overall.completed + overall.skipped + overall.not_done, overall.total);
    assert_eq!(overall.total, 8 * 3 + 8 + 8 * 4);
  }

  #[test]
  fn test_empty_collections() {
    let progress = week_progress(1, &[], &[], &[], &[]);
    assert_eq!(progress, Progress::default());

    let overall = overall_progress(&[], &[], &[], &[]);
    assert_eq!(overall.current_week, 1);
  }

  #[test]
  fn test_current_week_from_any_collection() {
    let mut run = mock_run(3, Weekday::Monday, 1);
    run.status = WorkoutStatus::Completed;
    let mut yoga = YogaEntry::new(5, Weekday::Sunday);
    yoga.status = WorkoutStatus::Completed;
    let mut skipped = YogaEntry::new(7, Weekday::Sunday);
    skipped.status = WorkoutStatus::Skipped;

    let overall = overall_progress(&[run], &[], &[], &[yoga, skipped]);
    assert_eq!(overall.current_week, 5);
  }

  #[test]
  fn test_workout_status_lookup() {
    let (runs, mut cycles, weights) = level_one();
    for segment in cycles.iter_mut().filter(|c| c.week == 4) {
      segment.status = WorkoutStatus::Skipped;
    }
    let cycling = ActivityRef::Cycling {
      week: 4,
      day: Weekday::Friday,
    };
    assert_eq!(workout_status(&cycling, &runs, &cycles, &weights, &[]), WorkoutStatus::Skipped);

    let yoga = ActivityRef::Yoga {
      week: 1,
      day: Weekday::Sunday,
    };
    assert_eq!(workout_status(&yoga, &runs, &cycles, &weights, &[]), WorkoutStatus::NotDone);
  }

  #[test]
  fn test_last_week_weight() {
    let incline = crate::plan::workout_plan(Level::One)[0].exercises[0].name;
    let mut weights = default_weights(Level::One);
    let logged = weights
      .iter_mut()
      .find(|e| e.matches(1, Weekday::Monday, incline))
      .unwrap();
    logged.resize_sets(2);
    logged.update_set(1, SetField::Weight("40".into()));

    assert_eq!(last_week_weight(1, Weekday::Monday, incline, 1, &weights), "-");
    assert_eq!(last_week_weight(2, Weekday::Monday, incline, 1, &weights), "40");
    // set logged without a weight, then a set that does not exist
    assert_eq!(last_week_weight(2, Weekday::Monday, incline, 2, &weights), "-");
    assert_eq!(last_week_weight(2, Weekday::Monday, incline, 3, &weights), "-");
    assert_eq!(last_week_weight(2, Weekday::Monday, "Nope", 1, &weights), "-");
  }
}
