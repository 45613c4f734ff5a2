//! Weekly schedule: runs, weights, cycling and rest-day yoga merged by weekday

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
  ActivityKind, ActivityRef, CycleSegment, Level, RunSession, Weekday, WeightExercise,
  WorkoutStatus, YogaEntry,
};
use crate::plan::WorkoutDay;
use crate::state::YogaState;

pub const YOGA_DETAIL: &str = "Rest Day Yoga";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActivity {
  pub kind: ActivityKind,
  pub detail: String,
  pub is_interval: bool,
  pub status: WorkoutStatus,
  pub activity: ActivityRef,
}

/// All seven weekdays, Sunday first
pub type WeekSchedule = BTreeMap<Weekday, Vec<ScheduledActivity>>;

/// Where rest-day yoga entries come from
pub trait YogaSource {
  fn yoga_entry(&mut self, week: u32, day: Weekday) -> YogaEntry;
}

/// Fetch-or-create: the schedule is what brings yoga entries into existence
impl YogaSource for YogaState {
  fn yoga_entry(&mut self, week: u32, day: Weekday) -> YogaEntry {
    self.get_or_create(week, day)
  }
}

/// Read-only lookup; missing days get a transient default
impl YogaSource for &[YogaEntry] {
  fn yoga_entry(&mut self, week: u32, day: Weekday) -> YogaEntry {
    self
      .iter()
      .find(|y| y.week == week && y.day == day)
      .cloned()
      .unwrap_or_else(|| YogaEntry::new(week, day))
  }
}

fn cycling_detail(level: Level, week: u32) -> String {
  let interval = level.is_interval_cycling_week(week);
  let cycle_type = if interval { "Interval" } else { "Steady" };
  let duration = match level {
    Level::Two if !interval => "45-60min",
    _ => "40min",
  };
  format!("{} {} Cycle", duration, cycle_type)
}

pub fn schedule_for_week<Y>(
  week: u32,
  level: Level,
  plan: &[WorkoutDay],
  runs: &[RunSession],
  cycles: &[CycleSegment],
  weights: &[WeightExercise],
  yoga: &mut Y,
) -> WeekSchedule
where
  Y: YogaSource + ?Sized,
{
  let mut schedule: WeekSchedule = Weekday::ALL.into_iter().map(|d| (d, Vec::new())).collect();

  for run in runs.iter().filter(|r| r.week == week) {
    schedule.entry(run.day).or_default().push(ScheduledActivity {
      kind: ActivityKind::Running,
      detail: run.summary(),
      is_interval: run.is_interval(),
      status: run.status,
      activity: ActivityRef::Running {
        week,
        day: run.day,
        run: run.run,
      },
    });
  }

  for workout in plan {
    let status = weights
      .iter()
      .find(|e| e.in_workout(week, workout.day, workout.name))
      .map(|e| e.status)
      .unwrap_or_default();
    schedule.entry(workout.day).or_default().push(ScheduledActivity {
      kind: ActivityKind::Weights,
      detail: workout.name.to_string(),
      is_interval: false,
      status,
      activity: ActivityRef::Weights {
        week,
        day: workout.day,
        workout_name: workout.name.to_string(),
      },
    });
  }

  let cycling_day = level.cycling_day();
  let cycling_status = cycles
    .iter()
    .find(|c| c.week == week && c.day == cycling_day)
    .map(|c| c.status)
    .unwrap_or_default();
  schedule.entry(cycling_day).or_default().push(ScheduledActivity {
    kind: ActivityKind::Cycling,
    detail: cycling_detail(level, week),
    is_interval: level.is_interval_cycling_week(week),
    status: cycling_status,
    activity: ActivityRef::Cycling {
      week,
      day: cycling_day,
    },
  });

  for (day, activities) in schedule.iter_mut() {
    let training_day = activities
      .iter()
      .any(|a| matches!(a.kind, ActivityKind::Running | ActivityKind::Cycling));
    if training_day {
      continue;
    }
    let entry = yoga.yoga_entry(week, *day);
    activities.push(ScheduledActivity {
      kind: ActivityKind::Yoga,
      detail: YOGA_DETAIL.to_string(),
      is_interval: false,
      status: entry.status,
      activity: ActivityRef::Yoga { week, day: *day },
    });
  }

  schedule
}
