//! Program clock: which week it is, what is on today, and what comes next

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Level, Weekday};
use crate::schedule::{ScheduledActivity, WeekSchedule};

/// Whole days since the start date; negative before it
pub fn days_into_program(start: NaiveDate, today: NaiveDate) -> i64 {
  (today - start).num_days()
}

pub fn program_has_started(start: NaiveDate, today: NaiveDate) -> bool {
  today >= start
}

/// Week from the start date when it has been reached, otherwise the manually
/// selected week; clamped to the level's range either way
pub fn effective_week(start: Option<NaiveDate>, today: NaiveDate, manual_week: u32, level: Level) -> u32 {
  match start {
    Some(start) if program_has_started(start, today) => {
      let week = days_into_program(start, today) / 7 + 1;
      level.clamp_week(u32::try_from(week).unwrap_or(u32::MAX))
    }
    _ => level.clamp_week(manual_week),
  }
}

/// Calendar date of `day` in program week `week`. Week 1 begins on the start
/// date itself.
pub fn workout_date(start: NaiveDate, week: u32, day: Weekday) -> NaiveDate {
  let start_day = Weekday::from_chrono(start.weekday());
  let offset = (day.index() + 7 - start_day.index()) % 7;
  start + Duration::days(i64::from(week.saturating_sub(1)) * 7 + offset as i64)
}

/// Inputs every clock question needs
#[derive(Debug, Clone, Copy)]
pub struct ProgramClock {
  pub start: Option<NaiveDate>,
  pub today: NaiveDate,
  pub manual_week: u32,
  pub level: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextWorkout {
  pub week: u32,
  pub day: Weekday,
  pub date: Option<NaiveDate>,
  pub activity: ScheduledActivity,
}

impl ProgramClock {
  /// True when a start date is set and still in the future
  pub fn is_waiting(&self) -> bool {
    matches!(self.start, Some(start) if !program_has_started(start, self.today))
  }

  pub fn week(&self) -> u32 {
    effective_week(self.start, self.today, self.manual_week, self.level)
  }

  pub fn weekday(&self) -> Weekday {
    Weekday::from_chrono(self.today.weekday())
  }
}

pub fn todays_workouts<F>(clock: &ProgramClock, mut schedule_for: F) -> Vec<ScheduledActivity>
where
  F: FnMut(u32) -> WeekSchedule,
{
  if clock.is_waiting() {
    return Vec::new();
  }
  schedule_for(clock.week()).remove(&clock.weekday()).unwrap_or_default()
}

/// First activity after today. Before the program begins the search covers all
/// of week 1. Once the last week is over there is nothing left.
pub fn next_workout<F>(clock: &ProgramClock, mut schedule_for: F) -> Option<NextWorkout>
where
  F: FnMut(u32) -> WeekSchedule,
{
  if let Some(start) = clock.start {
    if days_into_program(start, clock.today) >= i64::from(clock.level.max_weeks()) * 7 {
      return None;
    }
  }

  let (from_week, mut first_day) = if clock.is_waiting() {
    (1, 0)
  } else {
    (clock.week(), clock.weekday().index() + 1)
  };

  for week in from_week..=clock.level.max_weeks() {
    let mut schedule = schedule_for(week);
    for day in Weekday::ALL.into_iter().skip(first_day) {
      let activity = schedule.remove(&day).and_then(|activities| activities.into_iter().next());
      if let Some(activity) = activity {
        return Some(NextWorkout {
          week,
          day,
          date: clock.start.map(|start| workout_date(start, week, day)),
          activity,
        });
      }
    }
    first_day = 0;
  }
  None
}
