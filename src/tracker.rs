//! The whole tracker for the active level
//!
//! `Tracker` owns one state object per entity. Switching level reloads every
//! level-scoped collection; settings are shared across levels.

use chrono::NaiveDate;
use tracing::info;

use crate::charts::{self, ChartData};
use crate::export::ExportSource;
use crate::models::{ActivityRef, Level, Weekday, WorkoutStatus};
use crate::plan::workout_plan;
use crate::program::{self, NextWorkout, ProgramClock};
use crate::progress::{self, OverallProgress, Progress};
use crate::schedule::{schedule_for_week, ScheduledActivity, WeekSchedule};
use crate::state::{
  CollapsedState, ColdExposureState, CyclingState, ProgramStartState, RunningState, Settings, StateError,
  WeightLogState, WeightsState, YogaState,
};
use crate::store::Store;

pub struct Tracker {
  store: Store,
  pub settings: Settings,
  pub running: RunningState,
  pub cycling: CyclingState,
  pub weights: WeightsState,
  pub yoga: YogaState,
  pub cold_exposure: ColdExposureState,
  pub weight_log: WeightLogState,
  pub program_start: ProgramStartState,
  pub collapsed: CollapsedState,
}

/// Which chart to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartKind {
  RunningDistance,
  RunningPace,
  CyclingDistance,
  CyclingPace,
  BodyWeightTrend,
  BodyWeightWeekly,
  Exercise { day: Weekday, exercise: String },
  ColdExposureDuration,
  ColdExposureMethods,
  YogaDuration,
}

impl Tracker {
  pub async fn load(store: Store) -> Self {
    let settings = Settings::load(store.clone()).await;
    let level = settings.active_level();
    info!("Loading level {} data", level);

    Self {
      running: RunningState::load(store.clone(), level).await,
      cycling: CyclingState::load(store.clone(), level).await,
      weights: WeightsState::load(store.clone(), level).await,
      yoga: YogaState::load(store.clone(), level).await,
      cold_exposure: ColdExposureState::load(store.clone(), level).await,
      weight_log: WeightLogState::load(store.clone(), level).await,
      program_start: ProgramStartState::load(store.clone(), level).await,
      collapsed: CollapsedState::load(store.clone(), level).await,
      settings,
      store,
    }
  }

  pub fn level(&self) -> Level {
    self.settings.active_level()
  }

  /// Remember the level and swap in its dataset
  pub async fn switch_level(&mut self, level: Level) {
    if level == self.level() {
      return;
    }
    self.yoga.flush().await;
    self.settings.set_active_level(level).await;
    *self = Tracker::load(self.store.clone()).await;
  }

  /// ---------------------------------------------------------------------------
  /// Status
  /// ---------------------------------------------------------------------------

  pub fn status_of(&self, activity: &ActivityRef) -> WorkoutStatus {
    progress::workout_status(
      activity,
      self.running.runs(),
      self.cycling.segments(),
      self.weights.exercises(),
      self.yoga.entries(),
    )
  }

  pub async fn set_status(&mut self, activity: &ActivityRef, status: WorkoutStatus) -> Result<(), StateError> {
    match activity {
      ActivityRef::Running { week, day, run } => self.running.set_status(*week, *day, *run, status).await?,
      ActivityRef::Cycling { week, day } => self.cycling.set_status(*week, *day, status).await?,
      ActivityRef::Weights {
        week,
        day,
        workout_name,
      } => self.weights.set_status(*week, *day, workout_name, status).await?,
      ActivityRef::Yoga { week, day } => self.yoga.set_status(*week, *day, status).await,
    }
    if status.is_settled() {
      self.collapsed.set(activity, true).await;
    }
    Ok(())
  }

  /// Advance not_done -> completed -> skipped -> not_done; settled workouts fold away
  pub async fn toggle_status(&mut self, activity: &ActivityRef) -> Result<WorkoutStatus, StateError> {
    let next = self.status_of(activity).next();
    self.set_status(activity, next).await?;
    Ok(next)
  }

  /// ---------------------------------------------------------------------------
  /// Derived views
  /// ---------------------------------------------------------------------------

  /// Builds the week's schedule; yoga entries for rest days are created and saved
  pub async fn schedule(&mut self, week: u32) -> WeekSchedule {
    let level = self.level();
    let schedule = schedule_for_week(
      level.clamp_week(week),
      level,
      workout_plan(level),
      self.running.runs(),
      self.cycling.segments(),
      self.weights.exercises(),
      &mut self.yoga,
    );
    self.yoga.flush().await;
    schedule
  }

  pub fn clock(&self, today: NaiveDate, manual_week: u32) -> ProgramClock {
    ProgramClock {
      start: self.program_start.date(),
      today,
      manual_week,
      level: self.level(),
    }
  }

  pub async fn todays_workouts(&mut self, clock: &ProgramClock) -> Vec<ScheduledActivity> {
    let level = self.level();
    let (runs, cycles, weights) = (self.running.runs(), self.cycling.segments(), self.weights.exercises());
    let yoga = &mut self.yoga;
    let today = program::todays_workouts(clock, |week| {
      schedule_for_week(week, level, workout_plan(level), runs, cycles, weights, &mut *yoga)
    });
    self.yoga.flush().await;
    today
  }

  pub async fn next_workout(&mut self, clock: &ProgramClock) -> Option<NextWorkout> {
    let level = self.level();
    let (runs, cycles, weights) = (self.running.runs(), self.cycling.segments(), self.weights.exercises());
    let yoga = &mut self.yoga;
    let next = program::next_workout(clock, |week| {
      schedule_for_week(week, level, workout_plan(level), runs, cycles, weights, &mut *yoga)
    });
    self.yoga.flush().await;
    next
  }

  pub fn week_progress(&self, week: u32) -> Progress {
    progress::week_progress(
      week,
      self.running.runs(),
      self.cycling.segments(),
      self.weights.exercises(),
      self.yoga.entries(),
    )
  }

  pub fn overall_progress(&self) -> OverallProgress {
    progress::overall_progress(
      self.running.runs(),
      self.cycling.segments(),
      self.weights.exercises(),
      self.yoga.entries(),
    )
  }

  pub fn export_source(&self) -> ExportSource<'_> {
    ExportSource {
      runs: self.running.runs(),
      cycles: self.cycling.segments(),
      weights: self.weights.exercises(),
      yoga: self.yoga.entries(),
      cold_exposure: self.cold_exposure.entries(),
    }
  }

  pub fn chart(&self, kind: &ChartKind) -> ChartData {
    let level = self.level();
    match kind {
      ChartKind::RunningDistance => charts::running_distance(self.running.runs(), level),
      ChartKind::RunningPace => charts::running_pace(self.running.runs(), level),
      ChartKind::CyclingDistance => charts::cycling_distance(self.cycling.segments(), level),
      ChartKind::CyclingPace => charts::cycling_pace(self.cycling.segments(), level),
      ChartKind::BodyWeightTrend => {
        charts::body_weight_trend(self.weight_log.entries(), self.weight_log.target_weight())
      }
      ChartKind::BodyWeightWeekly => {
        charts::body_weight_weekly(self.weight_log.entries(), self.weight_log.target_weight(), level)
      }
      ChartKind::Exercise { day, exercise } => {
        charts::exercise_weight(self.weights.exercises(), exercise, *day, level)
      }
      ChartKind::ColdExposureDuration => charts::cold_exposure_duration(self.cold_exposure.entries()),
      ChartKind::ColdExposureMethods => charts::cold_exposure_methods(self.cold_exposure.entries()),
      ChartKind::YogaDuration => charts::yoga_duration(self.yoga.entries(), level),
    }
  }
}
