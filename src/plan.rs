//! Training plan rosters and default record generators
//!
//! A level with no stored data starts from these generators; they are also the
//! source of the weights schedule, which lists every plan workout even before
//! any exercise has been logged.

use crate::models::{
  CycleSegment, Level, RunSession, RunType, Weekday, WeightExercise, WorkoutStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanExercise {
  pub name: &'static str,
  pub rep_range: &'static str,
  pub recommended_sets: u32,
}

/// One weights workout of the weekly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutDay {
  pub day: Weekday,
  pub name: &'static str,
  pub exercises: &'static [PlanExercise],
}

const fn ex(name: &'static str, rep_range: &'static str, recommended_sets: u32) -> PlanExercise {
  PlanExercise {
    name,
    rep_range,
    recommended_sets,
  }
}

/// ---------------------------------------------------------------------------
/// Level 1 roster
/// ---------------------------------------------------------------------------

const L1_CHEST_TRICEPS: &[PlanExercise] = &[
  ex("Incline Dumbbell Press", "8-12", 2),
  ex("Flat Chest Press Machine", "8-12", 2),
  ex("Pec Dec Machine", "8-12", 2),
  ex("Cable/Dumbbell Flyes", "8-12", 2),
  ex("Rope Tricep Pulldowns", "10-14", 2),
  ex("Straight Bar Pushdowns", "10-14", 2),
  ex("Overhead Tricep Press", "10-14", 2),
];

const L1_BACK_BICEPS: &[PlanExercise] = &[
  ex("Lat Pulldown (Wide Grip)", "8-12", 2),
  ex("Seated Cable Row (Close Grip)", "8-12", 2),
  ex("T Bar Row", "8-12", 2),
  ex("Single Arm Cable Low Row", "8-12", 2),
  ex("Cable Hammer Curls", "10-14", 2),
  ex("Seated Dumbbell Bicep Curls", "10-14", 2),
  ex("Preacher Curls", "10-14", 2),
];

const L1_SHOULDERS: &[PlanExercise] = &[
  ex("Dumbbell Shoulder Press", "8-12", 2),
  ex("Machine Shoulder Press", "8-12", 2),
  ex("Dumbbell Side Lateral Raises", "10-14", 3),
  ex("Reverse Pec Dec Machine", "10-14", 2),
];

const L1_LEGS: &[PlanExercise] = &[
  ex("Hamstring Curl Machine", "8-12", 2),
  ex("RDLs", "8-12", 2),
  ex("Seated Leg Press", "8-12", 2),
  ex("Bulgarian Split Squats", "8-12", 2),
  ex("Leg Extensions", "8-12", 2),
];

const LEVEL_ONE_PLAN: &[WorkoutDay] = &[
  WorkoutDay { day: Weekday::Monday, name: "Chest & Triceps", exercises: L1_CHEST_TRICEPS },
  WorkoutDay { day: Weekday::Tuesday, name: "Back & Biceps", exercises: L1_BACK_BICEPS },
  WorkoutDay { day: Weekday::Wednesday, name: "Shoulders", exercises: L1_SHOULDERS },
  WorkoutDay { day: Weekday::Thursday, name: "Legs", exercises: L1_LEGS },
];

/// ---------------------------------------------------------------------------
/// Level 2 roster
/// ---------------------------------------------------------------------------

const L2_CHEST: &[PlanExercise] = &[
  ex("Incline Dumbbell Press", "8-12", 3),
  ex("Flat Chest Press Machine", "8-12", 3),
  ex("Pec Dec Machine", "8-12", 3),
  ex("Cable/Dumbbell Flyes", "8-12", 3),
];

const L2_LEGS: &[PlanExercise] = &[
  ex("Barbell Back Squats", "8-12", 3),
  ex("Hamstring Curl Machine", "8-12", 3),
  ex("RDLs", "8-12", 3),
  ex("Seated Leg Press", "8-12", 3),
  ex("Leg Extensions", "8-12", 3),
];

const L2_SHOULDERS_TRICEPS: &[PlanExercise] = &[
  ex("Dumbbell Shoulder Press", "8-12", 3),
  ex("Machine Shoulder Press", "8-12", 3),
  ex("Dumbbell Side Lateral Raises", "10-14", 3),
  ex("Reverse Pec Dec Machine", "10-14", 3),
  ex("Rope Tricep Pulldowns", "10-14", 3),
  ex("Straight Bar Pushdowns", "10-14", 3),
  ex("Overhead Tricep Press", "10-14", 3),
];

const L2_BACK_BICEPS: &[PlanExercise] = &[
  ex("Lat Pulldown (Wide Grip)", "8-12", 3),
  ex("Seated Cable Row (Close Grip)", "8-12", 3),
  ex("T Bar Row", "8-12", 3),
  ex("Single Arm Cable Low Row", "8-12", 3),
  ex("Cable Hammer Curls", "10-14", 3),
  ex("Seated Dumbbell Bicep Curls", "10-14", 3),
  ex("Preacher Curls", "10-14", 3),
];

const LEVEL_TWO_PLAN: &[WorkoutDay] = &[
  WorkoutDay { day: Weekday::Monday, name: "Chest", exercises: L2_CHEST },
  WorkoutDay { day: Weekday::Tuesday, name: "Legs", exercises: L2_LEGS },
  WorkoutDay { day: Weekday::Thursday, name: "Shoulders & Triceps", exercises: L2_SHOULDERS_TRICEPS },
  WorkoutDay { day: Weekday::Friday, name: "Back & Biceps", exercises: L2_BACK_BICEPS },
];

pub fn workout_plan(level: Level) -> &'static [WorkoutDay] {
  match level {
    Level::One => LEVEL_ONE_PLAN,
    Level::Two => LEVEL_TWO_PLAN,
  }
}

/// ---------------------------------------------------------------------------
/// Running
/// ---------------------------------------------------------------------------

pub const STEADY_INTENSITY: &str = "65-75% HR";
pub const TEMPO_INTENSITY: &str = "80-85% HR";
pub const INTERVAL_INTENSITY: &str = "Variable";
pub const ACTIVE_RECOVERY: &str = "Active recovery (easy pace segments @ 60% HR)";

/// The week from which run 2 becomes an interval session
pub const INTERVAL_RUN_FROM_WEEK: u32 = 6;

/// Interval prescription for run 2 from week 6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalPrescription {
  pub structure: &'static str,
  pub rounds: u32,
  pub rest_time: &'static str,
}

pub fn interval_prescription(level: Level) -> IntervalPrescription {
  match level {
    Level::One => IntervalPrescription {
      structure: "1KM Easy @ 60% HR → 500m Hard @ 85% HR → 1KM Easy @ 60% HR → 1KM Hard @ 85% HR → 1KM Easy @ 60% HR → 500m Hard @ 85% HR",
      rounds: 1,
      rest_time: ACTIVE_RECOVERY,
    },
    Level::Two => IntervalPrescription {
      structure: "1KM Easy @ 60% HR → 1KM Hard @ 85% HR",
      rounds: 4,
      rest_time: ACTIVE_RECOVERY,
    },
  }
}

fn steady_run(week: u32, day: Weekday, run: u8, intensity: &str, distance: f64) -> RunSession {
  RunSession {
    week,
    day,
    run,
    run_type: RunType::Steady,
    intensity: intensity.to_string(),
    distance: Some(distance),
    duration: String::new(),
    pace: String::new(),
    rpe: None,
    interval_structure: String::new(),
    interval_rounds: 0,
    rest_time: String::new(),
    status: WorkoutStatus::NotDone,
  }
}

fn interval_run(level: Level, week: u32, day: Weekday, distance: f64) -> RunSession {
  let prescription = interval_prescription(level);
  RunSession {
    run_type: RunType::Interval,
    interval_structure: prescription.structure.to_string(),
    interval_rounds: prescription.rounds,
    rest_time: prescription.rest_time.to_string(),
    ..steady_run(week, day, 2, INTERVAL_INTENSITY, distance)
  }
}

pub fn default_running(level: Level) -> Vec<RunSession> {
  let mut runs = Vec::new();
  for week in 1..=level.max_weeks() {
    let progression = (week - 1) as f64 * 0.5;
    let (monday, wednesday, saturday) = match level {
      Level::One => {
        let build = if week <= 5 { 3.0 + progression } else { 5.0 };
        (build, build, 5.0)
      }
      Level::Two => {
        if (2..=6).contains(&week) {
          (5.0 + progression, 5.0, 8.0 + progression)
        } else {
          (5.0, 5.0, 8.0)
        }
      }
    };

    runs.push(steady_run(week, Weekday::Monday, 1, STEADY_INTENSITY, monday));
    if week >= INTERVAL_RUN_FROM_WEEK {
      runs.push(interval_run(level, week, Weekday::Wednesday, wednesday));
    } else {
      runs.push(steady_run(week, Weekday::Wednesday, 2, TEMPO_INTENSITY, wednesday));
    }
    runs.push(steady_run(week, Weekday::Saturday, 3, STEADY_INTENSITY, saturday));
  }
  runs
}

/// ---------------------------------------------------------------------------
/// Cycling
/// ---------------------------------------------------------------------------

const INTERVAL_SEGMENTS: [(&str, u32); 10] = [
  ("Warm-up", 10),
  ("Hard 1", 4),
  ("Easy 1", 2),
  ("Hard 2", 4),
  ("Easy 2", 2),
  ("Hard 3", 4),
  ("Easy 3", 2),
  ("Hard 4", 4),
  ("Easy 4", 2),
  ("Cool-down", 6),
];

pub const STEADY_SEGMENT: &str = "Steady Cycle";

fn steady_cycle_minutes(level: Level) -> u32 {
  match level {
    Level::One => 40,
    Level::Two => 60,
  }
}

pub fn default_cycling(level: Level) -> Vec<CycleSegment> {
  let day = level.cycling_day();
  let mut segments = Vec::new();
  for week in 1..=level.max_weeks() {
    if level.is_interval_cycling_week(week) {
      segments.extend(
        INTERVAL_SEGMENTS
          .iter()
          .map(|(name, minutes)| CycleSegment::new(week, day, name, *minutes)),
      );
    } else {
      segments.push(CycleSegment::new(week, day, STEADY_SEGMENT, steady_cycle_minutes(level)));
    }
  }
  segments
}

/// ---------------------------------------------------------------------------
/// Weights
/// ---------------------------------------------------------------------------

pub fn default_weights(level: Level) -> Vec<WeightExercise> {
  let mut exercises = Vec::new();
  for week in 1..=level.max_weeks() {
    for workout in workout_plan(level) {
      for exercise in workout.exercises {
        exercises.push(WeightExercise {
          week,
          day: workout.day,
          workout_name: workout.name.to_string(),
          exercise: exercise.name.to_string(),
          rep_range: exercise.rep_range.to_string(),
          recommended_sets: exercise.recommended_sets,
          num_sets: 0,
          sets: Vec::new(),
          status: WorkoutStatus::NotDone,
          weight_recommendation: None,
        });
      }
    }
  }
  exercises
}
