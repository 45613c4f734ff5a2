use serde::{Deserialize, Serialize};

use super::calendar::Weekday;

// ---------------------------------------------------------------------------
/// Workout Status: one per workout occurrence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
  #[default]
  NotDone,
  Completed,
  Skipped,
}

impl WorkoutStatus {
  /// Toggle order: not_done -> completed -> skipped -> not_done
  pub fn next(self) -> Self {
    match self {
      Self::NotDone => Self::Completed,
      Self::Completed => Self::Skipped,
      Self::Skipped => Self::NotDone,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::NotDone => "not_done",
      Self::Completed => "completed",
      Self::Skipped => "skipped",
    }
  }

  /// Completed and skipped workouts are folded away in the UI
  pub fn is_settled(self) -> bool {
    !matches!(self, Self::NotDone)
  }
}

impl std::fmt::Display for WorkoutStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for WorkoutStatus {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "not_done" => Ok(Self::NotDone),
      "completed" => Ok(Self::Completed),
      "skipped" => Ok(Self::Skipped),
      _ => Err(format!("Unknown workout status: {}", s)),
    }
  }
}

// ---------------------------------------------------------------------------
/// Activity identity shared by schedule, progress and collapse state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
  Running,
  Weights,
  Cycling,
  Yoga,
}

impl ActivityKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Running => "running",
      Self::Weights => "weights",
      Self::Cycling => "cycling",
      Self::Yoga => "yoga",
    }
  }
}

/// Identifies one workout occurrence (the unit that carries a status)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityRef {
  Running { week: u32, day: Weekday, run: u8 },
  Cycling { week: u32, day: Weekday },
  Weights {
    week: u32,
    day: Weekday,
    #[serde(rename = "workoutName")]
    workout_name: String,
  },
  Yoga { week: u32, day: Weekday },
}

impl ActivityRef {
  pub fn kind(&self) -> ActivityKind {
    match self {
      Self::Running { .. } => ActivityKind::Running,
      Self::Cycling { .. } => ActivityKind::Cycling,
      Self::Weights { .. } => ActivityKind::Weights,
      Self::Yoga { .. } => ActivityKind::Yoga,
    }
  }

  pub fn week(&self) -> u32 {
    match self {
      Self::Running { week, .. }
      | Self::Cycling { week, .. }
      | Self::Weights { week, .. }
      | Self::Yoga { week, .. } => *week,
    }
  }

  pub fn day(&self) -> Weekday {
    match self {
      Self::Running { day, .. }
      | Self::Cycling { day, .. }
      | Self::Weights { day, .. }
      | Self::Yoga { day, .. } => *day,
    }
  }

  /// Key used by the collapsed-workouts map, e.g. `running-3-Monday-1`
  pub fn collapse_key(&self) -> String {
    match self {
      Self::Running { week, day, run } => format!("running-{}-{}-{}", week, day, run),
      Self::Cycling { week, day } => format!("cycling-{}-{}", week, day),
      Self::Weights { week, day, workout_name } => {
        format!("weights-{}-{}-{}", week, day, workout_name)
      }
      Self::Yoga { week, day } => format!("yoga-{}-{}", week, day),
    }
  }
}
