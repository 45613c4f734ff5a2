use serde::{Deserialize, Serialize};

use super::calendar::Weekday;
use super::fields;
use super::status::WorkoutStatus;

/// Coach's note for next week's load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightRecommendation {
  Drop,
  Stay,
  Increase,
}

impl WeightRecommendation {
  /// Click order: none -> drop -> stay -> increase -> none
  pub fn cycle(current: Option<Self>) -> Option<Self> {
    match current {
      None => Some(Self::Drop),
      Some(Self::Drop) => Some(Self::Stay),
      Some(Self::Stay) => Some(Self::Increase),
      Some(Self::Increase) => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Drop => "drop",
      Self::Stay => "stay",
      Self::Increase => "increase",
    }
  }
}

impl std::str::FromStr for WeightRecommendation {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "drop" => Ok(Self::Drop),
      "stay" => Ok(Self::Stay),
      "increase" => Ok(Self::Increase),
      _ => Err(format!("Unknown weight recommendation: {}", s)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
  pub set: u32,
  #[serde(default, deserialize_with = "fields::string")]
  pub weight: String,
  #[serde(default, deserialize_with = "fields::string")]
  pub reps: String,
  #[serde(default, deserialize_with = "fields::string")]
  pub rpe: String,
  #[serde(default, deserialize_with = "fields::string")]
  pub notes: String,
}

impl SetEntry {
  pub fn empty(set: u32) -> Self {
    Self {
      set,
      weight: String::new(),
      reps: String::new(),
      rpe: String::new(),
      notes: String::new(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetField {
  Weight(String),
  Reps(String),
  Rpe(String),
  Notes(String),
}

/// One exercise of a weights workout, identified by `(week, day, exercise)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightExercise {
  pub week: u32,
  pub day: Weekday,
  #[serde(default, deserialize_with = "fields::string")]
  pub workout_name: String,
  #[serde(default, deserialize_with = "fields::string")]
  pub exercise: String,
  #[serde(default, deserialize_with = "fields::string")]
  pub rep_range: String,
  #[serde(default, deserialize_with = "fields::u32_or_zero")]
  pub recommended_sets: u32,
  #[serde(default, deserialize_with = "fields::u32_or_zero")]
  pub num_sets: u32,
  #[serde(default)]
  pub sets: Vec<SetEntry>,
  #[serde(default, deserialize_with = "fields::lenient_enum")]
  pub status: WorkoutStatus,
  #[serde(default, deserialize_with = "fields::lenient_opt_enum")]
  pub weight_recommendation: Option<WeightRecommendation>,
}

impl WeightExercise {
  pub fn matches(&self, week: u32, day: Weekday, exercise: &str) -> bool {
    self.week == week && self.day == day && self.exercise == exercise
  }

  pub fn in_workout(&self, week: u32, day: Weekday, workout_name: &str) -> bool {
    self.week == week && self.day == day && self.workout_name == workout_name
  }

  /// Grow with empty sets (keeping logged ones) or drop the excess
  pub fn resize_sets(&mut self, num_sets: u32) {
    self.num_sets = num_sets;
    let target = num_sets as usize;
    if target < self.sets.len() {
      self.sets.truncate(target);
    } else {
      for n in self.sets.len()..target {
        self.sets.push(SetEntry::empty(n as u32 + 1));
      }
    }
  }

  /// Edit a set by its 1-based number; returns false if the set does not exist
  pub fn update_set(&mut self, set_number: u32, field: SetField) -> bool {
    let Some(entry) = self.sets.iter_mut().find(|s| s.set == set_number) else {
      return false;
    };
    match field {
      SetField::Weight(v) => entry.weight = v,
      SetField::Reps(v) => entry.reps = v,
      SetField::Rpe(v) => entry.rpe = v,
      SetField::Notes(v) => entry.notes = v,
    }
    true
  }
}
