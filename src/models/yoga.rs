use serde::{Deserialize, Serialize};

use super::calendar::Weekday;
use super::fields;
use super::status::WorkoutStatus;
use super::TimedRecord;

/// Rest-day yoga, created on first interaction with that day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YogaEntry {
  pub week: u32,
  pub day: Weekday,
  #[serde(default, deserialize_with = "fields::string")]
  pub duration: String,
  #[serde(default, deserialize_with = "fields::lenient_enum")]
  pub status: WorkoutStatus,
}

impl YogaEntry {
  pub fn new(week: u32, day: Weekday) -> Self {
    Self {
      week,
      day,
      duration: String::new(),
      status: WorkoutStatus::NotDone,
    }
  }
}

impl TimedRecord for YogaEntry {
  fn duration_mut(&mut self) -> &mut String {
    &mut self.duration
  }

  fn pace_mut(&mut self) -> Option<&mut String> {
    None
  }
}
