use serde::{Deserialize, Serialize};

use super::calendar::Weekday;
use super::fields;
use super::status::WorkoutStatus;
use super::TimedRecord;
use crate::time_format::{calculate_pace_min_per_km, normalize_duration_input};

/// One sub-interval of a cycling session, identified by `(week, segment)`.
/// All segments of a `(week, day)` share the session status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSegment {
  pub week: u32,
  pub day: Weekday,
  #[serde(default, deserialize_with = "fields::string")]
  pub segment: String,
  /// MM:SS
  #[serde(default, deserialize_with = "fields::string")]
  pub duration: String,
  #[serde(default, deserialize_with = "fields::opt_f64")]
  pub distance: Option<f64>,
  #[serde(default, deserialize_with = "fields::string")]
  pub pace: String,
  #[serde(default, deserialize_with = "fields::opt_u8")]
  pub rpe: Option<u8>,
  #[serde(default, deserialize_with = "fields::lenient_enum")]
  pub status: WorkoutStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleField {
  Duration(String),
  Distance(Option<f64>),
  Rpe(Option<u8>),
}

impl CycleSegment {
  pub fn new(week: u32, day: Weekday, segment: &str, minutes: u32) -> Self {
    Self {
      week,
      day,
      segment: segment.to_string(),
      duration: format!("{}:00", minutes),
      distance: None,
      pace: String::new(),
      rpe: None,
      status: WorkoutStatus::NotDone,
    }
  }

  pub fn apply(&mut self, field: CycleField) {
    match field {
      CycleField::Duration(text) => self.duration = normalize_duration_input(&text),
      CycleField::Distance(km) => self.distance = km.filter(|d| d.is_finite() && *d >= 0.0),
      CycleField::Rpe(rpe) => {
        self.rpe = rpe.filter(|r| (1..=5).contains(r));
        return;
      }
    }
    self.pace = calculate_pace_min_per_km(&self.duration, self.distance);
  }
}

impl TimedRecord for CycleSegment {
  fn duration_mut(&mut self) -> &mut String {
    &mut self.duration
  }

  fn pace_mut(&mut self) -> Option<&mut String> {
    Some(&mut self.pace)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_generator_shape_uses_mmss_duration() {
    let seg = CycleSegment::new(1, Weekday::Friday, "Steady Cycle", 40);
    assert_eq!(seg.duration, "40:00");
    assert_eq!(seg.status, WorkoutStatus::NotDone);
  }

  #[test]
  fn test_distance_edit_recomputes_pace() {
    let mut seg = CycleSegment::new(1, Weekday::Friday, "Steady Cycle", 40);
    seg.apply(CycleField::Distance(Some(16.0)));
    assert_eq!(seg.pace, "2:30");

    seg.apply(CycleField::Rpe(Some(3)));
    assert_eq!(seg.pace, "2:30");
    assert_eq!(seg.rpe, Some(3));
  }

  #[test]
  fn test_decodes_numeric_legacy_duration() {
    let seg: CycleSegment = serde_json::from_str(
      r#"{"week": 2, "day": "Friday", "segment": "Hard 1", "duration": 4, "distance": "", "pace": "", "rpe": ""}"#,
    )
    .unwrap();
    assert_eq!(seg.duration, "4");
    assert_eq!(seg.distance, None);
  }
}
