use serde::{Deserialize, Serialize};

use super::calendar::Weekday;
use super::fields;
use super::status::WorkoutStatus;
use super::TimedRecord;
use crate::time_format::{calculate_pace_min_per_km, normalize_duration_input};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunType {
  #[default]
  Steady,
  Interval,
}

impl RunType {
  pub fn as_str(self) -> &'static str {
    match self {
      RunType::Steady => "Steady",
      RunType::Interval => "Interval",
    }
  }
}

impl std::fmt::Display for RunType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for RunType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Steady" => Ok(RunType::Steady),
      "Interval" => Ok(RunType::Interval),
      _ => Err(format!("Unknown run type: {}", s)),
    }
  }
}

/// One scheduled run, identified by `(week, day, run)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSession {
  pub week: u32,
  pub day: Weekday,
  pub run: u8,
  #[serde(rename = "type", default, deserialize_with = "fields::lenient_enum")]
  pub run_type: RunType,
  #[serde(default, deserialize_with = "fields::string")]
  pub intensity: String,
  /// Kilometres
  #[serde(default, deserialize_with = "fields::opt_f64")]
  pub distance: Option<f64>,
  /// MM:SS
  #[serde(default, deserialize_with = "fields::string")]
  pub duration: String,
  /// MM:SS per km, always derived from duration and distance
  #[serde(default, deserialize_with = "fields::string")]
  pub pace: String,
  #[serde(default, deserialize_with = "fields::opt_u8")]
  pub rpe: Option<u8>,
  #[serde(default, deserialize_with = "fields::string")]
  pub interval_structure: String,
  #[serde(default, deserialize_with = "fields::u32_or_zero")]
  pub interval_rounds: u32,
  #[serde(default, deserialize_with = "fields::string")]
  pub rest_time: String,
  #[serde(default, deserialize_with = "fields::lenient_enum")]
  pub status: WorkoutStatus,
}

/// A user edit to one run
#[derive(Debug, Clone, PartialEq)]
pub enum RunField {
  Distance(Option<f64>),
  Duration(String),
  Rpe(Option<u8>),
  Intensity(String),
  IntervalStructure(String),
  IntervalRounds(u32),
  RestTime(String),
}

impl RunSession {
  pub fn is_interval(&self) -> bool {
    self.run_type == RunType::Interval
  }

  pub fn matches(&self, week: u32, day: Weekday, run: u8) -> bool {
    self.week == week && self.day == day && self.run == run
  }

  /// Schedule line, e.g. `Run 1: 3.5km Steady (65-75% HR)`
  pub fn summary(&self) -> String {
    format!(
      "Run {}: {}km {} ({})",
      self.run,
      self.distance.unwrap_or(0.0),
      self.run_type,
      self.intensity
    )
  }

  /// Apply an edit; duration and distance edits re-derive the pace
  pub fn apply(&mut self, field: RunField) {
    let recompute = matches!(field, RunField::Distance(_) | RunField::Duration(_));
    match field {
      RunField::Distance(km) => self.distance = km.filter(|d| d.is_finite() && *d >= 0.0),
      RunField::Duration(text) => self.duration = normalize_duration_input(&text),
      RunField::Rpe(rpe) => self.rpe = rpe.filter(|r| (1..=5).contains(r)),
      RunField::Intensity(text) => self.intensity = text,
      RunField::IntervalStructure(text) => self.interval_structure = text,
      RunField::IntervalRounds(rounds) => self.interval_rounds = rounds,
      RunField::RestTime(text) => self.rest_time = text,
    }
    if recompute {
      self.pace = calculate_pace_min_per_km(&self.duration, self.distance);
    }
  }
}

impl TimedRecord for RunSession {
  fn duration_mut(&mut self) -> &mut String {
    &mut self.duration
  }

  fn pace_mut(&mut self) -> Option<&mut String> {
    Some(&mut self.pace)
  }
}
