//! CSV export, one sheet per activity

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::{ColdExposureEntry, CycleSegment, RunSession, WeightExercise, YogaEntry};
use crate::progress::last_week_weight;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

impl serde::Serialize for ExportError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
  Running,
  Cycling,
  Weights,
  Yoga,
  ColdExposure,
}

impl Sheet {
  pub fn as_str(self) -> &'static str {
    match self {
      Sheet::Running => "running",
      Sheet::Cycling => "cycling",
      Sheet::Weights => "weights",
      Sheet::Yoga => "yoga",
      Sheet::ColdExposure => "cold-exposure",
    }
  }

  /// Cold exposure is a journal, not a weekly sheet
  pub fn file_name(self, week: u32) -> String {
    match self {
      Sheet::ColdExposure => format!("{}-tracker.csv", self.as_str()),
      _ => format!("{}-week{}-tracker.csv", self.as_str(), week),
    }
  }
}

impl std::fmt::Display for Sheet {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Sheet {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "running" => Ok(Sheet::Running),
      "cycling" => Ok(Sheet::Cycling),
      "weights" => Ok(Sheet::Weights),
      "yoga" => Ok(Sheet::Yoga),
      "cold-exposure" | "cold_exposure" | "cold" => Ok(Sheet::ColdExposure),
      _ => Err(format!("Unknown sheet: {}", s)),
    }
  }
}

/// Everything a sheet may draw from
pub struct ExportSource<'a> {
  pub runs: &'a [RunSession],
  pub cycles: &'a [CycleSegment],
  pub weights: &'a [WeightExercise],
  pub yoga: &'a [YogaEntry],
  pub cold_exposure: &'a [ColdExposureEntry],
}

fn opt<T: ToString>(value: Option<T>) -> String {
  value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn write_sheet<W: Write>(
  sheet: Sheet,
  week: u32,
  source: &ExportSource<'_>,
  writer: &mut csv::Writer<W>,
) -> Result<(), ExportError> {
  match sheet {
    Sheet::Running => {
      writer.write_record([
        "Week",
        "Day",
        "Run",
        "Type",
        "Intensity",
        "Distance (km)",
        "Duration (MM:SS)",
        "Pace (min/km)",
        "RPE (1-5)",
      ])?;
      for run in source.runs.iter().filter(|r| r.week == week) {
        writer.write_record([
          run.week.to_string(),
          run.day.to_string(),
          run.run.to_string(),
          run.run_type.to_string(),
          run.intensity.clone(),
          opt(run.distance),
          run.duration.clone(),
          run.pace.clone(),
          opt(run.rpe),
        ])?;
      }
    }
    Sheet::Cycling => {
      writer.write_record([
        "Week",
        "Day",
        "Segment",
        "Duration (MM:SS)",
        "Distance (km)",
        "Pace (min/km)",
        "RPE (1-5)",
      ])?;
      for segment in source.cycles.iter().filter(|c| c.week == week) {
        writer.write_record([
          segment.week.to_string(),
          segment.day.to_string(),
          segment.segment.clone(),
          segment.duration.clone(),
          opt(segment.distance),
          segment.pace.clone(),
          opt(segment.rpe),
        ])?;
      }
    }
    Sheet::Weights => {
      writer.write_record([
        "Week",
        "Day",
        "Workout",
        "Exercise",
        "Rep Range",
        "Set",
        "Last Week Weight",
        "Weight (kg)",
        "Reps",
        "RPE (1-10)",
        "Notes",
      ])?;
      for exercise in source.weights.iter().filter(|e| e.week == week) {
        for set in &exercise.sets {
          let last_week = last_week_weight(exercise.week, exercise.day, &exercise.exercise, set.set, source.weights);
          writer.write_record([
            exercise.week.to_string(),
            exercise.day.to_string(),
            exercise.workout_name.clone(),
            exercise.exercise.clone(),
            exercise.rep_range.clone(),
            set.set.to_string(),
            last_week,
            set.weight.clone(),
            set.reps.clone(),
            set.rpe.clone(),
            set.notes.clone(),
          ])?;
        }
      }
    }
    Sheet::Yoga => {
      writer.write_record(["Week", "Day", "Duration (MM:SS)", "Status"])?;
      for entry in source.yoga.iter().filter(|y| y.week == week) {
        writer.write_record([
          entry.week.to_string(),
          entry.day.to_string(),
          entry.duration.clone(),
          entry.status.as_str().to_string(),
        ])?;
      }
    }
    Sheet::ColdExposure => {
      writer.write_record(["Date", "Duration (MM:SS)", "Method", "Temperature (°C)"])?;
      for entry in source.cold_exposure {
        writer.write_record([
          entry.date.format("%Y-%m-%d").to_string(),
          entry.duration.clone(),
          entry.method.label().to_string(),
          opt(entry.temperature),
        ])?;
      }
    }
  }
  writer.flush()?;
  Ok(())
}

pub fn sheet_to_string(sheet: Sheet, week: u32, source: &ExportSource<'_>) -> Result<String, ExportError> {
  let mut writer = csv::Writer::from_writer(Vec::new());
  write_sheet(sheet, week, source, &mut writer)?;
  let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the sheet into `dir` under its conventional file name
pub fn export_to_dir(
  sheet: Sheet,
  week: u32,
  source: &ExportSource<'_>,
  dir: &Path,
) -> Result<PathBuf, ExportError> {
  std::fs::create_dir_all(dir)?;
  let path = dir.join(sheet.file_name(week));
  let mut writer = csv::Writer::from_writer(File::create(&path)?);
  write_sheet(sheet, week, source, &mut writer)?;
  info!("Exported {} to {}", sheet, path.display());
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{ColdMethod, Level, RunField, SetField, Weekday, WorkoutStatus};
  use crate::plan::{default_cycling, default_running, default_weights};
  use chrono::NaiveDate;

  struct Fixture {
    runs: Vec<RunSession>,
    cycles: Vec<CycleSegment>,
    weights: Vec<WeightExercise>,
    yoga: Vec<YogaEntry>,
    cold: Vec<ColdExposureEntry>,
  }

  impl Fixture {
    fn new() -> Self {
      let mut runs = default_running(Level::One);
      runs[0].apply(RunField::Duration("21:00".into()));
      runs[0].apply(RunField::Rpe(Some(3)));

      let mut weights = default_weights(Level::One);
      for week in [1, 2] {
        let exercise = weights
          .iter_mut()
          .find(|e| e.week == week && e.day == Weekday::Monday)
          .unwrap();
        exercise.resize_sets(1);
        exercise.update_set(1, SetField::Weight(format!("{}", 30 + week * 5)));
        exercise.update_set(1, SetField::Notes("felt good, easy".into()));
      }

      let mut yoga = YogaEntry::new(1, Weekday::Sunday);
      yoga.duration = "20:00".into();
      yoga.status = WorkoutStatus::Completed;

      Self {
        runs,
        cycles: default_cycling(Level::One),
        weights,
        yoga: vec![yoga],
        cold: vec![ColdExposureEntry {
          id: 1,
          date: NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
          duration: "3:00".into(),
          method: ColdMethod::IceBath,
          temperature: Some(6.5),
        }],
      }
    }

    fn source(&self) -> ExportSource<'_> {
      ExportSource {
        runs: &self.runs,
        cycles: &self.cycles,
        weights: &self.weights,
        yoga: &self.yoga,
        cold_exposure: &self.cold,
      }
    }
  }

  #[test]
  fn test_running_sheet() {
    let fixture = Fixture::new();
    let csv = sheet_to_string(Sheet::Running, 1, &fixture.source()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
      lines[0],
      "Week,Day,Run,Type,Intensity,Distance (km),Duration (MM:SS),Pace (min/km),RPE (1-5)"
    );
    assert_eq!(lines[1], "1,Monday,1,Steady,65-75% HR,3,21:00,7:00,3");
    assert_eq!(lines.len(), 4);
  }

  #[test]
  fn test_weights_sheet_includes_last_week() {
    let fixture = Fixture::new();
    let csv = sheet_to_string(Sheet::Weights, 2, &fixture.source()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with(",1,35,40,,,\"felt good, easy\""), "{}", lines[1]);

    let week_one = sheet_to_string(Sheet::Weights, 1, &fixture.source()).unwrap();
    assert!(week_one.lines().nth(1).unwrap().contains(",1,-,35,"));
  }

  #[test]
  fn test_cycling_yoga_and_cold_sheets() {
    let fixture = Fixture::new();

    let cycling = sheet_to_string(Sheet::Cycling, 2, &fixture.source()).unwrap();
    assert_eq!(cycling.lines().count(), 11);
    assert_eq!(cycling.lines().nth(1).unwrap(), "2,Friday,Warm-up,10:00,,,");

    let yoga = sheet_to_string(Sheet::Yoga, 1, &fixture.source()).unwrap();
    assert_eq!(yoga.lines().nth(1).unwrap(), "1,Sunday,20:00,completed");

    let cold = sheet_to_string(Sheet::ColdExposure, 5, &fixture.source()).unwrap();
    assert_eq!(cold.lines().nth(1).unwrap(), "2025-01-04,3:00,Ice Bath,6.5");
  }

  #[test]
  fn test_file_names() {
    assert_eq!(Sheet::Running.file_name(3), "running-week3-tracker.csv");
    assert_eq!(Sheet::ColdExposure.file_name(3), "cold-exposure-tracker.csv");
    assert_eq!("cold".parse::<Sheet>().unwrap(), Sheet::ColdExposure);
    assert!("golf".parse::<Sheet>().is_err());
  }

  #[test]
  fn test_export_to_dir() {
    let fixture = Fixture::new();
    let dir = tempfile::tempdir().unwrap();
    let path = export_to_dir(Sheet::Yoga, 1, &fixture.source(), &dir.path().join("out")).unwrap();
    assert!(path.ends_with("yoga-week1-tracker.csv"));
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.starts_with("Week,Day,Duration (MM:SS),Status"));
  }
}
