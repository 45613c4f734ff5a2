//! Chart-ready series
//!
//! Every chart is a list of labels plus one or more series whose points line
//! up with the labels. A `None` point is a gap, not a zero.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
  ColdExposureEntry, ColdMethod, CycleSegment, Level, RunSession, RunType, Weekday, WeightExercise,
  WeightLogEntry, YogaEntry,
};
use crate::time_format::mmss_to_decimal;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
  pub label: String,
  pub points: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
  pub labels: Vec<String>,
  pub series: Vec<Series>,
}

impl Series {
  fn new(label: &str, points: Vec<Option<f64>>) -> Self {
    Self {
      label: label.to_string(),
      points,
    }
  }

  fn flat(label: &str, value: f64, len: usize) -> Self {
    Self::new(label, vec![Some(value); len])
  }
}

fn week_labels(level: Level) -> Vec<String> {
  (1..=level.max_weeks()).map(|w| format!("Week {}", w)).collect()
}

fn per_week<F>(level: Level, point: F) -> Vec<Option<f64>>
where
  F: FnMut(u32) -> Option<f64>,
{
  (1..=level.max_weeks()).map(point).collect()
}

fn minutes(text: &str) -> Option<f64> {
  mmss_to_decimal(text).filter(|m| m.is_finite())
}

fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    None
  } else {
    Some(values.iter().sum::<f64>() / values.len() as f64)
  }
}

const RUN_SLOTS: [u8; 3] = [1, 2, 3];

fn steady_run(runs: &[RunSession], week: u32, run: u8) -> Option<&RunSession> {
  runs
    .iter()
    .find(|r| r.week == week && r.run == run && r.run_type == RunType::Steady)
}

/// ---------------------------------------------------------------------------
/// Running
/// ---------------------------------------------------------------------------

/// Distance per run slot; interval sessions are left out
pub fn running_distance(runs: &[RunSession], level: Level) -> ChartData {
  let series = RUN_SLOTS
    .iter()
    .map(|&run| {
      let points = per_week(level, |week| {
        steady_run(runs, week, run)
          .and_then(|r| r.distance)
          .filter(|d| *d > 0.0)
      });
      Series::new(&format!("Run {}", run), points)
    })
    .collect();
  ChartData {
    labels: week_labels(level),
    series,
  }
}

/// Pace per run slot in decimal min/km
pub fn running_pace(runs: &[RunSession], level: Level) -> ChartData {
  let series = RUN_SLOTS
    .iter()
    .map(|&run| {
      let points = per_week(level, |week| steady_run(runs, week, run).and_then(|r| minutes(&r.pace)));
      Series::new(&format!("Run {}", run), points)
    })
    .collect();
  ChartData {
    labels: week_labels(level),
    series,
  }
}

/// ---------------------------------------------------------------------------
/// Cycling
/// ---------------------------------------------------------------------------

pub fn cycling_distance(segments: &[CycleSegment], level: Level) -> ChartData {
  let points = per_week(level, |week| {
    let total: f64 = segments
      .iter()
      .filter(|s| s.week == week)
      .filter_map(|s| s.distance)
      .sum();
    (total > 0.0).then_some(total)
  });
  ChartData {
    labels: week_labels(level),
    series: vec![Series::new("Cycling Distance (km)", points)],
  }
}

pub fn cycling_pace(segments: &[CycleSegment], level: Level) -> ChartData {
  let points = per_week(level, |week| {
    let paces: Vec<f64> = segments
      .iter()
      .filter(|s| s.week == week)
      .filter_map(|s| minutes(&s.pace))
      .collect();
    average(&paces)
  });
  ChartData {
    labels: week_labels(level),
    series: vec![Series::new("Average Pace (min/km)", points)],
  }
}

/// ---------------------------------------------------------------------------
/// Body weight
/// ---------------------------------------------------------------------------

const TARGET_LABEL: &str = "Target Weight";

/// Every logged entry in `(week, date)` order, with an optional flat target line
pub fn body_weight_trend(entries: &[WeightLogEntry], target: Option<f64>) -> ChartData {
  if entries.is_empty() {
    return ChartData::default();
  }
  let mut sorted = entries.to_vec();
  crate::models::journal::sort_weight_log(&mut sorted);

  let labels = sorted
    .iter()
    .map(|e| format!("Week {} ({})", e.week, e.date.format("%b %-d")))
    .collect();
  let mut series = vec![Series::new("Weight (kg)", sorted.iter().map(|e| e.weight).collect())];
  if let Some(target) = target {
    series.push(Series::flat(TARGET_LABEL, target, sorted.len()));
  }
  ChartData { labels, series }
}

pub fn body_weight_weekly(entries: &[WeightLogEntry], target: Option<f64>, level: Level) -> ChartData {
  let points = per_week(level, |week| {
    let weights: Vec<f64> = entries
      .iter()
      .filter(|e| e.week == week)
      .filter_map(|e| e.weight)
      .collect();
    average(&weights)
  });
  let mut series = vec![Series::new("Average Weight (kg)", points)];
  if let Some(target) = target {
    series.push(Series::flat(TARGET_LABEL, target, level.max_weeks() as usize));
  }
  ChartData {
    labels: week_labels(level),
    series,
  }
}

/// ---------------------------------------------------------------------------
/// Weight training
/// ---------------------------------------------------------------------------

/// Mean of the positive set weights of one exercise, week by week
pub fn exercise_weight(exercises: &[WeightExercise], exercise: &str, day: Weekday, level: Level) -> ChartData {
  let points = per_week(level, |week| {
    let logged = exercises.iter().find(|e| e.matches(week, day, exercise))?;
    let weights: Vec<f64> = logged
      .sets
      .iter()
      .filter_map(|s| s.weight.trim().parse::<f64>().ok())
      .filter(|w| w.is_finite() && *w > 0.0)
      .collect();
    average(&weights)
  });
  ChartData {
    labels: (1..=level.max_weeks()).map(|w| format!("W{}", w)).collect(),
    series: vec![Series::new("Average Weight (kg)", points)],
  }
}

/// ---------------------------------------------------------------------------
/// Cold exposure and yoga
/// ---------------------------------------------------------------------------

/// Total minutes per calendar day, oldest first
pub fn cold_exposure_duration(entries: &[ColdExposureEntry]) -> ChartData {
  let mut daily = BTreeMap::new();
  for entry in entries {
    if let Some(m) = minutes(&entry.duration) {
      *daily.entry(entry.date).or_insert(0.0) += m;
    }
  }
  if daily.is_empty() {
    return ChartData::default();
  }
  ChartData {
    labels: daily.keys().map(|d| d.format("%b %-d").to_string()).collect(),
    series: vec![Series::new("Duration (minutes)", daily.values().map(|v| Some(*v)).collect())],
  }
}

pub fn cold_exposure_methods(entries: &[ColdExposureEntry]) -> ChartData {
  if entries.is_empty() {
    return ChartData::default();
  }
  let counts = ColdMethod::ALL
    .iter()
    .map(|method| Some(entries.iter().filter(|e| e.method == *method).count() as f64))
    .collect();
  ChartData {
    labels: ColdMethod::ALL.iter().map(|m| m.label().to_string()).collect(),
    series: vec![Series::new("Number of Sessions", counts)],
  }
}

pub fn yoga_duration(entries: &[YogaEntry], level: Level) -> ChartData {
  if entries.is_empty() {
    return ChartData::default();
  }
  let points = per_week(level, |week| {
    let total: f64 = entries
      .iter()
      .filter(|y| y.week == week)
      .filter_map(|y| minutes(&y.duration))
      .sum();
    (total > 0.0).then_some(total)
  });
  ChartData {
    labels: week_labels(level),
    series: vec![Series::new("Total Duration (minutes)", points)],
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::models::{CycleField, RunField, SetField};
  use crate::plan::{default_cycling, default_running, default_weights};
  use chrono::NaiveDate;

  fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
  }

  #[test]
  fn test_running_series_skip_interval_runs() {
    let mut runs = default_running(Level::One);
    for run in runs.iter_mut().filter(|r| r.week == 1) {
      run.apply(RunField::Duration("30:00".into()));
    }

    let distance = running_distance(&runs, Level::One);
    assert_eq!(distance.labels.len(), 8);
    assert_eq!(distance.series[0].points[0], Some(3.0));
    // Run 2 turns into an interval session in week 6
    assert_eq!(distance.series[1].points[5], None);

    let pace = running_pace(&runs, Level::One);
    assert_approx_eq!(pace.series[0].points[0].unwrap(), 10.0, 0.01);
    assert_eq!(pace.series[0].points[1], None);
  }

  #[test]
  fn test_cycling_totals_and_average_pace() {
    let mut segments = default_cycling(Level::One);
    let week_two: Vec<_> = segments.iter_mut().filter(|s| s.week == 2).take(2).collect();
    for segment in week_two {
      segment.apply(CycleField::Distance(Some(4.0)));
    }

    let distance = cycling_distance(&segments, Level::One);
    assert_eq!(distance.series[0].points[0], None);
    assert_eq!(distance.series[0].points[1], Some(8.0));

    // Warm-up 10:00 over 4 km and Hard 1 4:00 over 4 km
    let pace = cycling_pace(&segments, Level::One);
    assert_approx_eq!(pace.series[0].points[1].unwrap(), (2.5 + 1.0) / 2.0, 0.01);
  }

  #[test]
  fn test_body_weight_charts() {
    let entries = vec![
      WeightLogEntry { id: 2, week: 2, weight: Some(80.0), date: date("2025-01-13") },
      WeightLogEntry { id: 1, week: 1, weight: Some(81.0), date: date("2025-01-06") },
      WeightLogEntry { id: 3, week: 2, weight: Some(79.0), date: date("2025-01-15") },
    ];

    let trend = body_weight_trend(&entries, Some(75.0));
    assert_eq!(trend.labels[0], "Week 1 (Jan 6)");
    assert_eq!(trend.series[0].points, vec![Some(81.0), Some(80.0), Some(79.0)]);
    assert_eq!(trend.series[1].points, vec![Some(75.0); 3]);

    let weekly = body_weight_weekly(&entries, None, Level::Two);
    assert_eq!(weekly.series.len(), 1);
    assert_eq!(weekly.series[0].points.len(), 10);
    assert_eq!(weekly.series[0].points[1], Some(79.5));
    assert_eq!(weekly.series[0].points[2], None);

    assert_eq!(body_weight_trend(&[], Some(75.0)), ChartData::default());
  }

  #[test]
  fn test_exercise_weight_ignores_blank_sets() {
    let mut exercises = default_weights(Level::One);
    let first = exercises.iter_mut().find(|e| e.week == 1 && e.day == Weekday::Monday).unwrap();
    let name = first.exercise.clone();
    first.resize_sets(3);
    first.update_set(1, SetField::Weight("20".into()));
    first.update_set(2, SetField::Weight("25".into()));

    let chart = exercise_weight(&exercises, &name, Weekday::Monday, Level::One);
    assert_eq!(chart.labels[0], "W1");
    assert_eq!(chart.series[0].points[0], Some(22.5));
    assert_eq!(chart.series[0].points[1], None);
  }

  #[test]
  fn test_cold_exposure_charts() {
    let entries = vec![
      ColdExposureEntry {
        id: 1,
        date: date("2025-01-04"),
        duration: "2:30".into(),
        method: ColdMethod::Shower,
        temperature: None,
      },
      ColdExposureEntry {
        id: 2,
        date: date("2025-01-04"),
        duration: "3:00".into(),
        method: ColdMethod::IceBath,
        temperature: Some(4.0),
      },
      ColdExposureEntry {
        id: 3,
        date: date("2025-01-02"),
        duration: "1:00".into(),
        method: ColdMethod::Shower,
        temperature: None,
      },
    ];

    let duration = cold_exposure_duration(&entries);
    assert_eq!(duration.labels, vec!["Jan 2", "Jan 4"]);
    assert_eq!(duration.series[0].points, vec![Some(1.0), Some(5.5)]);

    let methods = cold_exposure_methods(&entries);
    assert_eq!(methods.series[0].points, vec![Some(2.0), Some(1.0), Some(0.0)]);
  }

  #[test]
  fn test_yoga_weekly_total() {
    let mut sunday = YogaEntry::new(1, Weekday::Sunday);
    sunday.duration = "20:00".into();
    let mut tuesday = YogaEntry::new(1, Weekday::Tuesday);
    tuesday.duration = "15:30".into();

    let chart = yoga_duration(&[sunday, tuesday, YogaEntry::new(2, Weekday::Sunday)], Level::One);
    assert_eq!(chart.series[0].points[0], Some(35.5));
    assert_eq!(chart.series[0].points[1], None);
    assert!(yoga_duration(&[], Level::One).labels.is_empty());
  }
}
