use chrono::NaiveDate;
use std::path::Path;

use super::{check_week, status_mark, today, ChartArg};
use crate::export::{export_to_dir, Sheet};
use crate::heart_rate::annotate_heart_rate;
use crate::models::{ActivityKind, Weekday};
use crate::program::{days_into_program, ProgramClock};
use crate::progress::Progress;
use crate::schedule::ScheduledActivity;
use crate::tracker::{ChartKind, Tracker};

/// Manual week used when no start date drives the clock
const DEFAULT_MANUAL_WEEK: u32 = 1;

fn clock(tracker: &Tracker, week: Option<u32>, date: Option<NaiveDate>) -> ProgramClock {
  tracker.clock(date.unwrap_or_else(today), week.unwrap_or(DEFAULT_MANUAL_WEEK))
}

/// One schedule line; collapsed workouts show only their kind and status
fn activity_line(tracker: &Tracker, activity: &ScheduledActivity) -> String {
  let mark = status_mark(activity.status);
  let kind = activity.kind.as_str();
  if tracker.collapsed.is_collapsed(&activity.activity) {
    return format!("{} {}", mark, kind);
  }
  let detail = match activity.kind {
    ActivityKind::Running => annotate_heart_rate(&activity.detail, tracker.settings.max_heart_rate()),
    _ => activity.detail.clone(),
  };
  let interval = if activity.is_interval { " [interval]" } else { "" };
  format!("{} {:<8} {}{}", mark, kind, detail, interval)
}

fn progress_line(label: &str, progress: &Progress) -> String {
  format!(
    "{}: {}/{} completed ({}%), {} skipped, {} not done",
    label, progress.completed, progress.total, progress.completion_rate, progress.skipped, progress.not_done
  )
}

/// ---------------------------------------------------------------------------
/// Schedule views
/// ---------------------------------------------------------------------------

pub async fn schedule(tracker: &mut Tracker, week: Option<u32>, date: Option<NaiveDate>) -> Result<String, String> {
  let level = tracker.level();
  let week = match week {
    Some(week) => check_week(level, week)?,
    None => clock(tracker, None, date).week(),
  };

  let schedule = tracker.schedule(week).await;
  let mut out = vec![format!("Level {}, week {} of {}", level, week, level.max_weeks())];
  if let Some(start) = tracker.program_start.date() {
    out[0].push_str(&format!(" (started {})", start));
  }
  for (day, activities) in &schedule {
    out.push(format!("{}:", day));
    for activity in activities {
      out.push(format!("  {}", activity_line(tracker, activity)));
    }
  }
  Ok(out.join("\n"))
}

pub async fn today_view(tracker: &mut Tracker, week: Option<u32>, date: Option<NaiveDate>) -> Result<String, String> {
  let clock = clock(tracker, week, date);
  if let (true, Some(start)) = (clock.is_waiting(), clock.start) {
    let days = -days_into_program(start, clock.today);
    return Ok(format!(
      "Program starts {} ({} day{} to go)",
      start,
      days,
      if days == 1 { "" } else { "s" }
    ));
  }

  let workouts = tracker.todays_workouts(&clock).await;
  let header = format!("Week {}, {}", clock.week(), clock.weekday());
  if workouts.is_empty() {
    return Ok(format!("{}: nothing scheduled", header));
  }
  let mut out = vec![header];
  out.extend(workouts.iter().map(|a| format!("  {}", activity_line(tracker, a))));
  Ok(out.join("\n"))
}

pub async fn next(tracker: &mut Tracker, week: Option<u32>, date: Option<NaiveDate>) -> Result<String, String> {
  let clock = clock(tracker, week, date);
  let Some(next) = tracker.next_workout(&clock).await else {
    return Ok("No workouts left in this program".into());
  };
  let when = match next.date {
    Some(date) => format!("week {} {} ({})", next.week, next.day, date.format("%b %-d")),
    None => format!("week {} {}", next.week, next.day),
  };
  Ok(format!("Next: {}\n  {}", when, activity_line(tracker, &next.activity)))
}

pub async fn progress(tracker: &mut Tracker, week: Option<u32>, date: Option<NaiveDate>) -> Result<String, String> {
  let level = tracker.level();
  let week = match week {
    Some(week) => check_week(level, week)?,
    None => clock(tracker, None, date).week(),
  };
  // Make sure rest-day yoga for the week is counted
  tracker.schedule(week).await;

  let overall = tracker.overall_progress();
  Ok(
    [
      progress_line(&format!("Week {}", week), &tracker.week_progress(week)),
      progress_line("Program", &overall.progress),
      format!("Latest active week: {}", overall.current_week),
    ]
    .join("\n"),
  )
}

/// ---------------------------------------------------------------------------
/// Charts and export
/// ---------------------------------------------------------------------------

pub fn chart(
  tracker: &Tracker,
  kind: ChartArg,
  exercise: Option<String>,
  day: Option<Weekday>,
) -> Result<String, String> {
  let kind = match kind {
    ChartArg::RunningDistance => ChartKind::RunningDistance,
    ChartArg::RunningPace => ChartKind::RunningPace,
    ChartArg::CyclingDistance => ChartKind::CyclingDistance,
    ChartArg::CyclingPace => ChartKind::CyclingPace,
    ChartArg::BodyWeight => ChartKind::BodyWeightTrend,
    ChartArg::BodyWeightWeekly => ChartKind::BodyWeightWeekly,
    ChartArg::Exercise => {
      let exercise = exercise.ok_or("--exercise is required for the exercise chart")?;
      let day = day.ok_or("--day is required for the exercise chart")?;
      ChartKind::Exercise { day, exercise }
    }
    ChartArg::ColdDuration => ChartKind::ColdExposureDuration,
    ChartArg::ColdMethods => ChartKind::ColdExposureMethods,
    ChartArg::Yoga => ChartKind::YogaDuration,
  };
  serde_json::to_string_pretty(&tracker.chart(&kind)).map_err(|e| format!("Failed to serialize chart: {}", e))
}

pub fn export(tracker: &Tracker, sheet: Sheet, week: Option<u32>, out: &Path) -> Result<String, String> {
  let week = match week {
    Some(week) => check_week(tracker.level(), week)?,
    None => clock(tracker, None, None).week(),
  };
  let path = export_to_dir(sheet, week, &tracker.export_source(), out)
    .map_err(|e| format!("Failed to export {}: {}", sheet, e))?;
  Ok(format!("Wrote {}", path.display()))
}
