//! Command-line front end
//!
//! Every subcommand is a thin async handler over [`Tracker`] returning the
//! text to print, or an error message.

pub mod journal;
pub mod settings;
pub mod views;
pub mod workouts;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::export::Sheet;
use crate::models::{ActivityRef, ColdMethod, Level, Weekday, WorkoutStatus};
use crate::time_format::{format_mmss, validate_mmss};
use crate::tracker::Tracker;

#[derive(Parser, Debug)]
#[command(
  name = "fitness-tracker",
  about = "Structured training program tracker",
  long_about = "Log runs, rides, lifts, yoga, cold exposure and body weight against an 8 or 10 week program."
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  /// Database file override
  #[arg(long, global = true)]
  pub db: Option<PathBuf>,

  /// Key namespace override
  #[arg(long, global = true)]
  pub namespace: Option<String>,

  /// Enable debug logging
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Show the week's schedule
  Schedule {
    /// Program week (defaults to the current week)
    #[arg(long)]
    week: Option<u32>,
    /// Pretend today is this date
    #[arg(long)]
    date: Option<NaiveDate>,
  },

  /// Show today's workouts
  Today {
    #[arg(long)]
    week: Option<u32>,
    #[arg(long)]
    date: Option<NaiveDate>,
  },

  /// Show the next scheduled workout after today
  Next {
    #[arg(long)]
    week: Option<u32>,
    #[arg(long)]
    date: Option<NaiveDate>,
  },

  /// Completion statistics for one week and the whole program
  Progress {
    #[arg(long)]
    week: Option<u32>,
    #[arg(long)]
    date: Option<NaiveDate>,
  },

  /// Running sessions
  Run {
    #[command(subcommand)]
    action: RunCommand,
  },

  /// Cycling sessions
  Cycle {
    #[command(subcommand)]
    action: CycleCommand,
  },

  /// Weight training
  Weights {
    #[command(subcommand)]
    action: WeightsCommand,
  },

  /// Rest-day yoga
  Yoga {
    #[command(subcommand)]
    action: YogaCommand,
  },

  /// Cold exposure journal
  Cold {
    #[command(subcommand)]
    action: ColdCommand,
  },

  /// Body weight log
  WeightLog {
    #[command(subcommand)]
    action: WeightLogCommand,
  },

  /// Show or switch the active level
  Level { level: Option<Level> },

  /// Show, set or clear the program start date
  StartDate {
    date: Option<NaiveDate>,
    #[arg(long, conflicts_with = "date")]
    clear: bool,
  },

  /// Show, set or clear the max heart rate (100-250 bpm)
  MaxHr {
    bpm: Option<u16>,
    #[arg(long, conflicts_with = "bpm")]
    clear: bool,
  },

  /// Fold or unfold a workout in the schedule
  Collapse {
    #[command(subcommand)]
    action: CollapseCommand,
  },

  /// Print chart data as JSON
  Chart {
    kind: ChartArg,
    /// Exercise name (exercise chart only)
    #[arg(long, required_if_eq("kind", "exercise"))]
    exercise: Option<String>,
    /// Workout day (exercise chart only)
    #[arg(long, required_if_eq("kind", "exercise"))]
    day: Option<Weekday>,
  },

  /// Write a sheet as CSV
  Export {
    sheet: Sheet,
    #[arg(long)]
    week: Option<u32>,
    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,
  },
}

#[derive(Subcommand, Debug)]
pub enum RunCommand {
  /// List the week's runs
  List { week: u32 },
  /// Record run details; an empty value clears a field
  Set {
    week: u32,
    day: Weekday,
    run: u8,
    #[arg(long)]
    distance: Option<String>,
    #[arg(long)]
    duration: Option<String>,
    #[arg(long)]
    rpe: Option<String>,
    #[arg(long)]
    intensity: Option<String>,
    #[arg(long)]
    structure: Option<String>,
    #[arg(long)]
    rounds: Option<u32>,
    #[arg(long)]
    rest: Option<String>,
  },
  /// Cycle the run's status
  Toggle { week: u32, day: Weekday, run: u8 },
}

#[derive(Subcommand, Debug)]
pub enum CycleCommand {
  List { week: u32 },
  /// Record a segment; an empty value clears a field
  Set {
    week: u32,
    segment: String,
    #[arg(long)]
    duration: Option<String>,
    #[arg(long)]
    distance: Option<String>,
    #[arg(long)]
    rpe: Option<String>,
  },
  /// Cycle the week's cycling status
  Toggle { week: u32 },
}

#[derive(Subcommand, Debug)]
pub enum WeightsCommand {
  List { week: u32 },
  /// Set how many sets an exercise has (0-10)
  Sets {
    week: u32,
    day: Weekday,
    exercise: String,
    count: u32,
  },
  /// Record one set
  Set {
    week: u32,
    day: Weekday,
    exercise: String,
    set: u32,
    #[arg(long)]
    weight: Option<String>,
    #[arg(long)]
    reps: Option<String>,
    #[arg(long)]
    rpe: Option<String>,
    #[arg(long)]
    notes: Option<String>,
  },
  /// Cycle the next-week recommendation: drop, stay, increase, none
  Recommend {
    week: u32,
    day: Weekday,
    exercise: String,
  },
  /// Cycle a workout's status
  Toggle {
    week: u32,
    day: Weekday,
    workout: String,
  },
}

#[derive(Subcommand, Debug)]
pub enum YogaCommand {
  List { week: u32 },
  Set { week: u32, day: Weekday, duration: String },
  Toggle { week: u32, day: Weekday },
}

#[derive(Subcommand, Debug)]
pub enum ColdCommand {
  List,
  Add {
    duration: String,
    #[arg(long, default_value = "shower")]
    method: ColdMethod,
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Water temperature in °C
    #[arg(long)]
    temperature: Option<f64>,
  },
  Update {
    id: i64,
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    duration: Option<String>,
    #[arg(long)]
    method: Option<ColdMethod>,
    /// Temperature in °C; an empty value clears it
    #[arg(long)]
    temperature: Option<String>,
  },
  Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum WeightLogCommand {
  List,
  Add {
    week: u32,
    weight: f64,
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  Update {
    id: i64,
    #[arg(long)]
    week: Option<u32>,
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  Delete { id: i64 },
  /// Show, set or clear the target weight
  Target {
    weight: Option<f64>,
    #[arg(long, conflicts_with = "weight")]
    clear: bool,
  },
}

#[derive(Subcommand, Debug)]
pub enum CollapseCommand {
  Toggle(ActivityArgs),
  Set {
    #[command(flatten)]
    activity: ActivityArgs,
    #[arg(long, action = clap::ArgAction::Set)]
    collapsed: bool,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
  Running,
  Cycling,
  Weights,
  Yoga,
}

/// Names one workout occurrence on the command line
#[derive(Args, Debug)]
pub struct ActivityArgs {
  pub kind: KindArg,
  pub week: u32,
  pub day: Weekday,
  /// Run number (running only)
  #[arg(long)]
  pub run: Option<u8>,
  /// Workout name (weights only)
  #[arg(long)]
  pub workout: Option<String>,
}

impl ActivityArgs {
  pub fn to_ref(&self) -> Result<ActivityRef, String> {
    let (week, day) = (self.week, self.day);
    match self.kind {
      KindArg::Running => {
        let run = self.run.ok_or("--run is required for running")?;
        Ok(ActivityRef::Running { week, day, run })
      }
      KindArg::Cycling => Ok(ActivityRef::Cycling { week, day }),
      KindArg::Weights => {
        let workout_name = self.workout.clone().ok_or("--workout is required for weights")?;
        Ok(ActivityRef::Weights {
          week,
          day,
          workout_name,
        })
      }
      KindArg::Yoga => Ok(ActivityRef::Yoga { week, day }),
    }
  }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartArg {
  RunningDistance,
  RunningPace,
  CyclingDistance,
  CyclingPace,
  BodyWeight,
  BodyWeightWeekly,
  Exercise,
  ColdDuration,
  ColdMethods,
  Yoga,
}

/// ---------------------------------------------------------------------------
/// Shared helpers
/// ---------------------------------------------------------------------------

pub(crate) fn today() -> NaiveDate {
  Local::now().date_naive()
}

pub(crate) fn status_mark(status: WorkoutStatus) -> &'static str {
  match status {
    WorkoutStatus::NotDone => "[ ]",
    WorkoutStatus::Completed => "[x]",
    WorkoutStatus::Skipped => "[-]",
  }
}

/// Empty text clears the value
pub(crate) fn parse_opt_f64(text: &str, what: &str) -> Result<Option<f64>, String> {
  let text = text.trim();
  if text.is_empty() {
    return Ok(None);
  }
  text
    .parse::<f64>()
    .ok()
    .filter(|v| v.is_finite() && *v >= 0.0)
    .map(Some)
    .ok_or_else(|| format!("Invalid {}: {}", what, text))
}

pub(crate) fn parse_opt_u8(text: &str, what: &str) -> Result<Option<u8>, String> {
  let text = text.trim();
  if text.is_empty() {
    return Ok(None);
  }
  text
    .parse::<u8>()
    .map(Some)
    .map_err(|_| format!("Invalid {}: {}", what, text))
}

/// Bare digits are read as typed `MMSS`, so `2530` becomes `25:30`
pub(crate) fn checked_duration(text: &str) -> Result<String, String> {
  let trimmed = text.trim();
  let candidate = if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
    format_mmss(trimmed)
  } else {
    trimmed.to_string()
  };
  if validate_mmss(&candidate) {
    Ok(candidate)
  } else {
    Err(format!("Invalid duration {:?}: use MM:SS", text))
  }
}

pub(crate) fn check_week(level: Level, week: u32) -> Result<u32, String> {
  if (1..=level.max_weeks()).contains(&week) {
    Ok(week)
  } else {
    Err(format!("Week must be between 1 and {} for level {}", level.max_weeks(), level))
  }
}

/// Route a parsed command to its handler
pub async fn execute(tracker: &mut Tracker, command: Command) -> Result<String, String> {
  match command {
    Command::Schedule { week, date } => views::schedule(tracker, week, date).await,
    Command::Today { week, date } => views::today_view(tracker, week, date).await,
    Command::Next { week, date } => views::next(tracker, week, date).await,
    Command::Progress { week, date } => views::progress(tracker, week, date).await,
    Command::Chart { kind, exercise, day } => views::chart(tracker, kind, exercise, day),
    Command::Export { sheet, week, out } => views::export(tracker, sheet, week, &out),
    Command::Run { action } => workouts::run(tracker, action).await,
    Command::Cycle { action } => workouts::cycle(tracker, action).await,
    Command::Weights { action } => workouts::weights(tracker, action).await,
    Command::Yoga { action } => workouts::yoga(tracker, action).await,
    Command::Collapse { action } => workouts::collapse(tracker, action).await,
    Command::Cold { action } => journal::cold(tracker, action).await,
    Command::WeightLog { action } => journal::weight_log(tracker, action).await,
    Command::Level { level } => settings::level(tracker, level).await,
    Command::StartDate { date, clear } => settings::start_date(tracker, date, clear).await,
    Command::MaxHr { bpm, clear } => settings::max_hr(tracker, bpm, clear).await,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cli_parses_nested_commands() {
    let cli = Cli::try_parse_from(["fitness-tracker", "run", "set", "2", "wed", "2", "--duration", "25:30"]).unwrap();
    match cli.command {
      Command::Run {
        action: RunCommand::Set {
          week, day, run, duration, ..
        },
      } => {
        assert_eq!((week, day, run), (2, Weekday::Wednesday, 2));
        assert_eq!(duration.as_deref(), Some("25:30"));
      }
      other => panic!("unexpected {:?}", other),
    }

    let cli = Cli::try_parse_from(["fitness-tracker", "--db", "/tmp/t.db", "level", "2"]).unwrap();
    assert!(matches!(cli.command, Command::Level { level: Some(Level::Two) }));
    assert_eq!(cli.db, Some(PathBuf::from("/tmp/t.db")));
  }

  #[test]
  fn test_cli_rejects_conflicts() {
    assert!(Cli::try_parse_from(["fitness-tracker", "max-hr", "180", "--clear"]).is_err());
    assert!(Cli::try_parse_from(["fitness-tracker", "chart", "exercise"]).is_err());
    assert!(Cli::try_parse_from(["fitness-tracker", "level", "3"]).is_err());
  }

  #[test]
  fn test_activity_args() {
    let args = ActivityArgs {
      kind: KindArg::Running,
      week: 1,
      day: Weekday::Monday,
      run: None,
      workout: None,
    };
    assert!(args.to_ref().is_err());

    let args = ActivityArgs {
      kind: KindArg::Weights,
      week: 1,
      day: Weekday::Monday,
      run: None,
      workout: Some("Chest & Triceps".into()),
    };
    assert_eq!(args.to_ref().unwrap().collapse_key(), "weights-1-Monday-Chest & Triceps");
  }

  #[test]
  fn test_optional_number_parsing() {
    assert_eq!(parse_opt_f64("", "distance"), Ok(None));
    assert_eq!(parse_opt_f64(" 5.5 ", "distance"), Ok(Some(5.5)));
    assert!(parse_opt_f64("far", "distance").is_err());
    assert!(parse_opt_f64("-1", "distance").is_err());
    assert_eq!(parse_opt_u8("3", "rpe"), Ok(Some(3)));
    assert!(parse_opt_u8("300", "rpe").is_err());
  }

  #[test]
  fn test_checked_duration_formats_bare_digits() {
    assert_eq!(checked_duration("2530"), Ok("25:30".to_string()));
    assert_eq!(checked_duration(" 10500 "), Ok("105:00".to_string()));
    assert_eq!(checked_duration("25"), Ok("25".to_string()));
    assert_eq!(checked_duration("24:30"), Ok("24:30".to_string()));
    assert_eq!(checked_duration(""), Ok(String::new()));
    assert!(checked_duration("24:99").is_err());
    assert!(checked_duration("inf").is_err());
    assert!(checked_duration("12345678").is_err());
  }
}
