use chrono::NaiveDate;

use crate::models::Level;
use crate::state::settings::{MAX_HEART_RATE, MIN_HEART_RATE};
use crate::tracker::Tracker;

pub async fn level(tracker: &mut Tracker, level: Option<Level>) -> Result<String, String> {
  if let Some(level) = level {
    tracker.switch_level(level).await;
  }
  let level = tracker.level();
  Ok(format!(
    "Level {} ({} weeks, cycling on {})",
    level,
    level.max_weeks(),
    level.cycling_day()
  ))
}

pub async fn start_date(tracker: &mut Tracker, date: Option<NaiveDate>, clear: bool) -> Result<String, String> {
  if clear {
    tracker.program_start.set(None).await;
    return Ok("Program start date cleared".into());
  }
  if let Some(date) = date {
    tracker.program_start.set(Some(date)).await;
  }
  Ok(match tracker.program_start.date() {
    Some(date) => format!("Level {} program starts {}", tracker.level(), date.format("%a %Y-%m-%d")),
    None => "No program start date set".into(),
  })
}

pub async fn max_hr(tracker: &mut Tracker, bpm: Option<u16>, clear: bool) -> Result<String, String> {
  if clear {
    tracker
      .settings
      .set_max_heart_rate(None)
      .await
      .map_err(|e| format!("Failed to clear max heart rate: {}", e))?;
    return Ok("Max heart rate cleared".into());
  }
  if let Some(bpm) = bpm {
    tracker
      .settings
      .set_max_heart_rate(Some(bpm))
      .await
      .map_err(|e| format!("Failed to set max heart rate: {}", e))?;
  }
  Ok(match tracker.settings.max_heart_rate() {
    Some(bpm) => format!("Max heart rate {} bpm", bpm),
    None => format!(
      "No max heart rate set ({}-{} bpm enables heart rate targets)",
      MIN_HEART_RATE, MAX_HEART_RATE
    ),
  })
}
