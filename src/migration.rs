//! Normalization and migration of stored collections
//!
//! There is no schema version in the stored documents. Each rule detects its
//! own obsolete shape, rewrites it, and reports whether it changed anything, so
//! the pipelines are idempotent and a collection is written back only once.

use tracing::info;

use crate::models::{Level, RunSession, TimedRecord, Weekday, WeightExercise};
use crate::plan::{interval_prescription, INTERVAL_RUN_FROM_WEEK};
use crate::store::{Entity, Store, StoreError};
use crate::time_format::{decimal_to_mmss, is_decimal_minutes, normalize_duration_input};

/// Colon-less running paces above this are km/h, not min/km
pub const RUNNING_PACE_KMH_THRESHOLD: f64 = 10.0;
/// Same heuristic for cycling, where real min/km paces are lower
pub const CYCLING_PACE_KMH_THRESHOLD: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Migrated<T> {
  pub data: T,
  pub changed: bool,
}

impl<T> Migrated<T> {
  pub fn new(data: T, changed: bool) -> Self {
    Self { data, changed }
  }

  pub fn unchanged(data: T) -> Self {
    Self::new(data, false)
  }

  /// Run the next rule, keeping the accumulated `changed` flag
  pub fn then<F>(self, rule: F) -> Migrated<T>
  where
    F: FnOnce(T) -> Migrated<T>,
  {
    let next = rule(self.data);
    Migrated {
      data: next.data,
      changed: self.changed || next.changed,
    }
  }
}

/// Apply `f` to every record; `f` returns whether it modified the record
fn rewrite_each<R, F>(mut records: Vec<R>, mut f: F) -> Migrated<Vec<R>>
where
  F: FnMut(&mut R) -> bool,
{
  let mut changed = false;
  for record in records.iter_mut() {
    changed |= f(record);
  }
  Migrated::new(records, changed)
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Interval runs saved before the structure fields existed get the level's
/// prescription back
pub fn backfill_interval_structure(runs: Vec<RunSession>, level: Level) -> Migrated<Vec<RunSession>> {
  let prescription = interval_prescription(level);
  rewrite_each(runs, |run| {
    if !run.is_interval()
      || !run.interval_structure.is_empty()
      || run.week < INTERVAL_RUN_FROM_WEEK
      || run.run != 2
    {
      return false;
    }
    run.interval_structure = prescription.structure.to_string();
    run.interval_rounds = prescription.rounds;
    run.rest_time = prescription.rest_time.to_string();
    true
  })
}

/// `numSets` follows the sets actually stored; logged sets are never dropped
pub fn reconcile_set_counts(exercises: Vec<WeightExercise>) -> Migrated<Vec<WeightExercise>> {
  rewrite_each(exercises, |exercise| {
    let stored = exercise.sets.len() as u32;
    if exercise.num_sets == stored {
      return false;
    }
    exercise.num_sets = stored;
    true
  })
}

// ---------------------------------------------------------------------------
// Migrations
// ---------------------------------------------------------------------------

/// Level 1 used to run on Sunday/Tuesday/Thursday
pub fn reassign_level_one_weekdays(runs: Vec<RunSession>, level: Level) -> Migrated<Vec<RunSession>> {
  if level != Level::One {
    return Migrated::unchanged(runs);
  }
  rewrite_each(runs, |run| {
    if !matches!(run.day, Weekday::Sunday | Weekday::Tuesday | Weekday::Thursday) {
      return false;
    }
    let day = match run.run {
      1 => Weekday::Monday,
      2 => Weekday::Wednesday,
      3 => Weekday::Saturday,
      _ => return false,
    };
    run.day = day;
    true
  })
}

/// Decimal-minute durations become `M:SS`
pub fn migrate_durations<R: TimedRecord>(records: Vec<R>) -> Migrated<Vec<R>> {
  rewrite_each(records, |record| {
    let duration = record.duration_mut();
    if !is_decimal_minutes(duration.trim()) {
      return false;
    }
    let converted = normalize_duration_input(duration);
    if converted == *duration {
      return false;
    }
    *duration = converted;
    true
  })
}

/// Colon-less paces: above `kmh_threshold` they are speeds and get inverted,
/// otherwise they are decimal min/km and only get reformatted
pub fn migrate_pace_units<R: TimedRecord>(records: Vec<R>, kmh_threshold: f64) -> Migrated<Vec<R>> {
  rewrite_each(records, |record| {
    let Some(pace) = record.pace_mut() else {
      return false;
    };
    if pace.is_empty() || pace.contains(':') {
      return false;
    }
    let converted = match pace.trim().parse::<f64>() {
      Ok(value) if value.is_finite() && value > kmh_threshold => decimal_to_mmss(60.0 / value),
      Ok(value) if value.is_finite() && value > 0.0 => decimal_to_mmss(value),
      _ => String::new(),
    };
    if converted == *pace {
      return false;
    }
    *pace = converted;
    true
  })
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

pub fn migrate_running(runs: Vec<RunSession>, level: Level) -> Migrated<Vec<RunSession>> {
  Migrated::unchanged(runs)
    .then(|r| backfill_interval_structure(r, level))
    .then(|r| reassign_level_one_weekdays(r, level))
    .then(migrate_durations)
    .then(|r| migrate_pace_units(r, RUNNING_PACE_KMH_THRESHOLD))
}

pub fn migrate_cycling<R: TimedRecord>(segments: Vec<R>) -> Migrated<Vec<R>> {
  Migrated::unchanged(segments)
    .then(migrate_durations)
    .then(|s| migrate_pace_units(s, CYCLING_PACE_KMH_THRESHOLD))
}

pub fn migrate_weights(exercises: Vec<WeightExercise>) -> Migrated<Vec<WeightExercise>> {
  Migrated::unchanged(exercises).then(reconcile_set_counts)
}

pub fn migrate_yoga<R: TimedRecord>(entries: Vec<R>) -> Migrated<Vec<R>> {
  Migrated::unchanged(entries).then(migrate_durations)
}

/// Copy the unscoped start date into both level keys when neither level has
/// one yet, then drop the old key. Returns whether anything moved.
pub async fn migrate_legacy_start_date(store: &Store) -> Result<bool, StoreError> {
  let legacy_key = store.legacy_start_date_key();
  let Some(legacy) = store.get(&legacy_key).await? else {
    return Ok(false);
  };

  let level_one = store.level_key(Entity::ProgramStartDate, Level::One);
  let level_two = store.level_key(Entity::ProgramStartDate, Level::Two);
  if store.get(&level_one).await?.is_some() || store.get(&level_two).await?.is_some() {
    return Ok(false);
  }

  store.set(&level_one, &legacy).await?;
  store.set(&level_two, &legacy).await?;
  store.remove(&legacy_key).await?;
  info!("Migrated program start date to level-specific keys");
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{CycleSegment, RunType, SetEntry, YogaEntry};
  use crate::plan::{default_cycling, default_running, default_weights};
  use crate::test_utils::{mock_run, seed_raw_value, setup_test_db, teardown_test_db};

  #[test]
  fn test_weekday_migration_scenario() {
    let mut run = mock_run(3, Weekday::Tuesday, 2);
    run.distance = Some(4.0);
    run.rpe = Some(3);

    let migrated = reassign_level_one_weekdays(vec![run.clone()], Level::One);
    assert!(migrated.changed);
    let expected = RunSession {
      day: Weekday::Wednesday,
      ..run
    };
    assert_eq!(migrated.data, vec![expected]);
  }

  #[test]
  fn test_weekday_migration_ignores_level_two() {
    let runs = vec![mock_run(1, Weekday::Sunday, 1)];
    let migrated = reassign_level_one_weekdays(runs.clone(), Level::Two);
    assert!(!migrated.changed);
    assert_eq!(migrated.data, runs);
  }

  #[test]
  fn test_pace_unit_migration_scenario() {
    let mut segment = CycleSegment::new(1, Weekday::Friday, "Steady Cycle", 40);
    segment.pace = "25".to_string();

    let migrated = migrate_pace_units(vec![segment], CYCLING_PACE_KMH_THRESHOLD);
    assert!(migrated.changed);
    assert_eq!(migrated.data[0].pace, "2:24");
  }

  #[test]
  fn test_pace_thresholds_differ_by_sport() {
    let mut run = mock_run(1, Weekday::Monday, 1);
    run.pace = "12".to_string();
    let migrated = migrate_pace_units(vec![run.clone()], RUNNING_PACE_KMH_THRESHOLD);
    assert_eq!(migrated.data[0].pace, "5:00");

    let mut segment = CycleSegment::new(1, Weekday::Friday, "Steady Cycle", 40);
    segment.pace = "12".to_string();
    let migrated = migrate_pace_units(vec![segment], CYCLING_PACE_KMH_THRESHOLD);
    assert_eq!(migrated.data[0].pace, "12:00");

    run.pace = "6.5".to_string();
    let migrated = migrate_pace_units(vec![run], RUNNING_PACE_KMH_THRESHOLD);
    assert_eq!(migrated.data[0].pace, "6:30");
  }

  #[test]
  fn test_duration_migration() {
    let mut run = mock_run(1, Weekday::Monday, 1);
    run.duration = "21.5".to_string();
    let mut yoga = YogaEntry::new(1, Weekday::Sunday);
    yoga.duration = "15".to_string();

    let runs = migrate_durations(vec![run]);
    assert!(runs.changed);
    assert_eq!(runs.data[0].duration, "21:30");

    let yoga = migrate_durations(vec![yoga]);
    assert_eq!(yoga.data[0].duration, "15:00");

    let untouched = migrate_durations(runs.data);
    assert!(!untouched.changed);
  }

  #[test]
  fn test_duration_migration_skips_non_decimal_text() {
    let mut run = mock_run(1, Weekday::Monday, 1);
    run.duration = "inf".to_string();
    let migrated = migrate_durations(vec![run]);
    assert!(!migrated.changed);
    assert_eq!(migrated.data[0].duration, "inf");
  }

  #[test]
  fn test_backfill_interval_structure() {
    let mut run = mock_run(7, Weekday::Wednesday, 2);
    run.run_type = RunType::Interval;

    let migrated = backfill_interval_structure(vec![run], Level::Two);
    assert!(migrated.changed);
    assert_eq!(migrated.data[0].interval_rounds, 4);
    assert!(migrated.data[0].interval_structure.starts_with("1KM Easy"));
  }

  #[test]
  fn test_reconcile_set_counts_keeps_logged_sets() {
    let mut exercise = default_weights(Level::One).remove(0);
    exercise.sets = vec![SetEntry::empty(1), SetEntry::empty(2)];
    exercise.num_sets = 0;

    let migrated = reconcile_set_counts(vec![exercise]);
    assert!(migrated.changed);
    assert_eq!(migrated.data[0].num_sets, 2);
    assert_eq!(migrated.data[0].sets.len(), 2);
  }

  #[test]
  fn test_pipelines_are_idempotent() {
    let mut runs = default_running(Level::One);
    runs[0].day = Weekday::Sunday;
    runs[0].duration = "30.25".to_string();
    runs[0].pace = "11".to_string();
    runs[16].interval_structure.clear();

    let once = migrate_running(runs, Level::One);
    assert!(once.changed);
    let twice = migrate_running(once.data.clone(), Level::One);
    assert!(!twice.changed);
    assert_eq!(twice.data, once.data);

    let mut segments = default_cycling(Level::Two);
    segments[0].pace = "30".to_string();
    let once = migrate_cycling(segments);
    let twice = migrate_cycling(once.data.clone());
    assert!(!twice.changed);
    assert_eq!(twice.data, once.data);
  }

  #[test]
  fn test_fresh_defaults_need_no_migration() {
    for level in [Level::One, Level::Two] {
      assert!(!migrate_running(default_running(level), level).changed);
      assert!(!migrate_cycling(default_cycling(level)).changed);
      assert!(!migrate_weights(default_weights(level)).changed);
    }
  }

  #[tokio::test]
  async fn test_legacy_start_date_moves_to_both_levels() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "ft");
    seed_raw_value(&store, "ft_programStartDate", "2025-01-06T00:00:00.000Z").await;

    assert!(migrate_legacy_start_date(&store).await.unwrap());
    assert_eq!(
      store.get("ft_programStartDate_level1").await.unwrap().as_deref(),
      Some("2025-01-06T00:00:00.000Z")
    );
    assert!(store.get("ft_programStartDate_level2").await.unwrap().is_some());
    assert_eq!(store.get("ft_programStartDate").await.unwrap(), None);

    assert!(!migrate_legacy_start_date(&store).await.unwrap());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_legacy_start_date_kept_when_a_level_already_has_one() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "ft");
    seed_raw_value(&store, "ft_programStartDate", "2025-01-06").await;
    seed_raw_value(&store, "ft_programStartDate_level2", "2025-02-03").await;

    assert!(!migrate_legacy_start_date(&store).await.unwrap());
    assert_eq!(store.get("ft_programStartDate_level1").await.unwrap(), None);
    assert!(store.get("ft_programStartDate").await.unwrap().is_some());

    teardown_test_db(pool).await;
  }
}
