//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock record factories
//! - Helper assertions

use sqlx::SqlitePool;

use crate::models::{RunSession, RunType, Weekday, WorkoutStatus};
use crate::store::Store;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Write a raw value under a namespaced key, as an older build would have
pub async fn seed_raw_value(store: &Store, key: &str, value: &str) {
  store.set(key, value).await.expect("Failed to seed kv_store");
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// A steady 5km run with nothing logged yet
pub fn mock_run(week: u32, day: Weekday, run: u8) -> RunSession {
  RunSession {
    week,
    day,
    run,
    run_type: RunType::Steady,
    intensity: "65-75% HR".to_string(),
    distance: Some(5.0),
    duration: String::new(),
    pace: String::new(),
    rpe: None,
    interval_structure: String::new(),
    interval_rounds: 0,
    rest_time: String::new(),
    status: WorkoutStatus::NotDone,
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('kv_store') ORDER BY cid")
      .fetch_all(&pool)
      .await
      .expect("Failed to query columns");
    let names: Vec<&str> = columns.iter().map(|(n,)| n.as_str()).collect();
    assert_eq!(names, vec!["key", "value", "updated_at"]);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_raw_value_is_readable() {
    let pool = setup_test_db().await;
    let store = Store::new(pool.clone(), "t");

    seed_raw_value(&store, "t_startDate", "1736121600000").await;
    assert_eq!(store.get("t_startDate").await.unwrap().as_deref(), Some("1736121600000"));

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_run_is_untouched() {
    let run = mock_run(2, Weekday::Wednesday, 2);
    assert_eq!(run.summary(), "Run 2: 5km Steady (65-75% HR)");
    assert_eq!(run.status, WorkoutStatus::NotDone);
  }
}
