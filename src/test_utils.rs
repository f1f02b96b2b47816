//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Helper assertions

use chrono::{Duration, NaiveDate};
use sqlx::SqlitePool;

use crate::models::{FatigueMarkers, NewFatigueRecord, RecommendedAction, TrainingGoal, TrainingLevel, TrainingResponse};
use crate::repository::{FatigueRepository, SqliteFatigueRepository};

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

/// Seed one record per day, newest first, ending on `newest`
/// Returns the IDs of created records
pub async fn seed_fatigue_history(
  repo: &SqliteFatigueRepository,
  user_id: &str,
  newest: NaiveDate,
  scores: &[f64],
) -> Vec<i64> {
  let mut ids = Vec::new();

  for (i, score) in scores.iter().enumerate() {
    let recorded_on = newest - Duration::days(i as i64);
    let record = mock_new_fatigue_record(user_id, recorded_on, *score);
    let saved = repo
      .save_fatigue_record(&record)
      .await
      .expect("Failed to seed fatigue record");
    ids.push(saved.id);
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// The reference hypertrophy snapshot (scores 5.104 for an intermediate athlete)
pub fn mock_markers() -> FatigueMarkers {
  FatigueMarkers {
    rpe_increase: 5.0,
    strength_decrease: 10.0,
    soreness: 6.0,
    sleep_quality: 4.0,
    motivation: 5.0,
    resting_heart_rate: 8.0,
    mood_score: 5.0,
    stress_score: 6.0,
    appetite_changes: 2.0,
    technical_proficiency: 5.0,
  }
}

/// An athlete adapting well to training
pub fn mock_training_response() -> TrainingResponse {
  TrainingResponse {
    strength_gain: 6.0,
    muscle_growth: 6.0,
    motivation: 8.0,
    technical_improvement: 6.0,
    recovery_speed: 7.0,
  }
}

/// Intermediate hypertrophy snapshot with the given score
pub fn mock_new_fatigue_record(user_id: &str, recorded_on: NaiveDate, fatigue_score: f64) -> NewFatigueRecord {
  NewFatigueRecord {
    user_id: user_id.to_string(),
    recorded_on,
    level: TrainingLevel::Intermediate,
    goal: TrainingGoal::Hypertrophy,
    markers: mock_markers(),
    fatigue_score,
    recovery_score: Some(6.0),
    recommended_action: Some(RecommendedAction::ReduceVolume),
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

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('fatigue_records', 'deload_weeks')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 2, "Expected 2 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_history_returns_correct_count() {
    let pool = setup_test_db().await;
    let repo = SqliteFatigueRepository::new(pool.clone());

    let newest = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let ids = seed_fatigue_history(&repo, "athlete-1", newest, &[8.0, 7.0, 6.0]).await;
    assert_eq!(ids.len(), 3);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fatigue_records")
      .fetch_one(&pool)
      .await
      .expect("Failed to count records");

    assert_eq!(count, 3);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let markers = mock_markers();
    assert_eq!(markers.clamped(), markers);

    let response = mock_training_response();
    assert_eq!(response.adaptation(), 6.0);
  }

  #[test]
  fn test_assert_approx_eq_macro() {
    assert_approx_eq!(1.0_f64, 1.0001_f64, 0.001);
    assert_approx_eq!(100.0_f64, 100.05_f64, 0.1);
  }

  #[test]
  #[should_panic(expected = "Values not approximately equal")]
  fn test_assert_approx_eq_macro_fails() {
    assert_approx_eq!(1.0_f64, 2.0_f64, 0.001);
  }
}
