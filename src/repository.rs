//! Fatigue history storage
//!
//! The scoring core never touches storage. Callers persist snapshots and
//! prescribed deloads through [`FatigueRepository`] after a computation
//! has finished.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{DeloadWeek, FatigueRecord, NewDeloadWeek, NewFatigueRecord};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait FatigueRepository: Send + Sync {
  /// Persist one marker snapshot and its derived score
  async fn save_fatigue_record(&self, record: &NewFatigueRecord) -> Result<FatigueRecord, RepositoryError>;

  /// Most recent snapshot for the athlete, if any
  async fn get_latest_fatigue_record(&self, user_id: &str) -> Result<Option<FatigueRecord>, RepositoryError>;

  /// Up to `limit` snapshots, newest first
  async fn list_recent_fatigue_records(
    &self,
    user_id: &str,
    limit: u32,
  ) -> Result<Vec<FatigueRecord>, RepositoryError>;

  async fn save_deload_week(&self, deload: &NewDeloadWeek) -> Result<DeloadWeek, RepositoryError>;

  /// Deload covering `on`, preferring the latest one to start
  async fn get_active_deload_week(
    &self,
    user_id: &str,
    on: NaiveDate,
  ) -> Result<Option<DeloadWeek>, RepositoryError>;
}

/// ---------------------------------------------------------------------------
/// SQLite
/// ---------------------------------------------------------------------------

const FATIGUE_RECORD_COLUMNS: &str = r#"
  id, user_id, recorded_on, training_level, training_goal,
  rpe_increase, strength_decrease, soreness, sleep_quality, motivation,
  resting_heart_rate, mood_score, stress_score, appetite_changes, technical_proficiency,
  fatigue_score, recovery_score, recommended_action, created_at
"#;

const DELOAD_WEEK_COLUMNS: &str = "id, user_id, start_date, end_date, fatigue_score, strategy_json, created_at";

#[derive(Debug, Clone)]
pub struct SqliteFatigueRepository {
  pool: SqlitePool,
}

impl SqliteFatigueRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }

  async fn fatigue_record_by_id(&self, id: i64) -> Result<FatigueRecord, RepositoryError> {
    let record = sqlx::query_as::<_, FatigueRecord>(&format!(
      "SELECT {} FROM fatigue_records WHERE id = ?",
      FATIGUE_RECORD_COLUMNS
    ))
    .bind(id)
    .fetch_one(&self.pool)
    .await?;
    Ok(record)
  }

  async fn deload_week_by_id(&self, id: i64) -> Result<DeloadWeek, RepositoryError> {
    let week = sqlx::query_as::<_, DeloadWeek>(&format!(
      "SELECT {} FROM deload_weeks WHERE id = ?",
      DELOAD_WEEK_COLUMNS
    ))
    .bind(id)
    .fetch_one(&self.pool)
    .await?;
    Ok(week)
  }
}

#[async_trait]
impl FatigueRepository for SqliteFatigueRepository {
  async fn save_fatigue_record(&self, record: &NewFatigueRecord) -> Result<FatigueRecord, RepositoryError> {
    let m = &record.markers;
    let result = sqlx::query(
      r#"
      INSERT INTO fatigue_records (
        user_id, recorded_on, training_level, training_goal,
        rpe_increase, strength_decrease, soreness, sleep_quality, motivation,
        resting_heart_rate, mood_score, stress_score, appetite_changes, technical_proficiency,
        fatigue_score, recovery_score, recommended_action
      )
      VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
      "#,
    )
    .bind(&record.user_id)
    .bind(record.recorded_on)
    .bind(record.level.as_str())
    .bind(record.goal.as_str())
    .bind(m.rpe_increase)
    .bind(m.strength_decrease)
    .bind(m.soreness)
    .bind(m.sleep_quality)
    .bind(m.motivation)
    .bind(m.resting_heart_rate)
    .bind(m.mood_score)
    .bind(m.stress_score)
    .bind(m.appetite_changes)
    .bind(m.technical_proficiency)
    .bind(record.fatigue_score)
    .bind(record.recovery_score)
    .bind(record.recommended_action.map(|a| a.as_str()))
    .execute(&self.pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, user_id = %record.user_id, score = record.fatigue_score, "saved fatigue record");

    self.fatigue_record_by_id(id).await
  }

  async fn get_latest_fatigue_record(&self, user_id: &str) -> Result<Option<FatigueRecord>, RepositoryError> {
    let record = sqlx::query_as::<_, FatigueRecord>(&format!(
      "SELECT {} FROM fatigue_records WHERE user_id = ? ORDER BY recorded_on DESC, id DESC LIMIT 1",
      FATIGUE_RECORD_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    tracing::debug!(user_id, found = record.is_some(), "loaded latest fatigue record");
    Ok(record)
  }

  async fn list_recent_fatigue_records(
    &self,
    user_id: &str,
    limit: u32,
  ) -> Result<Vec<FatigueRecord>, RepositoryError> {
    let records = sqlx::query_as::<_, FatigueRecord>(&format!(
      "SELECT {} FROM fatigue_records WHERE user_id = ? ORDER BY recorded_on DESC, id DESC LIMIT ?",
      FATIGUE_RECORD_COLUMNS
    ))
    .bind(user_id)
    .bind(i64::from(limit))
    .fetch_all(&self.pool)
    .await?;

    tracing::debug!(user_id, count = records.len(), "loaded recent fatigue records");
    Ok(records)
  }

  async fn save_deload_week(&self, deload: &NewDeloadWeek) -> Result<DeloadWeek, RepositoryError> {
    let strategy_json = serde_json::to_string(&deload.strategy)?;

    let result = sqlx::query(
      r#"
      INSERT INTO deload_weeks (user_id, start_date, end_date, fatigue_score, strategy_json)
      VALUES (?, ?, ?, ?, ?)
      "#,
    )
    .bind(&deload.user_id)
    .bind(deload.start_date)
    .bind(deload.end_date)
    .bind(deload.fatigue_score)
    .bind(&strategy_json)
    .execute(&self.pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(
      id,
      user_id = %deload.user_id,
      start = %deload.start_date,
      end = %deload.end_date,
      "saved deload week"
    );

    self.deload_week_by_id(id).await
  }

  async fn get_active_deload_week(
    &self,
    user_id: &str,
    on: NaiveDate,
  ) -> Result<Option<DeloadWeek>, RepositoryError> {
    let week = sqlx::query_as::<_, DeloadWeek>(&format!(
      r#"
      SELECT {} FROM deload_weeks
      WHERE user_id = ? AND start_date <= ? AND end_date >= ?
      ORDER BY start_date DESC, id DESC
      LIMIT 1
      "#,
      DELOAD_WEEK_COLUMNS
    ))
    .bind(user_id)
    .bind(on)
    .bind(on)
    .fetch_optional(&self.pool)
    .await?;

    tracing::debug!(user_id, on = %on, found = week.is_some(), "loaded active deload week");
    Ok(week)
  }
}
