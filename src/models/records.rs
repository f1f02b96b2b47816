use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::markers::{FatigueMarkers, TrainingGoal, TrainingLevel};
use super::recommendation::{DeloadRecommendation, RecommendedAction};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FatigueRecord {
  pub id: i64,
  pub user_id: String,
  pub recorded_on: NaiveDate,
  pub training_level: String,
  pub training_goal: String,
  pub rpe_increase: f64,
  pub strength_decrease: f64,
  pub soreness: f64,
  pub sleep_quality: f64,
  pub motivation: f64,
  pub resting_heart_rate: f64,
  pub mood_score: f64,
  pub stress_score: f64,
  pub appetite_changes: f64,
  pub technical_proficiency: f64,
  pub fatigue_score: f64,
  pub recovery_score: Option<f64>,
  pub recommended_action: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

impl FatigueRecord {
  pub fn markers(&self) -> FatigueMarkers {
    FatigueMarkers {
      rpe_increase: self.rpe_increase,
      strength_decrease: self.strength_decrease,
      soreness: self.soreness,
      sleep_quality: self.sleep_quality,
      motivation: self.motivation,
      resting_heart_rate: self.resting_heart_rate,
      mood_score: self.mood_score,
      stress_score: self.stress_score,
      appetite_changes: self.appetite_changes,
      technical_proficiency: self.technical_proficiency,
    }
  }

  pub fn level(&self) -> Result<TrainingLevel, String> {
    self.training_level.parse()
  }

  pub fn goal(&self) -> Result<TrainingGoal, String> {
    self.training_goal.parse()
  }
}

/// For inserting new fatigue records (without id, created_at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFatigueRecord {
  pub user_id: String,
  pub recorded_on: NaiveDate,
  pub level: TrainingLevel,
  pub goal: TrainingGoal,
  pub markers: FatigueMarkers,
  pub fatigue_score: f64,
  pub recovery_score: Option<f64>,
  pub recommended_action: Option<RecommendedAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeloadWeek {
  pub id: i64,
  pub user_id: String,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub fatigue_score: f64,
  pub strategy_json: String,
  pub created_at: Option<DateTime<Utc>>,
}

impl DeloadWeek {
  pub fn strategy(&self) -> Result<DeloadRecommendation, serde_json::Error> {
    serde_json::from_str(&self.strategy_json)
  }

  pub fn is_active_on(&self, date: NaiveDate) -> bool {
    self.start_date <= date && date <= self.end_date
  }
}

/// For inserting new deload weeks (without id, created_at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeloadWeek {
  pub user_id: String,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub fatigue_score: f64,
  pub strategy: DeloadRecommendation,
}

impl NewDeloadWeek {
  /// Schedule a prescribed deload starting on `start_date`, inclusive of both ends
  pub fn from_recommendation(
    user_id: &str,
    start_date: NaiveDate,
    fatigue_score: f64,
    strategy: DeloadRecommendation,
  ) -> Self {
    let span = i64::from(strategy.duration.max(1)) - 1;
    Self {
      user_id: user_id.to_string(),
      start_date,
      end_date: start_date + Duration::days(span),
      fatigue_score,
      strategy,
    }
  }
}
