//! Full fatigue assessment pipeline
//!
//! [`FatigueEngine`] chains scoring, band classification and (when a training
//! response is available) the deload-need detector. The two deload decisions
//! are reported side by side; neither overrides the other.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, EngineSettings, FatigueAlgorithmConfig};
use crate::deload::{evaluate_deload_need, DeloadNeed};
use crate::models::{
  DeloadTiming, DeloadWeek, FatigueManagementRecommendation, FatigueMarkers, FatigueRecord, NewDeloadWeek,
  NewFatigueRecord, TrainingGoal, TrainingLevel, TrainingResponse,
};
use crate::recommendation::recommend;
use crate::repository::{FatigueRepository, RepositoryError};
use crate::scoring::calculate_fatigue_score;
use crate::tables::EngineTables;
use crate::trend::FatigueTrend;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
  pub markers: FatigueMarkers,
  pub level: TrainingLevel,
  pub goal: TrainingGoal,

  /// 1-10, higher = better recovered
  pub recovery_score: f64,

  /// Enables the deload-need detector when present
  #[serde(default)]
  pub training_response: Option<TrainingResponse>,

  #[serde(default)]
  pub consecutive_high_fatigue_days: u32,

  /// Per-athlete config; the engine default applies when absent
  #[serde(default)]
  pub config: Option<FatigueAlgorithmConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueAssessment {
  pub fatigue_score: f64,
  pub recommendation: FatigueManagementRecommendation,

  /// Detector outcome, only when a training response was supplied
  #[serde(skip_serializing_if = "Option::is_none")]
  pub deload_need: Option<DeloadNeed>,
}

/// What [`FatigueEngine::assess_and_record`] stored
#[derive(Debug, Clone)]
pub struct RecordedAssessment {
  pub assessment: FatigueAssessment,
  pub record: FatigueRecord,

  /// Set when a deload was prescribed and none was already running
  pub deload_week: Option<DeloadWeek>,
}

#[derive(Debug, Clone)]
pub struct FatigueEngine {
  tables: EngineTables,
  config: FatigueAlgorithmConfig,
}

impl Default for FatigueEngine {
  fn default() -> Self {
    Self {
      tables: EngineTables::builtin().clone(),
      config: FatigueAlgorithmConfig::default(),
    }
  }
}

impl FatigueEngine {
  pub fn new(tables: EngineTables, config: FatigueAlgorithmConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self { tables, config })
  }

  /// Engine with the configured tables and algorithm defaults
  pub fn from_settings(settings: &EngineSettings) -> Result<Self, ConfigError> {
    Self::new(settings.load_tables()?, settings.algorithm.clone())
  }

  pub fn tables(&self) -> &EngineTables {
    &self.tables
  }

  pub fn config(&self) -> &FatigueAlgorithmConfig {
    &self.config
  }

  /// Score, classify and (optionally) run the deload detector
  pub fn assess(&self, input: &AssessmentInput) -> FatigueAssessment {
    let config = input.config.as_ref().unwrap_or(&self.config);

    let fatigue_score = calculate_fatigue_score(
      &input.markers,
      input.level,
      input.goal,
      Some(config.individual_tolerance),
    );

    let mut recommendation = recommend(
      &self.tables,
      fatigue_score,
      input.recovery_score,
      input.level,
      input.goal,
    );
    if config.autoregulation_enabled {
      if let Some(deload) = recommendation.deload_recommendation.as_mut() {
        deload.timing = DeloadTiming::Autoregulated;
      }
    }

    let deload_need = input.training_response.as_ref().map(|response| {
      evaluate_deload_need(
        fatigue_score,
        input.recovery_score,
        response,
        config,
        input.consecutive_high_fatigue_days,
      )
    });

    if let Some(need) = &deload_need {
      let band_deload = recommendation.deload_recommendation.is_some();
      if need.needed != band_deload {
        tracing::debug!(
          action = %recommendation.recommended_action,
          detector = need.needed,
          "band classification and deload detector disagree"
        );
      }
    }

    FatigueAssessment {
      fatigue_score,
      recommendation,
      deload_need,
    }
  }

  /// Trend over the athlete's last `window` records, against their threshold cell
  pub async fn load_trend<R>(
    &self,
    repo: &R,
    user_id: &str,
    level: TrainingLevel,
    goal: TrainingGoal,
    window: u32,
  ) -> Result<FatigueTrend, RepositoryError>
  where
    R: FatigueRepository + ?Sized,
  {
    let records = repo.list_recent_fatigue_records(user_id, window).await?;
    Ok(FatigueTrend::compute(&records, self.tables.threshold(level, goal)))
  }

  /// Assess, then persist the snapshot and any newly prescribed deload.
  /// Storage errors are returned as-is; nothing is retried. The two inserts
  /// are separate statements, so a failed deload insert leaves the snapshot stored.
  pub async fn assess_and_record<R>(
    &self,
    repo: &R,
    user_id: &str,
    recorded_on: NaiveDate,
    input: &AssessmentInput,
  ) -> Result<RecordedAssessment, RepositoryError>
  where
    R: FatigueRepository + ?Sized,
  {
    let assessment = self.assess(input);

    // Look up any running deload before the first write
    let new_deload = match &assessment.recommendation.deload_recommendation {
      Some(strategy) => match repo.get_active_deload_week(user_id, recorded_on).await? {
        Some(active) => {
          tracing::debug!(user_id, deload_id = active.id, "deload already in progress");
          None
        }
        None => Some(NewDeloadWeek::from_recommendation(
          user_id,
          recorded_on,
          assessment.fatigue_score,
          strategy.clone(),
        )),
      },
      None => None,
    };

    // Store the markers that were actually scored
    let record = repo
      .save_fatigue_record(&NewFatigueRecord {
        user_id: user_id.to_string(),
        recorded_on,
        level: input.level,
        goal: input.goal,
        markers: input.markers.clamped(),
        fatigue_score: assessment.fatigue_score,
        recovery_score: Some(input.recovery_score).filter(|r| r.is_finite()),
        recommended_action: Some(assessment.recommendation.recommended_action),
      })
      .await?;

    let deload_week = match new_deload {
      Some(week) => Some(repo.save_deload_week(&week).await?),
      None => None,
    };

    Ok(RecordedAssessment {
      assessment,
      record,
      deload_week,
    })
  }
}
