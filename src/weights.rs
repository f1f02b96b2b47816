//! Per-goal importance of each fatigue marker
//!
//! Weights are relative, not normalized: a weight of 1.5 means the marker
//! counts half again as much as a neutral marker for that goal.

use serde::{Deserialize, Serialize};

use crate::models::TrainingGoal;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerWeights {
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
}

impl MarkerWeights {
  /// Every marker counts the same
  pub const UNIFORM: MarkerWeights = MarkerWeights {
    rpe_increase: 1.0,
    strength_decrease: 1.0,
    soreness: 1.0,
    sleep_quality: 1.0,
    motivation: 1.0,
    resting_heart_rate: 1.0,
    mood_score: 1.0,
    stress_score: 1.0,
    appetite_changes: 1.0,
    technical_proficiency: 1.0,
  };

  // Performance drop and technique breakdown show neural fatigue first
  const STRENGTH: MarkerWeights = MarkerWeights {
    rpe_increase: 1.2,
    strength_decrease: 1.5,
    soreness: 0.8,
    sleep_quality: 1.0,
    motivation: 1.0,
    resting_heart_rate: 0.8,
    mood_score: 0.8,
    stress_score: 1.0,
    appetite_changes: 0.6,
    technical_proficiency: 1.5,
  };

  const POWER: MarkerWeights = MarkerWeights {
    rpe_increase: 1.3,
    strength_decrease: 1.5,
    soreness: 0.8,
    sleep_quality: 1.0,
    motivation: 1.1,
    resting_heart_rate: 0.8,
    mood_score: 0.8,
    stress_score: 1.0,
    appetite_changes: 0.5,
    technical_proficiency: 1.5,
  };

  // Local muscular damage and recovery inputs
  const HYPERTROPHY: MarkerWeights = MarkerWeights {
    rpe_increase: 1.0,
    strength_decrease: 1.0,
    soreness: 1.2,
    sleep_quality: 1.2,
    motivation: 1.0,
    resting_heart_rate: 0.8,
    mood_score: 0.8,
    stress_score: 1.0,
    appetite_changes: 1.0,
    technical_proficiency: 0.8,
  };

  // Cardiovascular strain shows up in resting HR
  const ENDURANCE: MarkerWeights = MarkerWeights {
    rpe_increase: 1.2,
    strength_decrease: 0.6,
    soreness: 1.0,
    sleep_quality: 1.2,
    motivation: 1.0,
    resting_heart_rate: 1.5,
    mood_score: 1.0,
    stress_score: 1.0,
    appetite_changes: 0.8,
    technical_proficiency: 0.6,
  };

  /// Weights for a training goal. Goals without a tuned row get uniform weights.
  pub fn for_goal(goal: TrainingGoal) -> MarkerWeights {
    match goal {
      TrainingGoal::Strength => Self::STRENGTH,
      TrainingGoal::Power => Self::POWER,
      TrainingGoal::Hypertrophy => Self::HYPERTROPHY,
      TrainingGoal::Endurance => Self::ENDURANCE,
      TrainingGoal::WeightLoss
      | TrainingGoal::BodyRecomposition
      | TrainingGoal::GeneralFitness
      | TrainingGoal::SportSpecific => Self::UNIFORM,
    }
  }

  /// Weights for a goal label coming from outside the engine.
  /// Unknown labels fall back to uniform weights rather than failing.
  pub fn for_label(label: &str) -> MarkerWeights {
    match label.parse::<TrainingGoal>() {
      Ok(goal) => Self::for_goal(goal),
      Err(_) => {
        tracing::debug!(goal = label, "unknown training goal, using uniform marker weights");
        Self::UNIFORM
      }
    }
  }

  /// (marker name, weight) pairs in a stable order
  pub fn entries(&self) -> [(&'static str, f64); 10] {
    [
      ("rpeIncrease", self.rpe_increase),
      ("strengthDecrease", self.strength_decrease),
      ("soreness", self.soreness),
      ("sleepQuality", self.sleep_quality),
      ("motivation", self.motivation),
      ("restingHeartRate", self.resting_heart_rate),
      ("moodScore", self.mood_score),
      ("stressScore", self.stress_score),
      ("appetiteChanges", self.appetite_changes),
      ("technicalProficiency", self.technical_proficiency),
    ]
  }
}
