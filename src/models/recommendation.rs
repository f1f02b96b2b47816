use serde::{Deserialize, Serialize};

/// Ordered training actions, from least to most conservative
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
  Proceed,
  ReduceVolume,
  ReduceIntensity,
  ActiveRecovery,
  Rest,
  Deload,
}

impl RecommendedAction {
  pub fn as_str(&self) -> &'static str {
    match self {
      RecommendedAction::Proceed => "proceed",
      RecommendedAction::ReduceVolume => "reduce_volume",
      RecommendedAction::ReduceIntensity => "reduce_intensity",
      RecommendedAction::ActiveRecovery => "active_recovery",
      RecommendedAction::Rest => "rest",
      RecommendedAction::Deload => "deload",
    }
  }
}

impl std::fmt::Display for RecommendedAction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadType {
  Volume,
  Intensity,
  Frequency,
  Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadTiming {
  Planned,
  Autoregulated,
}

/// A deload prescription.
///
/// Reductions are never negative and the deload always lasts at least
/// [`MIN_DELOAD_DAYS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeloadRecommendation {
  #[serde(rename = "type")]
  pub deload_type: DeloadType,

  /// Percent of normal training volume removed
  pub volume_reduction: f64,

  /// Percent of normal load removed
  pub intensity_reduction: f64,

  /// Sessions per week removed
  pub frequency_reduction: u32,

  /// Length of the deload in days
  pub duration: u32,

  pub timing: DeloadTiming,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub notes: Vec<String>,
}

pub const MIN_DELOAD_DAYS: u32 = 3;

impl DeloadRecommendation {
  /// Check the output invariant, returning the violated rule
  pub fn check_invariant(&self) -> Result<(), String> {
    if !self.volume_reduction.is_finite() || self.volume_reduction < 0.0 {
      return Err(format!("volume reduction must be >= 0, got {}", self.volume_reduction));
    }
    if !self.intensity_reduction.is_finite() || self.intensity_reduction < 0.0 {
      return Err(format!("intensity reduction must be >= 0, got {}", self.intensity_reduction));
    }
    if self.duration < MIN_DELOAD_DAYS {
      return Err(format!(
        "duration must be >= {} days, got {}",
        MIN_DELOAD_DAYS, self.duration
      ));
    }
    Ok(())
  }
}

/// Full output of the recommendation generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueManagementRecommendation {
  pub current_fatigue: f64,
  pub recovery_capacity: f64,

  /// Derived from recovery capacity (1-10, higher = better)
  pub sleep_quality: f64,

  /// Derived from the fatigue score (1-10, higher = worse)
  pub stress_level: f64,

  /// Estimated performance loss in percent (0-100)
  pub performance_decrement: f64,

  /// 1-10, higher = readier
  pub readiness_to_train: f64,

  pub recommended_action: RecommendedAction,

  /// Guidance for the athlete, in display order
  pub recommendations: Vec<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub deload_recommendation: Option<DeloadRecommendation>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strategy() -> DeloadRecommendation {
    DeloadRecommendation {
      deload_type: DeloadType::Volume,
      volume_reduction: 60.0,
      intensity_reduction: 10.0,
      frequency_reduction: 1,
      duration: 7,
      timing: DeloadTiming::Planned,
      notes: Vec::new(),
    }
  }

  #[test]
  fn test_actions_are_ordered_by_conservatism() {
    assert!(RecommendedAction::Proceed < RecommendedAction::ReduceVolume);
    assert!(RecommendedAction::Rest < RecommendedAction::Deload);
  }

  #[test]
  fn test_invariant_accepts_valid_strategy() {
    assert!(strategy().check_invariant().is_ok());
  }

  #[test]
  fn test_invariant_rejects_short_or_negative_strategy() {
    let short = DeloadRecommendation { duration: 2, ..strategy() };
    assert!(short.check_invariant().is_err());

    let negative = DeloadRecommendation { volume_reduction: -5.0, ..strategy() };
    assert!(negative.check_invariant().is_err());
  }

  #[test]
  fn test_deload_serializes_type_field() {
    let json = serde_json::to_value(strategy()).unwrap();
    assert_eq!(json["type"], "volume");
    assert_eq!(json["volumeReduction"], 60.0);
    assert_eq!(json["timing"], "planned");
    assert!(json.get("notes").is_none());
  }
}
