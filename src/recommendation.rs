//! Band-based training recommendations
//!
//! The fatigue score is read against the threshold for the athlete's
//! (level, goal) cell and falls into one of six bands, each mapped to an
//! action and a short list of guidance for the athlete.

use crate::deload::personalize_deload;
use crate::models::{FatigueManagementRecommendation, RecommendedAction, TrainingGoal, TrainingLevel};
use crate::tables::EngineTables;

/// Upper bounds (as a fraction of threshold) for every band but the last.
/// A score below the bound falls into that band.
const BAND_LIMITS: [(f64, RecommendedAction); 5] = [
  (0.6, RecommendedAction::Proceed),
  (0.8, RecommendedAction::ReduceVolume),
  (1.0, RecommendedAction::ReduceIntensity),
  (1.2, RecommendedAction::ActiveRecovery),
  (1.4, RecommendedAction::Rest),
];

/// Subjective 1-10 scale used for the derived fields
const SCALE_MIN: f64 = 1.0;
const SCALE_MAX: f64 = 10.0;

/// Action for a fatigue score against a threshold.
/// A non-finite score carries no signal and maps to `Proceed`.
pub fn classify(fatigue_score: f64, threshold: f64) -> RecommendedAction {
  if !fatigue_score.is_finite() {
    return RecommendedAction::Proceed;
  }
  BAND_LIMITS
    .iter()
    .find(|(limit, _)| fatigue_score < threshold * limit)
    .map(|(_, action)| *action)
    .unwrap_or(RecommendedAction::Deload)
}

/// Fixed guidance shown with each action
pub fn guidance(action: RecommendedAction) -> &'static [&'static str] {
  match action {
    RecommendedAction::Proceed => &[
      "Proceed with the planned session",
      "Fatigue is well controlled, progression can continue",
    ],
    RecommendedAction::ReduceVolume => &[
      "Reduce training volume by 20-30%, keep intensity, favor compound movements",
      "Drop accessory work before main lifts",
      "Prioritize sleep over the next few days",
    ],
    RecommendedAction::ReduceIntensity => &[
      "Reduce working loads by 10-15% and stop sets further from failure",
      "Keep session volume but avoid max-effort attempts",
      "Add an extra recovery day if soreness persists",
    ],
    RecommendedAction::ActiveRecovery => &[
      "Replace today's session with light active recovery (walking, mobility, easy cardio)",
      "Keep effort conversational and under 45 minutes",
    ],
    RecommendedAction::Rest => &[
      "Take a full rest day",
      "Focus on sleep, nutrition and hydration",
      "Reassess fatigue before the next session",
    ],
    RecommendedAction::Deload => &[
      "Start a deload period following the prescribed strategy",
      "Accumulated fatigue is above what normal recovery days can clear",
      "Resume normal training only after markers return to baseline",
    ],
  }
}

/// Recommendation for a fatigue/recovery pair using the given tables
pub fn recommend(
  tables: &EngineTables,
  fatigue_score: f64,
  recovery_score: f64,
  level: TrainingLevel,
  goal: TrainingGoal,
) -> FatigueManagementRecommendation {
  let fatigue_score = if fatigue_score.is_finite() {
    fatigue_score
  } else {
    tracing::warn!(fatigue_score, "non-finite fatigue score, treating as no fatigue");
    0.0
  };
  let threshold = tables.threshold(level, goal);
  let action = classify(fatigue_score, threshold);

  let deload_recommendation = if action == RecommendedAction::Deload {
    tracing::info!(
      fatigue_score,
      threshold,
      level = %level,
      goal = %goal,
      "fatigue in deload band"
    );
    Some(personalize_deload(
      tables,
      fatigue_score,
      recovery_score,
      level,
      goal,
      tables.base_strategy(level, goal),
    ))
  } else {
    tracing::debug!(fatigue_score, threshold, action = %action, "classified fatigue");
    None
  };

  FatigueManagementRecommendation {
    current_fatigue: fatigue_score,
    recovery_capacity: recovery_score,
    sleep_quality: to_scale(recovery_score),
    stress_level: to_scale(fatigue_score),
    performance_decrement: (fatigue_score * 10.0).clamp(0.0, 100.0),
    readiness_to_train: (SCALE_MAX - fatigue_score).max(SCALE_MIN),
    recommended_action: action,
    recommendations: guidance(action).iter().map(|s| s.to_string()).collect(),
    deload_recommendation,
  }
}

/// Recommendation using the built-in threshold and strategy tables
pub fn generate_fatigue_management_recommendations(
  fatigue_score: f64,
  recovery_score: f64,
  level: TrainingLevel,
  goal: TrainingGoal,
) -> FatigueManagementRecommendation {
  recommend(EngineTables::builtin(), fatigue_score, recovery_score, level, goal)
}

fn to_scale(value: f64) -> f64 {
  if value.is_finite() {
    value.clamp(SCALE_MIN, SCALE_MAX)
  } else {
    SCALE_MIN
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_worked_scenario_reduces_volume() {
    let rec = generate_fatigue_management_recommendations(
      5.104,
      6.0,
      TrainingLevel::Intermediate,
      TrainingGoal::Hypertrophy,
    );
    assert_eq!(rec.recommended_action, RecommendedAction::ReduceVolume);
    assert!(rec.recommendations[0].starts_with("Reduce training volume by 20-30%"));
    assert!(rec.deload_recommendation.is_none());
    assert!((rec.performance_decrement - 51.04).abs() < 1e-9);
    assert!((rec.readiness_to_train - 4.896).abs() < 1e-9);
  }

  #[test]
  fn test_aggravated_scenario_prescribes_deload() {
    let rec = generate_fatigue_management_recommendations(
      10.0,
      5.0,
      TrainingLevel::Intermediate,
      TrainingGoal::Hypertrophy,
    );
    assert_eq!(rec.recommended_action, RecommendedAction::Deload);

    let deload = rec.deload_recommendation.expect("deload band embeds a strategy");
    assert!(deload.volume_reduction >= 70.0);
    assert_eq!(rec.performance_decrement, 100.0);
    assert_eq!(rec.readiness_to_train, 1.0);
  }

  #[test]
  fn test_band_edges_belong_to_the_higher_band() {
    assert_eq!(classify(4.2, 7.0), RecommendedAction::ReduceVolume);
    assert_eq!(classify(7.0, 7.0), RecommendedAction::ActiveRecovery);
    assert_eq!(classify(9.8, 7.0), RecommendedAction::Deload);
    assert_eq!(classify(0.0, 7.0), RecommendedAction::Proceed);
  }

  #[test]
  fn test_sweep_visits_every_band_in_order() {
    for level in TrainingLevel::ALL {
      for goal in TrainingGoal::ALL {
        let threshold = EngineTables::builtin().threshold(level, goal);
        let steps = 400;
        let mut seen: Vec<RecommendedAction> = Vec::new();
        for i in 0..=steps {
          let score = 2.0 * threshold * i as f64 / steps as f64;
          let action = classify(score, threshold);
          if seen.last() != Some(&action) {
            seen.push(action);
          }
        }
        assert_eq!(
          seen,
          vec![
            RecommendedAction::Proceed,
            RecommendedAction::ReduceVolume,
            RecommendedAction::ReduceIntensity,
            RecommendedAction::ActiveRecovery,
            RecommendedAction::Rest,
            RecommendedAction::Deload,
          ],
          "{} / {}",
          level,
          goal
        );
      }
    }
  }

  #[test]
  fn test_every_band_has_guidance() {
    for (_, action) in BAND_LIMITS {
      let lines = guidance(action);
      assert!((2..=3).contains(&lines.len()), "{}", action);
    }
    assert!((2..=3).contains(&guidance(RecommendedAction::Deload).len()));
  }

  #[test]
  fn test_derived_fields_stay_on_scale() {
    let rec = generate_fatigue_management_recommendations(
      0.5,
      12.0,
      TrainingLevel::Beginner,
      TrainingGoal::GeneralFitness,
    );
    assert_eq!(rec.sleep_quality, 10.0);
    assert_eq!(rec.stress_level, 1.0);
    assert_eq!(rec.recommended_action, RecommendedAction::Proceed);
  }

  #[test]
  fn test_non_finite_score_proceeds() {
    assert_eq!(classify(f64::NAN, 7.0), RecommendedAction::Proceed);
    assert_eq!(classify(f64::INFINITY, 7.0), RecommendedAction::Proceed);

    let rec = generate_fatigue_management_recommendations(
      f64::NAN,
      6.0,
      TrainingLevel::Intermediate,
      TrainingGoal::Hypertrophy,
    );
    assert_eq!(rec.recommended_action, RecommendedAction::Proceed);
    assert!(rec.deload_recommendation.is_none());
    assert_eq!(rec.current_fatigue, 0.0);
    assert_eq!(rec.performance_decrement, 0.0);
    assert_eq!(rec.readiness_to_train, 10.0);
  }
}
