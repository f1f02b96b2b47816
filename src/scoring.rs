//! Fatigue scoring
//!
//! Aggregates the ten weighted markers into one scalar, then scales it by
//! training level and individual tolerance. Higher always means more fatigued.
//! The result is not clamped; it is read against the threshold tables.

use crate::config::TOLERANCE_RANGE;
use crate::models::{FatigueMarkers, TrainingGoal, TrainingLevel};
use crate::weights::MarkerWeights;

/// Raw weighted sums are divided by this before level scaling
const NORMALIZATION: f64 = 10.0;

/// "Goodness" markers are inverted against this ceiling
const SUBJECTIVE_CEILING: f64 = 10.0;

/// Resting HR delta lives on a much wider scale than the 1-10 markers
const HEART_RATE_SCALE: f64 = 10.0;

pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Weighted marker sum before normalization and scaling
pub fn weighted_marker_load(markers: &FatigueMarkers, weights: &MarkerWeights) -> f64 {
  let m = markers.clamped();

  // Fatigue-direct markers
  let direct = m.rpe_increase * weights.rpe_increase
    + m.strength_decrease * weights.strength_decrease
    + m.soreness * weights.soreness
    + m.stress_score * weights.stress_score;

  // Higher is better, so invert before weighting
  let inverted = (SUBJECTIVE_CEILING - m.sleep_quality) * weights.sleep_quality
    + (SUBJECTIVE_CEILING - m.motivation) * weights.motivation
    + (SUBJECTIVE_CEILING - m.mood_score) * weights.mood_score
    + (SUBJECTIVE_CEILING - m.technical_proficiency) * weights.technical_proficiency;

  // Resting HR below baseline adds no fatigue
  let heart_rate = m.resting_heart_rate.max(0.0) * weights.resting_heart_rate / HEART_RATE_SCALE;

  // Direction-agnostic: gaining or losing appetite both signal fatigue
  let appetite = m.appetite_changes.abs() * weights.appetite_changes;

  direct + inverted + heart_rate + appetite
}

/// Fatigue score for one marker snapshot.
///
/// `individual_tolerance` defaults to 1.0 and is held to 0.5-1.5.
pub fn calculate_fatigue_score(
  markers: &FatigueMarkers,
  level: TrainingLevel,
  goal: TrainingGoal,
  individual_tolerance: Option<f64>,
) -> f64 {
  let weights = MarkerWeights::for_goal(goal);
  let normalized = weighted_marker_load(markers, &weights) / NORMALIZATION;
  let tolerance = effective_tolerance(individual_tolerance);

  let score = normalized * level.fatigue_multiplier() * tolerance;

  tracing::debug!(
    level = %level,
    goal = %goal,
    normalized,
    tolerance,
    score,
    "computed fatigue score"
  );

  score
}

fn effective_tolerance(individual_tolerance: Option<f64>) -> f64 {
  let (min, max) = TOLERANCE_RANGE;
  match individual_tolerance {
    None => DEFAULT_TOLERANCE,
    Some(t) if !t.is_finite() => {
      tracing::warn!("non-finite individual tolerance, using default");
      DEFAULT_TOLERANCE
    }
    Some(t) if t < min || t > max => {
      tracing::warn!(tolerance = t, min, max, "individual tolerance out of range, clamping");
      t.clamp(min, max)
    }
    Some(t) => t,
  }
}
