//! Deload decisions
//!
//! Two independent pieces:
//! - the deload-need detector, which looks at recovery, adaptation and the
//!   high-fatigue streak rather than the fatigue score alone
//! - the strategy personalizer, which bends the base strategy for a
//!   (level, goal) cell toward how fatigued and how recovered the athlete is
//!
//! The detector and the band-based recommendation may disagree. Neither
//! overrides the other.

use serde::{Deserialize, Serialize};

use crate::config::FatigueAlgorithmConfig;
use crate::models::{DeloadRecommendation, TrainingGoal, TrainingLevel, TrainingResponse, MIN_DELOAD_DAYS};
use crate::tables::EngineTables;

// ---------------------------------------------------------------------------
/// Deload-Need Detection
// ---------------------------------------------------------------------------

/// High-fatigue days in a row that force a deload on their own
pub const PERSISTENT_FATIGUE_DAYS: u32 = 3;

/// Overtraining heuristic: low drive, stalled strength, fatigue near threshold
const OVERTRAINING_MOTIVATION: f64 = 5.0;
const OVERTRAINING_STRENGTH_GAIN: f64 = 3.0;
const OVERTRAINING_FATIGUE_FRACTION: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadTrigger {
    /// Fatigue net of recovery and adaptation is above the threshold
    CombinedScore,
    /// Too many consecutive high-fatigue days
    PersistentFatigue,
    /// Motivation and strength gain both collapsing while fatigue is high
    OvertrainingRisk,
}

/// Outcome of the detector with the signals that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadNeed {
    pub needed: bool,
    pub combined_score: f64,
    pub triggers: Vec<DeloadTrigger>,
}

/// Evaluate every deload trigger
pub fn evaluate_deload_need(
    fatigue_score: f64,
    recovery_score: f64,
    training_response: &TrainingResponse,
    config: &FatigueAlgorithmConfig,
    consecutive_high_fatigue_days: u32,
) -> DeloadNeed {
    let response = training_response.clamped();

    let combined_score = fatigue_score
        - recovery_score * config.recovery_weight
        - response.adaptation() * config.training_response_weight;

    let mut triggers = Vec::new();
    if combined_score > config.fatigue_threshold {
        triggers.push(DeloadTrigger::CombinedScore);
    }
    if consecutive_high_fatigue_days >= PERSISTENT_FATIGUE_DAYS {
        triggers.push(DeloadTrigger::PersistentFatigue);
    }
    if response.motivation < OVERTRAINING_MOTIVATION
        && response.strength_gain < OVERTRAINING_STRENGTH_GAIN
        && fatigue_score > config.fatigue_threshold * OVERTRAINING_FATIGUE_FRACTION
    {
        triggers.push(DeloadTrigger::OvertrainingRisk);
    }

    let needed = !triggers.is_empty();
    if needed {
        tracing::info!(
            fatigue_score,
            combined_score,
            consecutive_high_fatigue_days,
            triggers = ?triggers,
            "deload needed"
        );
    }

    DeloadNeed {
        needed,
        combined_score,
        triggers,
    }
}

/// True when any deload trigger fires
pub fn needs_deload(
    fatigue_score: f64,
    recovery_score: f64,
    training_response: &TrainingResponse,
    config: &FatigueAlgorithmConfig,
    consecutive_high_fatigue_days: u32,
) -> bool {
    evaluate_deload_need(
        fatigue_score,
        recovery_score,
        training_response,
        config,
        consecutive_high_fatigue_days,
    )
    .needed
}

// ---------------------------------------------------------------------------
/// Strategy Personalization
// ---------------------------------------------------------------------------

const AGGRESSIVE_FACTOR: f64 = 1.2;
const GENTLE_FACTOR: f64 = 0.8;
const POOR_RECOVERY: f64 = 4.0;
const GOOD_RECOVERY: f64 = 7.0;
const MAX_REDUCTION_PCT: f64 = 100.0;

pub const NOTE_AGGRESSIVE: &str = "fatiga muy alta — deload agresivo";
pub const NOTE_GENTLE: &str = "fatiga moderada — deload suave";
pub const NOTE_POOR_RECOVERY: &str = "recuperación deficiente — duración extendida";
pub const NOTE_GOOD_RECOVERY: &str = "buena recuperación — duración reducida";

/// Deltas accumulated against a base strategy, applied in one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeloadAdjustment {
    pub volume_delta: f64,
    pub intensity_delta: f64,
    pub frequency_delta: i64,
    pub duration_delta: i64,
    pub notes: Vec<String>,
}

impl DeloadAdjustment {
    /// Work out the adjustments for this fatigue/recovery pair
    pub fn for_state(fatigue_score: f64, recovery_score: f64, threshold: f64) -> Self {
        let mut adj = Self::default();

        if fatigue_score > threshold * AGGRESSIVE_FACTOR {
            adj.volume_delta += 10.0;
            adj.intensity_delta += 5.0;
            adj.frequency_delta += 1;
            adj.duration_delta += 2;
            adj.notes.push(NOTE_AGGRESSIVE.to_string());
        } else if fatigue_score < threshold * GENTLE_FACTOR {
            adj.volume_delta -= 10.0;
            adj.intensity_delta -= 5.0;
            adj.duration_delta -= 2;
            adj.notes.push(NOTE_GENTLE.to_string());
        }

        if recovery_score < POOR_RECOVERY {
            adj.duration_delta += 2;
            adj.volume_delta += 5.0;
            adj.notes.push(NOTE_POOR_RECOVERY.to_string());
        } else if recovery_score > GOOD_RECOVERY {
            adj.duration_delta -= 2;
            adj.notes.push(NOTE_GOOD_RECOVERY.to_string());
        }

        tracing::debug!(?adj, fatigue_score, recovery_score, threshold, "deload adjustment");
        adj
    }

    /// Produce a new strategy; the base is left untouched.
    /// Reductions are clamped to 0-100 and duration floored at the minimum.
    pub fn apply(&self, base: &DeloadRecommendation) -> DeloadRecommendation {
        let duration = (i64::from(base.duration) + self.duration_delta).max(i64::from(MIN_DELOAD_DAYS));
        let frequency = (i64::from(base.frequency_reduction) + self.frequency_delta).max(0);

        let mut notes = base.notes.clone();
        notes.extend(self.notes.iter().cloned());

        DeloadRecommendation {
            deload_type: base.deload_type,
            volume_reduction: clamp_pct(base.volume_reduction + self.volume_delta),
            intensity_reduction: clamp_pct(base.intensity_reduction + self.intensity_delta),
            frequency_reduction: u32::try_from(frequency).unwrap_or(u32::MAX),
            duration: u32::try_from(duration).unwrap_or(u32::MAX),
            timing: base.timing,
            notes,
        }
    }
}

fn clamp_pct(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_REDUCTION_PCT)
    } else {
        0.0
    }
}

/// Personalize a base strategy against the given tables' threshold
pub fn personalize_deload(
    tables: &EngineTables,
    fatigue_score: f64,
    recovery_score: f64,
    level: TrainingLevel,
    goal: TrainingGoal,
    base_strategy: &DeloadRecommendation,
) -> DeloadRecommendation {
    let threshold = tables.threshold(level, goal);
    let deload = DeloadAdjustment::for_state(fatigue_score, recovery_score, threshold).apply(base_strategy);

    tracing::info!(
        level = %level,
        goal = %goal,
        volume_reduction = deload.volume_reduction,
        intensity_reduction = deload.intensity_reduction,
        duration = deload.duration,
        "personalized deload"
    );
    deload
}

/// Personalize a base strategy using the built-in threshold table
pub fn generate_personalized_deload(
    fatigue_score: f64,
    recovery_score: f64,
    level: TrainingLevel,
    goal: TrainingGoal,
    base_strategy: &DeloadRecommendation,
) -> DeloadRecommendation {
    personalize_deload(
        EngineTables::builtin(),
        fatigue_score,
        recovery_score,
        level,
        goal,
        base_strategy,
    )
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeloadTiming, DeloadType};
    use proptest::prelude::*;

    fn response(strength_gain: f64, muscle_growth: f64, motivation: f64) -> TrainingResponse {
        TrainingResponse {
            strength_gain,
            muscle_growth,
            motivation,
            technical_improvement: 6.0,
            recovery_speed: 6.0,
        }
    }

    fn base() -> DeloadRecommendation {
        EngineTables::builtin()
            .base_strategy(TrainingLevel::Intermediate, TrainingGoal::Hypertrophy)
            .clone()
    }

    #[test]
    fn test_healthy_athlete_needs_no_deload() {
        let config = FatigueAlgorithmConfig::default();
        let need = evaluate_deload_need(5.0, 7.0, &response(6.0, 6.0, 8.0), &config, 0);
        // 5.0 - 2.1 - 1.2
        assert!((need.combined_score - 1.7).abs() < 1e-9);
        assert!(!need.needed);
        assert!(need.triggers.is_empty());
    }

    #[test]
    fn test_combined_score_above_threshold_triggers() {
        let config = FatigueAlgorithmConfig::default();
        // 10.0 - 0.3 - 0.2 = 9.5 > 7
        let need = evaluate_deload_need(10.0, 1.0, &response(1.0, 1.0, 8.0), &config, 0);
        assert!(need.needed);
        assert_eq!(need.triggers, vec![DeloadTrigger::CombinedScore]);
    }

    #[test]
    fn test_streak_overrides_acceptable_combined_score() {
        let config = FatigueAlgorithmConfig::default();
        let healthy = response(6.0, 6.0, 8.0);
        assert!(!needs_deload(5.0, 7.0, &healthy, &config, 2));
        assert!(needs_deload(5.0, 7.0, &healthy, &config, 3));
    }

    #[test]
    fn test_overtraining_heuristic() {
        let config = FatigueAlgorithmConfig::default();
        // fatigue 6.0 > 5.6 with low motivation and stalled strength; combined stays below 7
        let need = evaluate_deload_need(6.0, 8.0, &response(2.0, 4.0, 4.0), &config, 0);
        assert_eq!(need.triggers, vec![DeloadTrigger::OvertrainingRisk]);

        // Same athlete with fatigue below 80% of threshold
        assert!(!needs_deload(5.5, 8.0, &response(2.0, 4.0, 4.0), &config, 0));
    }

    #[test]
    fn test_aggravated_hypertrophy_deload() {
        let deload = generate_personalized_deload(
            10.0,
            5.0,
            TrainingLevel::Intermediate,
            TrainingGoal::Hypertrophy,
            &base(),
        );
        assert_eq!(deload.volume_reduction, 70.0);
        assert_eq!(deload.intensity_reduction, 15.0);
        assert_eq!(deload.frequency_reduction, 2);
        assert_eq!(deload.duration, 9);
        assert_eq!(deload.notes, vec![NOTE_AGGRESSIVE.to_string()]);
    }

    #[test]
    fn test_poor_recovery_extends_deload() {
        let deload = generate_personalized_deload(
            10.0,
            2.0,
            TrainingLevel::Intermediate,
            TrainingGoal::Hypertrophy,
            &base(),
        );
        assert_eq!(deload.volume_reduction, 75.0);
        assert_eq!(deload.duration, 11);
        assert_eq!(deload.notes.len(), 2);
        assert_eq!(deload.notes[1], NOTE_POOR_RECOVERY);
    }

    #[test]
    fn test_gentle_deload_with_good_recovery() {
        // threshold 7: 5.0 < 5.6 is moderate fatigue
        let deload = generate_personalized_deload(
            5.0,
            8.0,
            TrainingLevel::Intermediate,
            TrainingGoal::Hypertrophy,
            &base(),
        );
        assert_eq!(deload.volume_reduction, 50.0);
        assert_eq!(deload.intensity_reduction, 5.0);
        assert_eq!(deload.frequency_reduction, 1);
        assert_eq!(deload.duration, 3);
        assert_eq!(
            deload.notes,
            vec![NOTE_GENTLE.to_string(), NOTE_GOOD_RECOVERY.to_string()]
        );
    }

    #[test]
    fn test_fatigue_between_bands_keeps_base_reductions() {
        let deload = generate_personalized_deload(
            7.5,
            5.0,
            TrainingLevel::Intermediate,
            TrainingGoal::Hypertrophy,
            &base(),
        );
        assert_eq!(deload, base());
    }

    #[test]
    fn test_negative_reductions_clamp_to_zero() {
        let thin = DeloadRecommendation {
            deload_type: DeloadType::Volume,
            volume_reduction: 5.0,
            intensity_reduction: 0.0,
            frequency_reduction: 0,
            duration: 3,
            timing: DeloadTiming::Planned,
            notes: Vec::new(),
        };
        let deload = generate_personalized_deload(
            1.0,
            9.0,
            TrainingLevel::Beginner,
            TrainingGoal::Hypertrophy,
            &thin,
        );
        assert_eq!(deload.volume_reduction, 0.0);
        assert_eq!(deload.intensity_reduction, 0.0);
        assert_eq!(deload.duration, MIN_DELOAD_DAYS);
    }

    #[test]
    fn test_base_strategy_is_not_mutated() {
        let original = base();
        let _ = generate_personalized_deload(
            12.0,
            1.0,
            TrainingLevel::Intermediate,
            TrainingGoal::Hypertrophy,
            &original,
        );
        assert_eq!(original, base());
    }

    proptest! {
        #[test]
        fn prop_personalized_deload_respects_floor(
            fatigue in 0.0..20.0f64,
            recovery in 0.0..10.0f64,
            level_idx in 0usize..4,
            goal_idx in 0usize..8
        ) {
            let level = TrainingLevel::ALL[level_idx];
            let goal = TrainingGoal::ALL[goal_idx];
            let base = EngineTables::builtin().base_strategy(level, goal).clone();
            let deload = generate_personalized_deload(fatigue, recovery, level, goal, &base);

            prop_assert!(deload.duration >= MIN_DELOAD_DAYS);
            prop_assert!(deload.volume_reduction >= 0.0);
            prop_assert!(deload.intensity_reduction >= 0.0);
            prop_assert!(deload.check_invariant().is_ok());
        }
    }
}
