use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Athlete Context
/// ---------------------------------------------------------------------------

/// Training experience, ordered from least to most fatigue tolerant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
  Beginner,
  Intermediate,
  Advanced,
  Elite,
}

impl TrainingLevel {
  pub const ALL: [TrainingLevel; 4] = [
    TrainingLevel::Beginner,
    TrainingLevel::Intermediate,
    TrainingLevel::Advanced,
    TrainingLevel::Elite,
  ];

  /// Same objective fatigue costs less the more experienced the athlete
  pub fn fatigue_multiplier(&self) -> f64 {
    match self {
      TrainingLevel::Beginner => 1.2,
      TrainingLevel::Intermediate => 1.0,
      TrainingLevel::Advanced => 0.8,
      TrainingLevel::Elite => 0.7,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      TrainingLevel::Beginner => "beginner",
      TrainingLevel::Intermediate => "intermediate",
      TrainingLevel::Advanced => "advanced",
      TrainingLevel::Elite => "elite",
    }
  }
}

impl std::fmt::Display for TrainingLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for TrainingLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "beginner" => Ok(Self::Beginner),
      "intermediate" => Ok(Self::Intermediate),
      "advanced" => Ok(Self::Advanced),
      "elite" => Ok(Self::Elite),
      _ => Err(format!("Unknown training level: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
  Strength,
  Hypertrophy,
  Endurance,
  Power,
  WeightLoss,
  BodyRecomposition,
  GeneralFitness,
  SportSpecific,
}

impl TrainingGoal {
  pub const ALL: [TrainingGoal; 8] = [
    TrainingGoal::Strength,
    TrainingGoal::Hypertrophy,
    TrainingGoal::Endurance,
    TrainingGoal::Power,
    TrainingGoal::WeightLoss,
    TrainingGoal::BodyRecomposition,
    TrainingGoal::GeneralFitness,
    TrainingGoal::SportSpecific,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      TrainingGoal::Strength => "strength",
      TrainingGoal::Hypertrophy => "hypertrophy",
      TrainingGoal::Endurance => "endurance",
      TrainingGoal::Power => "power",
      TrainingGoal::WeightLoss => "weight_loss",
      TrainingGoal::BodyRecomposition => "body_recomposition",
      TrainingGoal::GeneralFitness => "general_fitness",
      TrainingGoal::SportSpecific => "sport_specific",
    }
  }
}

impl std::fmt::Display for TrainingGoal {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for TrainingGoal {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    // Accept both snake_case and kebab-case labels
    match s.trim().to_lowercase().replace('-', "_").as_str() {
      "strength" => Ok(Self::Strength),
      "hypertrophy" => Ok(Self::Hypertrophy),
      "endurance" => Ok(Self::Endurance),
      "power" => Ok(Self::Power),
      "weight_loss" => Ok(Self::WeightLoss),
      "body_recomposition" => Ok(Self::BodyRecomposition),
      "general_fitness" => Ok(Self::GeneralFitness),
      "sport_specific" => Ok(Self::SportSpecific),
      _ => Err(format!("Unknown training goal: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Fatigue Markers
/// ---------------------------------------------------------------------------

/// Documented range of each marker, used for clamping
pub const RPE_INCREASE_RANGE: (f64, f64) = (0.0, 10.0);
pub const STRENGTH_DECREASE_RANGE: (f64, f64) = (0.0, 100.0);
pub const SUBJECTIVE_RANGE: (f64, f64) = (1.0, 10.0);
pub const APPETITE_RANGE: (f64, f64) = (-5.0, 5.0);

/// One snapshot of the ten fatigue markers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueMarkers {
  /// Rise in perceived effort for an unchanged load (0-10)
  pub rpe_increase: f64,

  /// Percentage drop in reference lift performance (0-100)
  pub strength_decrease: f64,

  /// 1-10, higher = more sore
  pub soreness: f64,

  /// 1-10, higher = better
  pub sleep_quality: f64,

  /// 1-10, higher = better
  pub motivation: f64,

  /// Beats per minute above personal baseline
  pub resting_heart_rate: f64,

  /// 1-10, higher = better
  pub mood_score: f64,

  /// 1-10, higher = worse
  pub stress_score: f64,

  /// -5..5, magnitude matters, sign does not
  pub appetite_changes: f64,

  /// 1-10, higher = better
  pub technical_proficiency: f64,
}

impl FatigueMarkers {
  /// Bring every marker back into its documented range.
  ///
  /// Non-finite values become the value that adds no fatigue: the lower bound
  /// for fatigue-direct markers, the upper bound for "goodness" markers and
  /// zero for resting HR delta and appetite.
  pub fn clamped(&self) -> Self {
    Self {
      rpe_increase: clamp_marker("rpe_increase", self.rpe_increase, RPE_INCREASE_RANGE, RPE_INCREASE_RANGE.0),
      strength_decrease: clamp_marker(
        "strength_decrease",
        self.strength_decrease,
        STRENGTH_DECREASE_RANGE,
        STRENGTH_DECREASE_RANGE.0,
      ),
      soreness: clamp_marker("soreness", self.soreness, SUBJECTIVE_RANGE, SUBJECTIVE_RANGE.0),
      sleep_quality: clamp_marker("sleep_quality", self.sleep_quality, SUBJECTIVE_RANGE, SUBJECTIVE_RANGE.1),
      motivation: clamp_marker("motivation", self.motivation, SUBJECTIVE_RANGE, SUBJECTIVE_RANGE.1),
      resting_heart_rate: if self.resting_heart_rate.is_finite() {
        self.resting_heart_rate
      } else {
        tracing::warn!(marker = "resting_heart_rate", "non-finite marker value replaced with 0");
        0.0
      },
      mood_score: clamp_marker("mood_score", self.mood_score, SUBJECTIVE_RANGE, SUBJECTIVE_RANGE.1),
      stress_score: clamp_marker("stress_score", self.stress_score, SUBJECTIVE_RANGE, SUBJECTIVE_RANGE.0),
      appetite_changes: clamp_marker("appetite_changes", self.appetite_changes, APPETITE_RANGE, 0.0),
      technical_proficiency: clamp_marker(
        "technical_proficiency",
        self.technical_proficiency,
        SUBJECTIVE_RANGE,
        SUBJECTIVE_RANGE.1,
      ),
    }
  }
}

fn clamp_marker(name: &'static str, value: f64, (min, max): (f64, f64), neutral: f64) -> f64 {
  if !value.is_finite() {
    tracing::warn!(marker = name, neutral, "non-finite marker value replaced");
    return neutral;
  }
  if value < min || value > max {
    tracing::warn!(marker = name, value, min, max, "marker out of range, clamping");
  }
  value.clamp(min, max)
}

/// ---------------------------------------------------------------------------
/// Training Response
/// ---------------------------------------------------------------------------

/// How well the athlete is adapting, each field 1-10
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResponse {
  pub strength_gain: f64,
  pub muscle_growth: f64,
  pub motivation: f64,
  pub technical_improvement: f64,
  pub recovery_speed: f64,
}

impl TrainingResponse {
  pub fn clamped(&self) -> Self {
    let clamp = |name, v| clamp_marker(name, v, SUBJECTIVE_RANGE, SUBJECTIVE_RANGE.1);
    Self {
      strength_gain: clamp("strength_gain", self.strength_gain),
      muscle_growth: clamp("muscle_growth", self.muscle_growth),
      motivation: clamp("response_motivation", self.motivation),
      technical_improvement: clamp("technical_improvement", self.technical_improvement),
      recovery_speed: clamp("recovery_speed", self.recovery_speed),
    }
  }

  /// Mean of strength gain and muscle growth, the adaptation signal used against fatigue
  pub fn adaptation(&self) -> f64 {
    (self.strength_gain + self.muscle_growth) / 2.0
  }
}
