//! Threshold and base deload strategy tables, keyed by (level, goal)
//!
//! The built-in cells come from exhaustive matches, so a missing cell is a
//! compile error. Override files are checked cell by cell on load and rejected
//! if any of the 32 entries is absent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::config::ConfigError;
use crate::models::{DeloadRecommendation, DeloadTiming, DeloadType, TrainingGoal, TrainingLevel};

const LEVELS: usize = TrainingLevel::ALL.len();
const GOALS: usize = TrainingGoal::ALL.len();

/// ---------------------------------------------------------------------------
/// Built-in Cells
/// ---------------------------------------------------------------------------

/// Fatigue score at which the athlete has reached their tolerable limit
pub fn default_threshold(level: TrainingLevel, goal: TrainingGoal) -> f64 {
  use TrainingGoal::*;
  use TrainingLevel::*;

  match (level, goal) {
    (Beginner, Strength) => 6.0,
    (Beginner, Hypertrophy) => 6.0,
    (Beginner, Endurance) => 6.5,
    (Beginner, Power) => 5.5,
    (Beginner, WeightLoss) => 6.0,
    (Beginner, BodyRecomposition) => 6.0,
    (Beginner, GeneralFitness) => 6.5,
    (Beginner, SportSpecific) => 5.5,

    (Intermediate, Strength) => 7.0,
    (Intermediate, Hypertrophy) => 7.0,
    (Intermediate, Endurance) => 7.5,
    (Intermediate, Power) => 6.5,
    (Intermediate, WeightLoss) => 7.0,
    (Intermediate, BodyRecomposition) => 7.0,
    (Intermediate, GeneralFitness) => 7.5,
    (Intermediate, SportSpecific) => 6.5,

    (Advanced, Strength) => 8.0,
    (Advanced, Hypertrophy) => 8.0,
    (Advanced, Endurance) => 8.5,
    (Advanced, Power) => 7.5,
    (Advanced, WeightLoss) => 7.5,
    (Advanced, BodyRecomposition) => 8.0,
    (Advanced, GeneralFitness) => 8.0,
    (Advanced, SportSpecific) => 7.5,

    (Elite, Strength) => 8.5,
    (Elite, Hypertrophy) => 8.5,
    (Elite, Endurance) => 9.0,
    (Elite, Power) => 8.0,
    (Elite, WeightLoss) => 8.0,
    (Elite, BodyRecomposition) => 8.5,
    (Elite, GeneralFitness) => 8.5,
    (Elite, SportSpecific) => 8.0,
  }
}

fn strategy(
  deload_type: DeloadType,
  volume_reduction: f64,
  intensity_reduction: f64,
  frequency_reduction: u32,
  duration: u32,
  timing: DeloadTiming,
) -> DeloadRecommendation {
  DeloadRecommendation {
    deload_type,
    volume_reduction,
    intensity_reduction,
    frequency_reduction,
    duration,
    timing,
    notes: Vec::new(),
  }
}

/// Starting point for a deload before it is personalized
pub fn default_strategy(level: TrainingLevel, goal: TrainingGoal) -> DeloadRecommendation {
  use DeloadTiming::*;
  use DeloadType::*;
  use TrainingGoal::*;
  use TrainingLevel::*;

  match (level, goal) {
    // Beginners: short planned deloads, mostly volume
    (Beginner, Strength) => strategy(Combined, 40.0, 10.0, 1, 5, Planned),
    (Beginner, Hypertrophy) => strategy(Volume, 50.0, 0.0, 1, 5, Planned),
    (Beginner, Endurance) => strategy(Volume, 40.0, 10.0, 1, 5, Planned),
    (Beginner, Power) => strategy(Intensity, 30.0, 15.0, 1, 5, Planned),
    (Beginner, WeightLoss) => strategy(Volume, 40.0, 5.0, 1, 5, Planned),
    (Beginner, BodyRecomposition) => strategy(Volume, 45.0, 5.0, 1, 5, Planned),
    (Beginner, GeneralFitness) => strategy(Volume, 40.0, 5.0, 1, 5, Planned),
    (Beginner, SportSpecific) => strategy(Combined, 35.0, 10.0, 1, 5, Planned),

    (Intermediate, Strength) => strategy(Intensity, 40.0, 15.0, 1, 7, Planned),
    (Intermediate, Hypertrophy) => strategy(Volume, 60.0, 10.0, 1, 7, Planned),
    (Intermediate, Endurance) => strategy(Volume, 50.0, 10.0, 1, 7, Planned),
    (Intermediate, Power) => strategy(Intensity, 35.0, 20.0, 1, 7, Planned),
    (Intermediate, WeightLoss) => strategy(Volume, 45.0, 10.0, 1, 7, Planned),
    (Intermediate, BodyRecomposition) => strategy(Volume, 50.0, 10.0, 1, 7, Planned),
    (Intermediate, GeneralFitness) => strategy(Volume, 45.0, 10.0, 1, 7, Planned),
    (Intermediate, SportSpecific) => strategy(Combined, 40.0, 15.0, 1, 7, Autoregulated),

    (Advanced, Strength) => strategy(Combined, 50.0, 20.0, 1, 7, Autoregulated),
    (Advanced, Hypertrophy) => strategy(Volume, 60.0, 15.0, 1, 7, Autoregulated),
    (Advanced, Endurance) => strategy(Volume, 55.0, 15.0, 2, 7, Autoregulated),
    (Advanced, Power) => strategy(Intensity, 40.0, 25.0, 1, 7, Autoregulated),
    (Advanced, WeightLoss) => strategy(Volume, 50.0, 10.0, 1, 7, Planned),
    (Advanced, BodyRecomposition) => strategy(Volume, 55.0, 10.0, 1, 7, Planned),
    (Advanced, GeneralFitness) => strategy(Volume, 50.0, 10.0, 1, 7, Planned),
    (Advanced, SportSpecific) => strategy(Combined, 45.0, 20.0, 1, 7, Autoregulated),

    // Elite: longer autoregulated deloads after heavier blocks
    (Elite, Strength) => strategy(Combined, 50.0, 20.0, 2, 10, Autoregulated),
    (Elite, Hypertrophy) => strategy(Volume, 65.0, 15.0, 1, 10, Autoregulated),
    (Elite, Endurance) => strategy(Volume, 60.0, 15.0, 2, 10, Autoregulated),
    (Elite, Power) => strategy(Intensity, 45.0, 25.0, 2, 10, Autoregulated),
    (Elite, WeightLoss) => strategy(Volume, 50.0, 10.0, 1, 7, Autoregulated),
    (Elite, BodyRecomposition) => strategy(Volume, 55.0, 15.0, 1, 7, Autoregulated),
    (Elite, GeneralFitness) => strategy(Volume, 50.0, 10.0, 1, 7, Planned),
    (Elite, SportSpecific) => strategy(Combined, 50.0, 20.0, 2, 10, Autoregulated),
  }
}

/// ---------------------------------------------------------------------------
/// Engine Tables
/// ---------------------------------------------------------------------------

/// Complete threshold and strategy tables, one cell per (level, goal)
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTables {
  thresholds: [[f64; GOALS]; LEVELS],
  strategies: [[DeloadRecommendation; GOALS]; LEVELS],
}

/// On-disk shape of a table override file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesDocument {
  pub thresholds: HashMap<TrainingLevel, HashMap<TrainingGoal, f64>>,
  pub strategies: HashMap<TrainingLevel, HashMap<TrainingGoal, DeloadRecommendation>>,
}

impl Default for EngineTables {
  fn default() -> Self {
    Self {
      thresholds: std::array::from_fn(|l| {
        std::array::from_fn(|g| default_threshold(TrainingLevel::ALL[l], TrainingGoal::ALL[g]))
      }),
      strategies: std::array::from_fn(|l| {
        std::array::from_fn(|g| default_strategy(TrainingLevel::ALL[l], TrainingGoal::ALL[g]))
      }),
    }
  }
}

impl EngineTables {
  /// Process-wide built-in tables, built on first use
  pub fn builtin() -> &'static EngineTables {
    static TABLES: OnceLock<EngineTables> = OnceLock::new();
    TABLES.get_or_init(EngineTables::default)
  }

  pub fn threshold(&self, level: TrainingLevel, goal: TrainingGoal) -> f64 {
    self.thresholds[level as usize][goal as usize]
  }

  pub fn base_strategy(&self, level: TrainingLevel, goal: TrainingGoal) -> &DeloadRecommendation {
    &self.strategies[level as usize][goal as usize]
  }

  /// Build tables from an override document, failing on the first missing or invalid cell
  pub fn from_document(doc: &TablesDocument) -> Result<Self, ConfigError> {
    let mut tables = Self::default();

    for level in TrainingLevel::ALL {
      for goal in TrainingGoal::ALL {
        let threshold = doc
          .thresholds
          .get(&level)
          .and_then(|row| row.get(&goal))
          .copied()
          .ok_or(ConfigError::MissingTableCell {
            table: "threshold",
            level,
            goal,
          })?;
        if !threshold.is_finite() || threshold <= 0.0 {
          return Err(ConfigError::InvalidTableCell {
            table: "threshold",
            level,
            goal,
            reason: format!("threshold must be > 0, got {}", threshold),
          });
        }

        let strategy = doc
          .strategies
          .get(&level)
          .and_then(|row| row.get(&goal))
          .ok_or(ConfigError::MissingTableCell {
            table: "strategy",
            level,
            goal,
          })?;
        strategy
          .check_invariant()
          .map_err(|reason| ConfigError::InvalidTableCell {
            table: "strategy",
            level,
            goal,
            reason,
          })?;

        tables.thresholds[level as usize][goal as usize] = threshold;
        tables.strategies[level as usize][goal as usize] = strategy.clone();
      }
    }

    tracing::debug!("loaded threshold and strategy table overrides");
    Ok(tables)
  }

  pub fn from_json(json: &str) -> Result<Self, ConfigError> {
    let doc: TablesDocument = serde_json::from_str(json)?;
    Self::from_document(&doc)
  }

  pub fn from_json_file(path: &str) -> Result<Self, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
      path: path.to_string(),
      reason: e.to_string(),
    })?;
    Self::from_json(&json)
  }

  /// Export the current cells in override-file shape
  pub fn to_document(&self) -> TablesDocument {
    let mut doc = TablesDocument {
      thresholds: HashMap::new(),
      strategies: HashMap::new(),
    };
    for level in TrainingLevel::ALL {
      for goal in TrainingGoal::ALL {
        doc
          .thresholds
          .entry(level)
          .or_default()
          .insert(goal, self.threshold(level, goal));
        doc
          .strategies
          .entry(level)
          .or_default()
          .insert(goal, self.base_strategy(level, goal).clone());
      }
    }
    doc
  }
}
