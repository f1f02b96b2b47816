//! Algorithm parameters and process settings
//!
//! `FatigueAlgorithmConfig` is supplied per athlete or plan and only ever read
//! by the engine. `EngineSettings` is loaded once from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::logging::{LogFormat, LoggingSettings};
use crate::models::{TrainingGoal, TrainingLevel};
use crate::tables::EngineTables;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_DATABASE_URL: &str = "sqlite://fatigue.db?mode=rwc";
const DEFAULT_LOG_LEVEL: &str = "info";

pub const TOLERANCE_RANGE: (f64, f64) = (0.5, 1.5);

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {name}: {value}")]
  InvalidValue { name: String, value: String },

  #[error("Out of range: {0}")]
  OutOfRange(String),

  #[error("{table} table has no entry for {level}/{goal}")]
  MissingTableCell {
    table: &'static str,
    level: TrainingLevel,
    goal: TrainingGoal,
  },

  #[error("{table} table entry for {level}/{goal} is invalid: {reason}")]
  InvalidTableCell {
    table: &'static str,
    level: TrainingLevel,
    goal: TrainingGoal,
    reason: String,
  },

  #[error("Failed to parse tables: {0}")]
  Parse(String),

  #[error("Failed to read {path}: {reason}")]
  Io { path: String, reason: String },
}

impl From<serde_json::Error> for ConfigError {
  fn from(e: serde_json::Error) -> Self {
    ConfigError::Parse(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Algorithm Config
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueAlgorithmConfig {
  /// Combined-score limit used by the deload-need detector
  pub fatigue_threshold: f64,

  /// How much recovery capacity offsets fatigue (0-1)
  pub recovery_weight: f64,

  /// How much positive adaptation offsets fatigue (0-1)
  pub training_response_weight: f64,

  /// Per-athlete multiplier on the fatigue score (0.5-1.5)
  pub individual_tolerance: f64,

  pub autoregulation_enabled: bool,
}

impl Default for FatigueAlgorithmConfig {
  fn default() -> Self {
    Self {
      fatigue_threshold: 7.0,
      recovery_weight: 0.3,
      training_response_weight: 0.2,
      individual_tolerance: 1.0,
      autoregulation_enabled: true,
    }
  }
}

impl FatigueAlgorithmConfig {
  /// Default config with the threshold taken from the table cell for this athlete
  pub fn for_athlete(level: TrainingLevel, goal: TrainingGoal, tables: &EngineTables) -> Self {
    Self {
      fatigue_threshold: tables.threshold(level, goal),
      ..Self::default()
    }
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !self.fatigue_threshold.is_finite() || self.fatigue_threshold <= 0.0 {
      return Err(ConfigError::OutOfRange(format!(
        "fatigue threshold must be > 0, got {}",
        self.fatigue_threshold
      )));
    }
    for (name, weight) in [
      ("recovery weight", self.recovery_weight),
      ("training response weight", self.training_response_weight),
    ] {
      if !(0.0..=1.0).contains(&weight) {
        return Err(ConfigError::OutOfRange(format!(
          "{} must be within 0-1, got {}",
          name, weight
        )));
      }
    }
    let (min, max) = TOLERANCE_RANGE;
    if !(min..=max).contains(&self.individual_tolerance) {
      return Err(ConfigError::OutOfRange(format!(
        "individual tolerance must be within {}-{}, got {}",
        min, max, self.individual_tolerance
      )));
    }
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Process Settings
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct EngineSettings {
  pub database_url: String,

  /// Optional JSON file overriding the built-in threshold/strategy tables
  pub tables_path: Option<String>,

  pub logging: LoggingSettings,

  /// Defaults applied to athletes without their own config
  pub algorithm: FatigueAlgorithmConfig,
}

impl EngineSettings {
  /// Load settings from the environment (and `.env` if present)
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();

    let defaults = FatigueAlgorithmConfig::default();
    let algorithm = FatigueAlgorithmConfig {
      fatigue_threshold: env_parse("FATIGUE_THRESHOLD", defaults.fatigue_threshold)?,
      recovery_weight: env_parse("FATIGUE_RECOVERY_WEIGHT", defaults.recovery_weight)?,
      training_response_weight: env_parse(
        "FATIGUE_TRAINING_RESPONSE_WEIGHT",
        defaults.training_response_weight,
      )?,
      individual_tolerance: env_parse("FATIGUE_INDIVIDUAL_TOLERANCE", defaults.individual_tolerance)?,
      autoregulation_enabled: env_flag("FATIGUE_AUTOREGULATION", defaults.autoregulation_enabled)?,
    };
    algorithm.validate()?;

    Ok(Self {
      database_url: env::var("FATIGUE_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
      tables_path: env::var("FATIGUE_TABLES_PATH").ok().filter(|p| !p.trim().is_empty()),
      logging: LoggingSettings {
        level: env::var("FATIGUE_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        format: env_parse("FATIGUE_LOG_FORMAT", LogFormat::Pretty)?,
      },
      algorithm,
    })
  }

  /// Built-in tables, or the override file when one is configured
  pub fn load_tables(&self) -> Result<EngineTables, ConfigError> {
    match &self.tables_path {
      Some(path) => EngineTables::from_json_file(path),
      None => Ok(EngineTables::default()),
    }
  }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
  match env::var(name) {
    Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
      name: name.to_string(),
      value: raw,
    }),
    Err(_) => Ok(default),
  }
}

fn env_flag(name: &str, default: bool) -> Result<bool, ConfigError> {
  match env::var(name) {
    Ok(raw) => match raw.trim().to_lowercase().as_str() {
      "1" | "true" | "yes" | "on" => Ok(true),
      "0" | "false" | "no" | "off" => Ok(false),
      _ => Err(ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw,
      }),
    },
    Err(_) => Ok(default),
  }
}
