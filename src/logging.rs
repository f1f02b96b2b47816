//! Tracing subscriber setup for applications embedding the engine
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host process through [`init_logging`].

use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Compact,
  Json,
}

impl std::str::FromStr for LogFormat {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pretty" => Ok(Self::Pretty),
      "compact" => Ok(Self::Compact),
      "json" => Ok(Self::Json),
      _ => Err(format!("Unknown log format: {}", s)),
    }
  }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
  /// trace, debug, info, warn or error
  pub level: String,
  pub format: LogFormat,
}

impl Default for LoggingSettings {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
      format: LogFormat::Pretty,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
  #[error("Invalid log filter: {0}")]
  InvalidFilter(String),

  #[error("Logging already initialized: {0}")]
  AlreadyInitialized(String),
}

impl LoggingSettings {
  /// `RUST_LOG` wins when set, otherwise the configured level applies to this crate
  pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
    if env::var("RUST_LOG").is_ok() {
      return EnvFilter::try_from_default_env().map_err(|e| LoggingError::InvalidFilter(e.to_string()));
    }
    EnvFilter::try_new(format!("warn,fatigue_engine={},sqlx=warn", self.level))
      .map_err(|e| LoggingError::InvalidFilter(e.to_string()))
  }
}

/// Install the global subscriber. Fails instead of panicking when one is already set.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), LoggingError> {
  let registry = tracing_subscriber::registry().with(settings.env_filter()?);

  match settings.format {
    LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).try_init(),
    LogFormat::Compact => registry.with(fmt::layer().compact().with_target(false)).try_init(),
    LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
  }
  .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
