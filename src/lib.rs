//! Training fatigue assessment and deload prescription
//!
//! The four core calls are re-exported here and use the built-in
//! threshold/strategy tables. [`FatigueEngine`] carries its own tables for
//! deployments that override the domain data.

pub mod config;
pub mod db;
pub mod deload;
pub mod engine;
pub mod logging;
pub mod models;
pub mod recommendation;
pub mod repository;
pub mod scoring;
pub mod tables;
pub mod trend;
pub mod weights;

#[cfg(test)]
mod test_utils;

pub use config::{ConfigError, EngineSettings, FatigueAlgorithmConfig};
pub use deload::{generate_personalized_deload, needs_deload, DeloadNeed, DeloadTrigger};
pub use engine::{AssessmentInput, FatigueAssessment, FatigueEngine, RecordedAssessment};
pub use logging::{init_logging, LogFormat, LoggingError, LoggingSettings};
pub use models::{
  DeloadRecommendation, DeloadTiming, DeloadType, DeloadWeek, FatigueManagementRecommendation, FatigueMarkers,
  FatigueRecord, NewDeloadWeek, NewFatigueRecord, RecommendedAction, TrainingGoal, TrainingLevel, TrainingResponse,
};
pub use recommendation::generate_fatigue_management_recommendations;
pub use repository::{FatigueRepository, RepositoryError, SqliteFatigueRepository};
pub use scoring::calculate_fatigue_score;
pub use tables::EngineTables;
pub use trend::{FatigueTrend, TrendDirection};
pub use weights::MarkerWeights;
