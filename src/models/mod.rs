pub mod markers;
pub mod recommendation;
pub mod records;

pub use markers::{FatigueMarkers, TrainingGoal, TrainingLevel, TrainingResponse};
pub use recommendation::{
  DeloadRecommendation, DeloadTiming, DeloadType, FatigueManagementRecommendation,
  RecommendedAction, MIN_DELOAD_DAYS,
};
pub use records::{DeloadWeek, FatigueRecord, NewDeloadWeek, NewFatigueRecord};
