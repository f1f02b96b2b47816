//! Fatigue trend over an athlete's recent records
//!
//! Summarizes the newest-first history into the streak the deload detector
//! needs plus a coarse direction for display.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::FatigueRecord;

/// Newest score must move more than this fraction from the earlier mean to count as a change
const DIRECTION_BAND: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
  Rising,
  Stable,
  Falling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueTrend {
  /// Back-to-back days, counted from the newest record, with fatigue above threshold
  pub consecutive_high_fatigue_days: u32,
  pub average_score: f64,
  pub direction: TrendDirection,
  pub sample_size: usize,
}

impl FatigueTrend {
  /// Trend over records ordered newest first
  pub fn compute(records: &[FatigueRecord], threshold: f64) -> Self {
    let points: Vec<(NaiveDate, f64)> = records.iter().map(|r| (r.recorded_on, r.fatigue_score)).collect();
    Self::from_points(&points, threshold)
  }

  /// Trend over (date, score) points ordered newest first
  pub fn from_points(points: &[(NaiveDate, f64)], threshold: f64) -> Self {
    let mut streak = 0;
    let mut last_day: Option<NaiveDate> = None;
    for (day, score) in points {
      if *score <= threshold {
        break;
      }
      match last_day {
        Some(prev) if prev == *day => continue,
        // A missing day ends the run
        Some(prev) if prev - *day > Duration::days(1) => break,
        _ => {
          streak += 1;
          last_day = Some(*day);
        }
      }
    }

    let average_score = if points.is_empty() {
      0.0
    } else {
      points.iter().map(|(_, s)| s).sum::<f64>() / points.len() as f64
    };

    let trend = Self {
      consecutive_high_fatigue_days: streak,
      average_score,
      direction: direction(points),
      sample_size: points.len(),
    };
    tracing::debug!(?trend, threshold, "computed fatigue trend");
    trend
  }
}

fn direction(points: &[(NaiveDate, f64)]) -> TrendDirection {
  let Some(((_, newest), rest)) = points.split_first() else {
    return TrendDirection::Stable;
  };
  if rest.is_empty() {
    return TrendDirection::Stable;
  }

  let baseline = rest.iter().map(|(_, s)| s).sum::<f64>() / rest.len() as f64;
  let margin = baseline.abs() * DIRECTION_BAND;

  if *newest > baseline + margin {
    TrendDirection::Rising
  } else if *newest < baseline - margin {
    TrendDirection::Falling
  } else {
    TrendDirection::Stable
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
  }

  #[test]
  fn test_streak_counts_leading_high_days() {
    let points = [(day(10), 8.0), (day(9), 7.5), (day(8), 9.0), (day(7), 5.0), (day(6), 9.5)];
    let trend = FatigueTrend::from_points(&points, 7.0);
    assert_eq!(trend.consecutive_high_fatigue_days, 3);
    assert_eq!(trend.sample_size, 5);
  }

  #[test]
  fn test_streak_counts_distinct_dates() {
    let points = [(day(10), 8.0), (day(10), 8.5), (day(9), 7.5)];
    assert_eq!(FatigueTrend::from_points(&points, 7.0).consecutive_high_fatigue_days, 2);
  }

  #[test]
  fn test_gap_between_days_ends_streak() {
    let spread = [(day(20), 8.0), (day(10), 8.0), (day(1), 8.0)];
    assert_eq!(FatigueTrend::from_points(&spread, 7.0).consecutive_high_fatigue_days, 1);

    let broken = [(day(20), 8.0), (day(19), 8.0), (day(17), 9.0), (day(16), 9.0)];
    assert_eq!(FatigueTrend::from_points(&broken, 7.0).consecutive_high_fatigue_days, 2);
  }

  #[test]
  fn test_score_at_threshold_ends_streak() {
    let points = [(day(10), 7.0), (day(9), 9.0)];
    assert_eq!(FatigueTrend::from_points(&points, 7.0).consecutive_high_fatigue_days, 0);
  }

  #[test]
  fn test_direction() {
    let rising = [(day(10), 8.0), (day(9), 6.0), (day(8), 6.0)];
    assert_eq!(FatigueTrend::from_points(&rising, 7.0).direction, TrendDirection::Rising);

    let falling = [(day(10), 4.0), (day(9), 6.0), (day(8), 6.0)];
    assert_eq!(FatigueTrend::from_points(&falling, 7.0).direction, TrendDirection::Falling);

    let stable = [(day(10), 6.3), (day(9), 6.0), (day(8), 6.0)];
    assert_eq!(FatigueTrend::from_points(&stable, 7.0).direction, TrendDirection::Stable);
  }

  #[test]
  fn test_empty_history() {
    let trend = FatigueTrend::from_points(&[], 7.0);
    assert_eq!(trend.consecutive_high_fatigue_days, 0);
    assert_eq!(trend.average_score, 0.0);
    assert_eq!(trend.direction, TrendDirection::Stable);
  }

  #[test]
  fn test_average_score() {
    let points = [(day(3), 4.0), (day(2), 6.0), (day(1), 8.0)];
    assert_eq!(FatigueTrend::from_points(&points, 7.0).average_score, 6.0);
  }
}
