//! Per-lap timing rows: normalized pit stops and assembled lap records.

use serde::{Deserialize, Serialize};

/// A single pit-stop event with the service time converted to seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitStop {
  pub race_id:   u32,
  pub driver_id: u32,
  /// 1-based stop number within the race for this driver.
  pub stop:      u32,
  /// Lap on which the driver entered the pits.
  pub lap:       u32,
  pub seconds:   f64,
}

/// One assembled row per (race, driver, lap).
///
/// Invariant: `total_seconds` is monotonically non-decreasing over
/// increasing `lap` within a (race, driver) sequence, and `stops` is a
/// non-decreasing step function of `lap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
  pub race_id:      u32,
  pub driver_id:    u32,
  pub lap:          u32,
  /// Max laps completed by any driver in this race.
  pub race_laps:    u32,
  /// `lap / race_laps`.
  pub pct_complete: f64,
  /// Official on-track position at the end of this lap.
  pub position:     u32,
  /// Elapsed time for this lap.
  pub seconds:      f64,
  /// Running cumulative race time through this lap.
  pub total_seconds: f64,
  /// Pit stops completed so far (counted at the out-lap).
  pub stops:        u32,
  /// Current tire stint, 1-based; a driver with zero stops has stint 1
  /// throughout.
  pub stint:        u32,
  /// The driver pitted at the end of this lap.
  pub is_inlap:     bool,
  /// The driver left the pits at the start of this lap.
  pub is_outlap:    bool,
}
