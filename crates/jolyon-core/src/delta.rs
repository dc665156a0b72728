//! The lap-time-delta table — the warehouse's core derived output.

use serde::{Deserialize, Serialize};

/// Time separation between an ordered (ahead, behind) driver pair on one lap
/// of one race.
///
/// A side "misses" its lap record when the driver was not running that lap.
/// The two flags per side split that signal: `is_lap_down` means the driver
/// finished the race running and simply had not reached this lap number yet
/// (one or more laps behind the leader); `is_retired` means the driver was
/// out of the race. The flags are mutually exclusive, and rows where both
/// sides miss their record are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapTimeDelta {
  pub race_id: u32,
  pub lap:     u32,
  /// On-track position of the ahead driver — official when timing data
  /// exists for the lap, otherwise inferred by re-ranking peers.
  pub position_ahead:  u32,
  pub position_behind: u32,
  pub driver_id_ahead:  u32,
  pub driver_id_behind: u32,
  /// ahead.elapsed − behind.elapsed; `None` when either side's record is
  /// missing.
  pub lap_time_delta:  Option<f64>,
  /// ahead.cumulative − behind.cumulative; `None` when either side's record
  /// is missing.
  pub race_time_delta: Option<f64>,
  pub is_lap_down_ahead:  bool,
  pub is_retired_ahead:   bool,
  pub is_lap_down_behind: bool,
  pub is_retired_behind:  bool,
}
