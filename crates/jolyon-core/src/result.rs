//! Enriched race results — one row per (race, driver).

use serde::{Deserialize, Serialize};

/// Sentinel grid slot for drivers with no recorded grid position
/// (pit-lane starts and similar).
pub const GRID_SENTINEL: u32 = 100;

/// Final categorical outcome of a driver's race.
///
/// Persisted as a single small-integer code: a finishing rank for classified
/// drivers, 99 for retirements, 100 for disqualified/withdrawn entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
  /// Classified with a finishing rank (1..N).
  Ranked(u32),
  /// Retired from the race ("R" in the source position text).
  Retired,
  /// Disqualified or withdrawn ("W" / "F" in the source position text).
  Excluded,
}

impl Classification {
  /// Integer code used in the persisted `results` table.
  pub fn code(self) -> u32 {
    match self {
      Classification::Ranked(rank) => rank,
      Classification::Retired => 99,
      Classification::Excluded => 100,
    }
  }

  /// Classify from the source `positionText` / `positionOrder` pair.
  pub fn from_position_text(text: &str, order: u32) -> Self {
    match text {
      "W" | "F" => Classification::Excluded,
      "R" => Classification::Retired,
      _ => Classification::Ranked(order),
    }
  }
}

/// A race result joined with race metadata and the status lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
  pub race_id:        u32,
  pub driver_id:      u32,
  pub constructor_id: u32,
  pub year:           u16,
  /// Grid slot; [`GRID_SENTINEL`] when the driver had none.
  pub grid:           u32,
  pub not_on_grid:    bool,
  pub pitlane_start:  bool,
  /// Official finish ordering (`positionOrder`) — total over the field,
  /// including non-finishers.
  pub finish_position: u32,
  pub classification: Classification,
  /// Laps completed by this driver.
  pub laps:           u32,
  /// Laps completed / max laps completed by any driver in the race.
  pub pct_complete:   f64,
  pub points:         f64,
  /// Status text from the lookup table, e.g. "Finished", "Engine", "+1 Lap".
  pub status:         String,
  /// Still circulating at the flag: status is "Finished" or a "+N Lap(s)"
  /// variant. Drivers that are merely lapped count as running.
  pub finished_running: bool,
}
