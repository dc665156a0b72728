//! Normalized qualifying rows and the per-race qualifying summary.

use serde::{Deserialize, Serialize};

/// One qualifying entry per (race, driver), with session times parsed to
/// seconds and a dense rank within each session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingRecord {
  pub race_id:   u32,
  pub driver_id: u32,
  /// Official combined qualifying position.
  pub position:  Option<u32>,
  pub q1: Option<f64>,
  pub q2: Option<f64>,
  pub q3: Option<f64>,
  /// Dense 1..K rank within the race's session, fastest first; drivers
  /// without a time rank after all drivers with one.
  pub rank_q1: u32,
  pub rank_q2: u32,
  pub rank_q3: u32,
}

/// Per-race qualifying snapshot.
///
/// An "escape" time is the time of the slowest driver who advanced past a
/// session cutoff. All fields are absent rather than dropped when the race
/// lacks the rows to compute them (e.g. fewer than 16 entrants).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingSummary {
  pub race_id:        u32,
  /// Q1 time of the rank-16 driver — the last one through to Q2.
  pub q1_escape_time: Option<f64>,
  /// Q2 time of the rank-11 driver — the last one through to Q3.
  pub q2_escape_time: Option<f64>,
  /// Q3 time of the fastest Q3 driver.
  pub pole_time:      Option<f64>,
  /// Fastest time across all three sessions and all drivers.
  pub best_time:      Option<f64>,
  /// 1.07 × pole — the 107% rule threshold.
  pub time_107:       Option<f64>,
}
