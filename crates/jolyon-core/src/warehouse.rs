//! The complete output of one ETL run.

use serde::{Deserialize, Serialize};

use crate::{
  delta::LapTimeDelta,
  entity::{Constructor, Driver, Race},
  laps::LapRecord,
  qualifying::{QualifyingRecord, QualifyingSummary},
  result::RaceResult,
};

/// The eight persisted tables, fully derived and ready for bulk load.
///
/// Produced once per run by the ETL pipeline and never mutated; the
/// persistence layer consumes it read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Warehouse {
  pub races:        Vec<Race>,
  pub drivers:      Vec<Driver>,
  pub constructors: Vec<Constructor>,
  pub results:      Vec<RaceResult>,
  pub lap_times:    Vec<LapRecord>,
  pub lap_time_deltas: Vec<LapTimeDelta>,
  pub qualifying:   Vec<QualifyingRecord>,
  pub qualifying_summary: Vec<QualifyingSummary>,
}
