//! Reference entities carried through from the source dump: races, drivers
//! and constructors. These are normalized but not derived — one output row
//! per source row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single grand prix: identity is (year, round).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
  pub race_id:    u32,
  pub year:       u16,
  pub round:      u8,
  pub circuit_id: u32,
  pub name:       String,
  pub date:       NaiveDate,
}

/// A driver, with the display name already assembled from forename and
/// surname (apostrophes stripped so the name is safe as plain text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
  pub driver_id:   u32,
  /// Permanent car number; absent for drivers who raced before the
  /// permanent-number era.
  pub number:      Option<u32>,
  /// Three-letter broadcast abbreviation, e.g. "HAM".
  pub code:        Option<String>,
  pub name:        String,
  pub dob:         Option<NaiveDate>,
  pub nationality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
  pub constructor_id: u32,
  pub name:           String,
  pub nationality:    Option<String>,
}
