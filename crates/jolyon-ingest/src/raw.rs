//! Typed raw rows, one struct per consumed source table.
//!
//! Field names follow the dump's camelCase headers via serde renames; the
//! dump encodes SQL NULL as the literal `\N`, which nullable columns decode
//! to `None`.

use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};

/// Decode a nullable column: `\N` and the empty string are `None`, anything
/// else must parse as `T`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr,
  T::Err: Display,
{
  let raw = String::deserialize(deserializer)?;
  match raw.as_str() {
    "\\N" | "" => Ok(None),
    other => other.parse::<T>().map(Some).map_err(de::Error::custom),
  }
}

// ─── Reference tables ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawRace {
  #[serde(rename = "raceId")]
  pub race_id:    u32,
  pub year:       u16,
  pub round:      u8,
  #[serde(rename = "circuitId")]
  pub circuit_id: u32,
  pub name:       String,
  pub date:       NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDriver {
  #[serde(rename = "driverId")]
  pub driver_id:   u32,
  #[serde(deserialize_with = "nullable")]
  pub number:      Option<u32>,
  #[serde(deserialize_with = "nullable")]
  pub code:        Option<String>,
  pub forename:    String,
  pub surname:     String,
  #[serde(deserialize_with = "nullable")]
  pub dob:         Option<NaiveDate>,
  #[serde(deserialize_with = "nullable")]
  pub nationality: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConstructor {
  #[serde(rename = "constructorId")]
  pub constructor_id: u32,
  pub name:           String,
  #[serde(deserialize_with = "nullable")]
  pub nationality:    Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStatus {
  #[serde(rename = "statusId")]
  pub status_id: u32,
  pub status:    String,
}

// ─── Event tables ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawResult {
  #[serde(rename = "raceId")]
  pub race_id:        u32,
  #[serde(rename = "driverId")]
  pub driver_id:      u32,
  #[serde(rename = "constructorId")]
  pub constructor_id: u32,
  /// 0 means no recorded grid slot.
  pub grid:           u32,
  #[serde(rename = "positionText")]
  pub position_text:  String,
  /// Total ordering over the field, including non-finishers.
  #[serde(rename = "positionOrder")]
  pub position_order: u32,
  pub points:         f64,
  pub laps:           u32,
  #[serde(rename = "statusId")]
  pub status_id:      u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLapTime {
  #[serde(rename = "raceId")]
  pub race_id:      u32,
  #[serde(rename = "driverId")]
  pub driver_id:    u32,
  pub lap:          u32,
  pub position:     u32,
  pub milliseconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPitStop {
  #[serde(rename = "raceId")]
  pub race_id:      u32,
  #[serde(rename = "driverId")]
  pub driver_id:    u32,
  pub stop:         u32,
  pub lap:          u32,
  pub milliseconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawQualifying {
  #[serde(rename = "raceId")]
  pub race_id:   u32,
  #[serde(rename = "driverId")]
  pub driver_id: u32,
  #[serde(deserialize_with = "nullable")]
  pub position:  Option<u32>,
  /// Session times as clock strings ("1:23.456"); parsed by the ETL.
  #[serde(deserialize_with = "nullable")]
  pub q1: Option<String>,
  #[serde(deserialize_with = "nullable")]
  pub q2: Option<String>,
  #[serde(deserialize_with = "nullable")]
  pub q3: Option<String>,
}
