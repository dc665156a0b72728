//! Per-entity normalizers: independent column-level cleanup with no
//! cross-entity joins.

use jolyon_core::{
  entity::{Constructor, Driver, Race},
  laps::PitStop,
};
use jolyon_ingest::raw::{RawConstructor, RawDriver, RawPitStop, RawRace};

pub fn normalize_races(raw: &[RawRace]) -> Vec<Race> {
  let mut races: Vec<Race> = raw
    .iter()
    .map(|r| Race {
      race_id:    r.race_id,
      year:       r.year,
      round:      r.round,
      circuit_id: r.circuit_id,
      name:       r.name.clone(),
      date:       r.date,
    })
    .collect();
  races.sort_by_key(|r| r.race_id);
  races
}

/// Assemble the display name and carry the rest through. Apostrophes are
/// stripped from names so downstream plain-text SQL stays unambiguous.
pub fn normalize_drivers(raw: &[RawDriver]) -> Vec<Driver> {
  let mut drivers: Vec<Driver> = raw
    .iter()
    .map(|d| Driver {
      driver_id:   d.driver_id,
      number:      d.number,
      code:        d.code.clone(),
      name:        format!("{} {}", d.forename, d.surname).replace('\'', ""),
      dob:         d.dob,
      nationality: d.nationality.clone(),
    })
    .collect();
  drivers.sort_by_key(|d| d.driver_id);
  drivers
}

pub fn normalize_constructors(raw: &[RawConstructor]) -> Vec<Constructor> {
  let mut constructors: Vec<Constructor> = raw
    .iter()
    .map(|c| Constructor {
      constructor_id: c.constructor_id,
      name:           c.name.clone(),
      nationality:    c.nationality.clone(),
    })
    .collect();
  constructors.sort_by_key(|c| c.constructor_id);
  constructors
}

/// Convert pit-stop service times from milliseconds to seconds.
pub fn parse_pit_stops(raw: &[RawPitStop]) -> Vec<PitStop> {
  let mut stops: Vec<PitStop> = raw
    .iter()
    .map(|p| PitStop {
      race_id:   p.race_id,
      driver_id: p.driver_id,
      stop:      p.stop,
      lap:       p.lap,
      seconds:   p.milliseconds as f64 / 1000.0,
    })
    .collect();
  stops.sort_by_key(|p| (p.race_id, p.driver_id, p.stop));
  stops
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn driver_name_joins_parts_and_strips_apostrophes() {
    let raw = RawDriver {
      driver_id:   1,
      number:      None,
      code:        None,
      forename:    "Lando".into(),
      surname:     "O'Ward".into(),
      dob:         None,
      nationality: Some("Mexican".into()),
    };
    let drivers = normalize_drivers(&[raw]);
    assert_eq!(drivers[0].name, "Lando OWard");
  }

  #[test]
  fn pit_stop_milliseconds_become_seconds() {
    let raw = RawPitStop {
      race_id:      1,
      driver_id:    7,
      stop:         1,
      lap:          12,
      milliseconds: 23_456,
    };
    let stops = parse_pit_stops(&[raw]);
    assert!((stops[0].seconds - 23.456).abs() < 1e-9);
  }
}
