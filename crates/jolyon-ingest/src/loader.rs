//! [`Dataset`] — the in-memory image of one source dump.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
  Error, Result,
  raw::{
    RawConstructor, RawDriver, RawLapTime, RawPitStop, RawQualifying,
    RawRace, RawResult, RawStatus,
  },
};

/// The fixed file set of a complete dump. All of these must be present in
/// the source directory even though only a subset feeds derived tables.
pub const SOURCE_FILES: &[&str] = &[
  "circuits.csv",
  "status.csv",
  "lap_times.csv",
  "drivers.csv",
  "races.csv",
  "constructors.csv",
  "constructor_standings.csv",
  "qualifying.csv",
  "driver_standings.csv",
  "constructor_results.csv",
  "pit_stops.csv",
  "seasons.csv",
  "results.csv",
];

/// The eight source tables the pipeline consumes, fully parsed.
#[derive(Debug, Clone)]
pub struct Dataset {
  pub races:        Vec<RawRace>,
  pub drivers:      Vec<RawDriver>,
  pub constructors: Vec<RawConstructor>,
  pub status:       Vec<RawStatus>,
  pub results:      Vec<RawResult>,
  pub lap_times:    Vec<RawLapTime>,
  pub pit_stops:    Vec<RawPitStop>,
  pub qualifying:   Vec<RawQualifying>,
}

impl Dataset {
  /// Load a dump from `dir`.
  ///
  /// Verifies the complete fixed file set is present before parsing, so a
  /// truncated dump fails with one error naming every missing file instead
  /// of failing part-way through.
  pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref();

    let missing: Vec<String> = SOURCE_FILES
      .iter()
      .filter(|file| !dir.join(file).is_file())
      .map(|file| file.to_string())
      .collect();
    if !missing.is_empty() {
      return Err(Error::MissingSources {
        dir:   dir.to_path_buf(),
        files: missing,
      });
    }

    Ok(Dataset {
      races:        read_table(dir, "races.csv")?,
      drivers:      read_table(dir, "drivers.csv")?,
      constructors: read_table(dir, "constructors.csv")?,
      status:       read_table(dir, "status.csv")?,
      results:      read_table(dir, "results.csv")?,
      lap_times:    read_table(dir, "lap_times.csv")?,
      pit_stops:    read_table(dir, "pit_stops.csv")?,
      qualifying:   read_table(dir, "qualifying.csv")?,
    })
  }
}

/// Read one headered CSV file into typed rows. Any row failure aborts the
/// whole load.
fn read_table<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>> {
  let wrap = |source| Error::Csv {
    file: file.to_string(),
    source,
  };

  let mut reader = csv::Reader::from_path(dir.join(file)).map_err(wrap)?;
  reader
    .deserialize()
    .map(|row| row.map_err(wrap))
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
