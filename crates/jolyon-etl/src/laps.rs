//! Lap-time assembler: join raw per-lap timing with pit-stop events into
//! per-lap cumulative records with stint and in/out-lap flags.

use std::collections::{BTreeMap, HashMap};

use jolyon_core::laps::{LapRecord, PitStop};
use jolyon_ingest::raw::{RawLapTime, RawResult};

/// Build one ordered-by-lap [`LapRecord`] sequence per (race, driver).
///
/// A pit stop on lap N marks lap N as the in-lap and lap N+1 as the
/// out-lap; the running stop count steps up on the out-lap, so the stint
/// index changes with the fresh set of tires. Lap rows whose race has no
/// results row are dropped — without results there is no race lap count.
pub fn assemble_lap_times(
  lap_times: &[RawLapTime],
  pit_stops: &[PitStop],
  results: &[RawResult],
) -> Vec<LapRecord> {
  let mut race_laps: HashMap<u32, u32> = HashMap::new();
  for r in results {
    let laps = race_laps.entry(r.race_id).or_default();
    *laps = (*laps).max(r.laps);
  }

  // (race, driver, lap) → stop number, keyed on the in-lap and the out-lap.
  let mut stop_in: HashMap<(u32, u32, u32), u32> = HashMap::new();
  let mut stop_out: HashMap<(u32, u32, u32), u32> = HashMap::new();
  for p in pit_stops {
    stop_in.insert((p.race_id, p.driver_id, p.lap), p.stop);
    stop_out.insert((p.race_id, p.driver_id, p.lap + 1), p.stop);
  }

  let mut sequences: BTreeMap<(u32, u32), Vec<&RawLapTime>> = BTreeMap::new();
  for lap in lap_times {
    if !race_laps.contains_key(&lap.race_id) {
      continue;
    }
    sequences
      .entry((lap.race_id, lap.driver_id))
      .or_default()
      .push(lap);
  }

  let mut records = Vec::with_capacity(lap_times.len());
  for ((race_id, driver_id), mut laps) in sequences {
    laps.sort_by_key(|l| l.lap);

    let laps_all = race_laps[&race_id];
    let mut total_seconds = 0.0;
    let mut stops = 0u32;

    for raw in laps {
      let seconds = raw.milliseconds as f64 / 1000.0;
      total_seconds += seconds;

      let key = (race_id, driver_id, raw.lap);
      if let Some(&stop) = stop_out.get(&key) {
        stops = stops.max(stop);
      }

      records.push(LapRecord {
        race_id,
        driver_id,
        lap: raw.lap,
        race_laps: laps_all,
        pct_complete: if laps_all == 0 {
          0.0
        } else {
          raw.lap as f64 / laps_all as f64
        },
        position: raw.position,
        seconds,
        total_seconds,
        stops,
        stint: stops + 1,
        is_inlap: stop_in.contains_key(&key),
        is_outlap: stop_out.contains_key(&key),
      });
    }
  }
  records
}

// ─── Tests ───────────────────────────────────────────────────────────────────
