//! Result enrichment: join raw results with race metadata and the status
//! lookup, then derive completion, classification and grid flags.

use std::collections::HashMap;

use jolyon_core::result::{Classification, GRID_SENTINEL, RaceResult};
use jolyon_ingest::raw::{RawRace, RawResult, RawStatus};

/// Status texts that mean the driver was still circulating at the flag:
/// "Finished" exactly, or any lapped variant ("+1 Lap", "+2 Laps", ...).
fn finished_running(status: &str) -> bool {
  status == "Finished" || status.contains("Lap")
}

/// One enriched row per (race, driver). Results whose race is absent from
/// the race table are dropped (inner-join semantics).
pub fn enrich_results(
  results: &[RawResult],
  races: &[RawRace],
  status: &[RawStatus],
) -> Vec<RaceResult> {
  let year_of: HashMap<u32, u16> =
    races.iter().map(|r| (r.race_id, r.year)).collect();

  let status_of: HashMap<u32, &str> = status
    .iter()
    .map(|s| (s.status_id, s.status.as_str()))
    .collect();

  // Max laps completed by any driver, per race; the denominator of
  // pct_complete.
  let mut race_laps: HashMap<u32, u32> = HashMap::new();
  for r in results {
    let laps = race_laps.entry(r.race_id).or_default();
    *laps = (*laps).max(r.laps);
  }

  let mut enriched: Vec<RaceResult> = results
    .iter()
    .filter_map(|r| {
      let year = *year_of.get(&r.race_id)?;
      let laps_all = *race_laps.get(&r.race_id).unwrap_or(&0);
      let status = status_of.get(&r.status_id).copied().unwrap_or("");

      let not_on_grid = r.grid == 0;
      let grid = if not_on_grid { GRID_SENTINEL } else { r.grid };

      Some(RaceResult {
        race_id:        r.race_id,
        driver_id:      r.driver_id,
        constructor_id: r.constructor_id,
        year,
        grid,
        not_on_grid,
        pitlane_start: grid == GRID_SENTINEL && not_on_grid,
        finish_position: r.position_order,
        classification: Classification::from_position_text(
          &r.position_text,
          r.position_order,
        ),
        laps: r.laps,
        pct_complete: if laps_all == 0 {
          0.0
        } else {
          r.laps as f64 / laps_all as f64
        },
        points: r.points,
        status: status.to_string(),
        finished_running: finished_running(status),
      })
    })
    .collect();

  enriched.sort_by_key(|r| (r.race_id, r.finish_position, r.driver_id));
  enriched
}

// ─── Tests ───────────────────────────────────────────────────────────────────
