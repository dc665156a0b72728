//! Pipeline orchestration: one sequential pass from a loaded [`Dataset`] to
//! a finished [`Warehouse`].

use jolyon_core::Warehouse;
use jolyon_ingest::Dataset;

use crate::{deltas, laps, normalize, qualifying, results};

/// Run every transformation stage in dependency order.
///
/// Pure and synchronous: the same dataset and cutoff always produce the
/// same warehouse.
pub fn run(dataset: &Dataset, cutoff_season: u16) -> Warehouse {
  let races = normalize::normalize_races(&dataset.races);
  let drivers = normalize::normalize_drivers(&dataset.drivers);
  let constructors = normalize::normalize_constructors(&dataset.constructors);
  tracing::info!(
    races = races.len(),
    drivers = drivers.len(),
    constructors = constructors.len(),
    "reference tables normalized"
  );

  let results =
    results::enrich_results(&dataset.results, &dataset.races, &dataset.status);
  tracing::info!(rows = results.len(), "results enriched");

  let pit_stops = normalize::parse_pit_stops(&dataset.pit_stops);
  let lap_times =
    laps::assemble_lap_times(&dataset.lap_times, &pit_stops, &dataset.results);
  tracing::info!(rows = lap_times.len(), "lap times assembled");

  let lap_time_deltas =
    deltas::compute_lap_time_deltas(&results, &lap_times, cutoff_season);
  tracing::info!(
    rows = lap_time_deltas.len(),
    cutoff_season,
    "lap time deltas computed"
  );

  let qualifying = qualifying::normalize_qualifying(&dataset.qualifying);
  let qualifying_summary = qualifying::summarize_qualifying(&qualifying);
  tracing::info!(
    rows = qualifying.len(),
    summaries = qualifying_summary.len(),
    "qualifying wrangled"
  );

  Warehouse {
    races,
    drivers,
    constructors,
    results,
    lap_times,
    lap_time_deltas,
    qualifying,
    qualifying_summary,
  }
}
