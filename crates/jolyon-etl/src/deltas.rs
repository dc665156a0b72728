//! Lap-time-delta engine.
//!
//! For every race in or after the cutoff season, for every lap with timing
//! data, for every ordered pair of distinct drivers who started the race,
//! compute the time separation between the driver ahead and the driver
//! behind. A side with no lap record for the lap was either not yet at that
//! lap number (lapped) or out of the race (retired); the flags split that
//! signal using the driver's final classification. When a side's official
//! on-track position is unavailable, a substitute is inferred by re-ranking
//! its peers, so the ordering stays usable on laps without transponder data.

use std::{
  cmp::Ordering,
  collections::{BTreeMap, BTreeSet, HashMap},
};

use jolyon_core::{delta::LapTimeDelta, laps::LapRecord, result::RaceResult};

/// Deltas are only computed for seasons at or after this year unless the
/// caller overrides it; earlier seasons lack per-lap timing data.
pub const DEFAULT_CUTOFF_SEASON: u16 = 2005;

/// One candidate pair on one lap, before position resolution.
struct PairRow<'a> {
  ahead:      &'a RaceResult,
  behind:     &'a RaceResult,
  rec_ahead:  Option<&'a LapRecord>,
  rec_behind: Option<&'a LapRecord>,
  position_ahead:  u32,
  position_behind: u32,
}

/// Official position when the lap record exists; the dense peer rank
/// otherwise. The explicit two-branch form keeps "no transponder data" from
/// silently leaking into arithmetic.
fn resolve_position(record: Option<&LapRecord>, inferred_rank: u32) -> u32 {
  match record {
    Some(rec) => rec.position,
    None => inferred_rank,
  }
}

/// Order one side of a pair by running position: cumulative race time
/// (missing last), then final finish position, then driver id so the order
/// is total.
fn cmp_running(
  a_rec: Option<&LapRecord>,
  a_result: &RaceResult,
  b_rec: Option<&LapRecord>,
  b_result: &RaceResult,
) -> Ordering {
  match (a_rec, b_rec) {
    (Some(a), Some(b)) => a.total_seconds.total_cmp(&b.total_seconds),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
  .then(a_result.finish_position.cmp(&b_result.finish_position))
  .then(a_result.driver_id.cmp(&b_result.driver_id))
}

pub fn compute_lap_time_deltas(
  results: &[RaceResult],
  lap_times: &[LapRecord],
  cutoff_season: u16,
) -> Vec<LapTimeDelta> {
  // Entrants per race, cutoff applied.
  let mut entrants: BTreeMap<u32, Vec<&RaceResult>> = BTreeMap::new();
  for result in results.iter().filter(|r| r.year >= cutoff_season) {
    entrants.entry(result.race_id).or_default().push(result);
  }
  for field in entrants.values_mut() {
    field.sort_by_key(|r| r.driver_id);
  }

  // Lap record index plus the candidate lap set per race.
  let mut records: HashMap<(u32, u32, u32), &LapRecord> = HashMap::new();
  let mut race_lap_numbers: HashMap<u32, BTreeSet<u32>> = HashMap::new();
  for record in lap_times {
    records.insert((record.race_id, record.driver_id, record.lap), record);
    race_lap_numbers
      .entry(record.race_id)
      .or_default()
      .insert(record.lap);
  }

  let mut deltas = Vec::new();
  for (&race_id, field) in &entrants {
    let Some(lap_numbers) = race_lap_numbers.get(&race_id) else {
      continue; // no timing data at all for this race
    };
    for &lap in lap_numbers {
      lap_block(race_id, lap, field, &records, &mut deltas);
    }
  }
  deltas
}

/// Build, resolve and order all pair rows of one (race, lap) block.
fn lap_block(
  race_id: u32,
  lap: u32,
  field: &[&RaceResult],
  records: &HashMap<(u32, u32, u32), &LapRecord>,
  deltas: &mut Vec<LapTimeDelta>,
) {
  let mut rows: Vec<PairRow<'_>> = Vec::new();
  for &ahead in field {
    for &behind in field {
      if ahead.driver_id == behind.driver_id {
        continue;
      }
      let rec_ahead =
        records.get(&(race_id, ahead.driver_id, lap)).copied();
      let rec_behind =
        records.get(&(race_id, behind.driver_id, lap)).copied();
      // Neither driver reached this lap; nothing to separate.
      if rec_ahead.is_none() && rec_behind.is_none() {
        continue;
      }
      rows.push(PairRow {
        ahead,
        behind,
        rec_ahead,
        rec_behind,
        position_ahead: 0,
        position_behind: 0,
      });
    }
  }

  // Infer missing behind positions: rank all behind counterparts sharing
  // the same ahead driver by running order, then substitute the dense rank
  // wherever the official position is absent. Mirrored for ahead.
  let mut by_ahead: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
  let mut by_behind: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
  for (idx, row) in rows.iter().enumerate() {
    by_ahead.entry(row.ahead.driver_id).or_default().push(idx);
    by_behind.entry(row.behind.driver_id).or_default().push(idx);
  }

  for peer_indices in by_ahead.values_mut() {
    peer_indices.sort_by(|&a, &b| {
      cmp_running(
        rows[a].rec_behind,
        rows[a].behind,
        rows[b].rec_behind,
        rows[b].behind,
      )
    });
    for (rank0, &idx) in peer_indices.iter().enumerate() {
      rows[idx].position_behind =
        resolve_position(rows[idx].rec_behind, rank0 as u32 + 1);
    }
  }

  for peer_indices in by_behind.values_mut() {
    peer_indices.sort_by(|&a, &b| {
      cmp_running(
        rows[a].rec_ahead,
        rows[a].ahead,
        rows[b].rec_ahead,
        rows[b].ahead,
      )
    });
    for (rank0, &idx) in peer_indices.iter().enumerate() {
      rows[idx].position_ahead =
        resolve_position(rows[idx].rec_ahead, rank0 as u32 + 1);
    }
  }

  // Deterministic total order: positions, then cumulative times (missing
  // last), then finish positions, then driver ids.
  rows.sort_by(|a, b| {
    a.position_ahead
      .cmp(&b.position_ahead)
      .then(a.position_behind.cmp(&b.position_behind))
      .then_with(|| cmp_running(a.rec_ahead, a.ahead, b.rec_ahead, b.ahead))
      .then_with(|| {
        cmp_running(a.rec_behind, a.behind, b.rec_behind, b.behind)
      })
  });

  for row in rows {
    let is_lap_down_ahead =
      row.rec_ahead.is_none() && row.ahead.finished_running;
    let is_lap_down_behind =
      row.rec_behind.is_none() && row.behind.finished_running;

    deltas.push(LapTimeDelta {
      race_id,
      lap,
      position_ahead: row.position_ahead,
      position_behind: row.position_behind,
      driver_id_ahead: row.ahead.driver_id,
      driver_id_behind: row.behind.driver_id,
      lap_time_delta: row
        .rec_ahead
        .zip(row.rec_behind)
        .map(|(a, b)| a.seconds - b.seconds),
      race_time_delta: row
        .rec_ahead
        .zip(row.rec_behind)
        .map(|(a, b)| a.total_seconds - b.total_seconds),
      is_lap_down_ahead,
      is_retired_ahead: row.rec_ahead.is_none() && !is_lap_down_ahead,
      is_lap_down_behind,
      is_retired_behind: row.rec_behind.is_none() && !is_lap_down_behind,
    });
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
