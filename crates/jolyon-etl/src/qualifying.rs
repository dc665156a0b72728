//! Qualifying: clock-string parsing, per-session ranking and the per-race
//! summary (escape times, pole, 107% threshold).

use std::{cmp::Ordering, collections::BTreeMap};

use jolyon_core::qualifying::{QualifyingRecord, QualifyingSummary};
use jolyon_ingest::raw::RawQualifying;

/// Lowest Q1 rank eliminated at the session cutoff; the rank-16 driver's
/// time is the Q1 escape time.
pub const Q1_CUTOFF_RANK: u32 = 16;
/// As above for Q2: rank 11 defines the escape time.
pub const Q2_CUTOFF_RANK: u32 = 11;

/// Parse a "minutes:seconds" clock string ("1:23.456" → 83.456).
///
/// Anything that does not fit the shape parses to `None` rather than an
/// error; absent and malformed times both mean "no time set".
pub fn parse_clock_time(raw: &str) -> Option<f64> {
  let raw = raw.trim();
  let (minutes, seconds) = raw.split_once(':')?;
  let minutes: u32 = minutes.parse().ok()?;
  let seconds: f64 = seconds.parse().ok()?;
  if !seconds.is_finite() || seconds < 0.0 {
    return None;
  }
  Some(60.0 * f64::from(minutes) + seconds)
}

/// Ascending by time with missing times last; ties broken by official
/// qualifying position, then driver id, so ranks are deterministic.
fn cmp_session(
  a_time: Option<f64>,
  a: &QualifyingRecord,
  b_time: Option<f64>,
  b: &QualifyingRecord,
) -> Ordering {
  match (a_time, b_time) {
    (Some(x), Some(y)) => x.total_cmp(&y),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
  .then_with(|| {
    let key = |r: &QualifyingRecord| (r.position.is_none(), r.position);
    key(a).cmp(&key(b))
  })
  .then(a.driver_id.cmp(&b.driver_id))
}

/// Assign a dense 1..K rank per race for one session.
fn assign_ranks(
  records: &mut [QualifyingRecord],
  time: impl Fn(&QualifyingRecord) -> Option<f64>,
  set_rank: impl Fn(&mut QualifyingRecord, u32),
) {
  let mut by_race: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
  for (idx, record) in records.iter().enumerate() {
    by_race.entry(record.race_id).or_default().push(idx);
  }

  for indices in by_race.values_mut() {
    indices.sort_by(|&a, &b| {
      cmp_session(time(&records[a]), &records[a], time(&records[b]), &records[b])
    });
    for (rank0, &idx) in indices.iter().enumerate() {
      set_rank(&mut records[idx], rank0 as u32 + 1);
    }
  }
}

/// Parse session times and rank every driver within each race's sessions.
pub fn normalize_qualifying(raw: &[RawQualifying]) -> Vec<QualifyingRecord> {
  let mut records: Vec<QualifyingRecord> = raw
    .iter()
    .map(|q| QualifyingRecord {
      race_id:   q.race_id,
      driver_id: q.driver_id,
      position:  q.position,
      q1: q.q1.as_deref().and_then(parse_clock_time),
      q2: q.q2.as_deref().and_then(parse_clock_time),
      q3: q.q3.as_deref().and_then(parse_clock_time),
      rank_q1: 0,
      rank_q2: 0,
      rank_q3: 0,
    })
    .collect();

  assign_ranks(&mut records, |r| r.q1, |r, rank| r.rank_q1 = rank);
  assign_ranks(&mut records, |r| r.q2, |r, rank| r.rank_q2 = rank);
  assign_ranks(&mut records, |r| r.q3, |r, rank| r.rank_q3 = rank);

  records.sort_by_key(|r| (r.race_id, r.position.is_none(), r.position, r.driver_id));
  records
}

/// One summary row per race present in the qualifying data.
///
/// Races with too few entrants for a cutoff (or with untimed cutoff
/// drivers) keep their row with the affected fields absent, rather than
/// being dropped.
pub fn summarize_qualifying(
  records: &[QualifyingRecord],
) -> Vec<QualifyingSummary> {
  let mut by_race: BTreeMap<u32, Vec<&QualifyingRecord>> = BTreeMap::new();
  for record in records {
    by_race.entry(record.race_id).or_default().push(record);
  }

  by_race
    .into_iter()
    .map(|(race_id, entries)| {
      let q1_escape_time = entries
        .iter()
        .find(|r| r.rank_q1 == Q1_CUTOFF_RANK)
        .and_then(|r| r.q1);
      let q2_escape_time = entries
        .iter()
        .find(|r| r.rank_q2 == Q2_CUTOFF_RANK)
        .and_then(|r| r.q2);
      let pole_time =
        entries.iter().find(|r| r.rank_q3 == 1).and_then(|r| r.q3);

      let best_time = entries
        .iter()
        .flat_map(|r| [r.q1, r.q2, r.q3])
        .flatten()
        .min_by(f64::total_cmp);

      QualifyingSummary {
        race_id,
        q1_escape_time,
        q2_escape_time,
        pole_time,
        best_time,
        time_107: pole_time.map(|pole| 1.07 * pole),
      }
    })
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(
    race_id: u32,
    driver_id: u32,
    position: u32,
    q1: Option<&str>,
    q2: Option<&str>,
    q3: Option<&str>,
  ) -> RawQualifying {
    RawQualifying {
      race_id,
      driver_id,
      position: Some(position),
      q1: q1.map(str::to_string),
      q2: q2.map(str::to_string),
      q3: q3.map(str::to_string),
    }
  }

  // ── Clock parsing ──────────────────────────────────────────────────────

  #[test]
  fn clock_string_parses_to_seconds() {
    assert!((parse_clock_time("1:23.456").unwrap() - 83.456).abs() < 1e-9);
    assert!((parse_clock_time("0:59.999").unwrap() - 59.999).abs() < 1e-9);
  }

  #[test]
  fn malformed_clock_strings_parse_to_none() {
    assert_eq!(parse_clock_time(""), None);
    assert_eq!(parse_clock_time("83.456"), None);
    assert_eq!(parse_clock_time("abc"), None);
    assert_eq!(parse_clock_time("1:xx.456"), None);
    assert_eq!(parse_clock_time("-1:23.456"), None);
  }

  // ── Ranking ────────────────────────────────────────────────────────────

  #[test]
  fn ranks_are_a_dense_permutation_with_missing_last() {
    let rows = vec![
      raw(1, 10, 3, Some("1:31.000"), None, None),
      raw(1, 11, 1, Some("1:29.000"), None, None),
      raw(1, 12, 4, None, None, None),
      raw(1, 13, 2, Some("1:30.000"), None, None),
    ];
    let records = normalize_qualifying(&rows);

    let rank_of = |driver: u32| {
      records
        .iter()
        .find(|r| r.driver_id == driver)
        .unwrap()
        .rank_q1
    };
    assert_eq!(rank_of(11), 1);
    assert_eq!(rank_of(13), 2);
    assert_eq!(rank_of(10), 3);
    assert_eq!(rank_of(12), 4, "missing time ranks last");

    let mut ranks: Vec<u32> = records.iter().map(|r| r.rank_q1).collect();
    ranks.sort();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
  }

  #[test]
  fn ranks_are_computed_per_race() {
    let rows = vec![
      raw(1, 10, 1, Some("1:31.000"), None, None),
      raw(2, 10, 1, Some("1:40.000"), None, None),
      raw(2, 11, 2, Some("1:39.000"), None, None),
    ];
    let records = normalize_qualifying(&rows);
    let rank = |race: u32, driver: u32| {
      records
        .iter()
        .find(|r| r.race_id == race && r.driver_id == driver)
        .unwrap()
        .rank_q1
    };
    assert_eq!(rank(1, 10), 1);
    assert_eq!(rank(2, 11), 1);
    assert_eq!(rank(2, 10), 2);
  }

  // ── Summary ────────────────────────────────────────────────────────────

  /// A 20-car session: Q1 times 1:30.000 through 1:31.900 in tenths, the
  /// fastest 10 also set Q2 times, the fastest 3 set Q3 times.
  fn full_field() -> Vec<RawQualifying> {
    (0..20u32)
      .map(|n| {
        let t = |base: f64| format!("1:{:06.3}", base + n as f64 / 10.0);
        raw(
          1,
          100 + n,
          n + 1,
          Some(&t(30.0)),
          (n < 10).then(|| t(28.0)).as_deref(),
          (n < 3).then(|| t(27.0)).as_deref(),
        )
      })
      .collect()
  }

  #[test]
  fn escape_pole_and_107_from_full_field() {
    let records = normalize_qualifying(&full_field());
    let summary = summarize_qualifying(&records);
    assert_eq!(summary.len(), 1);
    let s = &summary[0];

    // Rank 16 in Q1 is the driver at offset 15: 1:31.500.
    assert!((s.q1_escape_time.unwrap() - 91.5).abs() < 1e-9);
    // Rank 11 in Q2 ranks after the ten timed drivers → untimed → absent.
    assert_eq!(s.q2_escape_time, None);
    assert!((s.pole_time.unwrap() - 87.0).abs() < 1e-9);
    assert!((s.best_time.unwrap() - 87.0).abs() < 1e-9);
    assert!((s.time_107.unwrap() - 1.07 * 87.0).abs() < 1e-9);
  }

  #[test]
  fn short_field_emits_row_without_escape_times() {
    // Only 8 entrants: no rank 16 or 11 exists with a time.
    let rows: Vec<RawQualifying> = (0..8u32)
      .map(|n| {
        raw(1, 100 + n, n + 1, Some(&format!("1:3{}.000", n)), None, None)
      })
      .collect();
    let records = normalize_qualifying(&rows);
    let summary = summarize_qualifying(&records);

    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].q1_escape_time, None);
    assert_eq!(summary[0].q2_escape_time, None);
    assert_eq!(summary[0].pole_time, None);
    assert!(summary[0].best_time.is_some());
  }

  #[test]
  fn untimed_driver_contributes_no_summary_time() {
    let rows = vec![
      raw(1, 10, 1, Some("1:30.000"), None, Some("1:27.000")),
      raw(1, 11, 2, None, None, None),
    ];
    let records = normalize_qualifying(&rows);
    let summary = summarize_qualifying(&records);
    assert!((summary[0].best_time.unwrap() - 87.0).abs() < 1e-9);
    assert!((summary[0].pole_time.unwrap() - 87.0).abs() < 1e-9);
  }
}
