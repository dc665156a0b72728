//! Integration tests for [`Database`] against in-memory and temp-file
//! stores.

use chrono::NaiveDate;
use rusqlite::types::Value;

use jolyon_core::{
  Warehouse,
  delta::LapTimeDelta,
  entity::{Constructor, Driver, Race},
  laps::LapRecord,
  qualifying::{QualifyingRecord, QualifyingSummary},
  result::{Classification, RaceResult},
};

use crate::Database;

fn sample_warehouse() -> Warehouse {
  Warehouse {
    races: vec![Race {
      race_id:    1,
      year:       2021,
      round:      1,
      circuit_id: 3,
      name:       "Bahrain Grand Prix".into(),
      date:       NaiveDate::from_ymd_opt(2021, 3, 28).unwrap(),
    }],
    drivers: vec![Driver {
      driver_id:   1,
      number:      Some(44),
      code:        Some("HAM".into()),
      name:        "Lewis Hamilton".into(),
      dob:         NaiveDate::from_ymd_opt(1985, 1, 7),
      nationality: Some("British".into()),
    }],
    constructors: vec![Constructor {
      constructor_id: 131,
      name:           "Mercedes".into(),
      nationality:    Some("German".into()),
    }],
    results: vec![RaceResult {
      race_id:          1,
      driver_id:        1,
      constructor_id:   131,
      year:             2021,
      grid:             2,
      not_on_grid:      false,
      pitlane_start:    false,
      finish_position:  1,
      classification:   Classification::Ranked(1),
      laps:             56,
      pct_complete:     1.0,
      points:           25.0,
      status:           "Finished".into(),
      finished_running: true,
    }],
    lap_times: vec![LapRecord {
      race_id:       1,
      driver_id:     1,
      lap:           1,
      race_laps:     56,
      pct_complete:  1.0 / 56.0,
      position:      2,
      seconds:       95.3,
      total_seconds: 95.3,
      stops:         0,
      stint:         1,
      is_inlap:      false,
      is_outlap:     false,
    }],
    lap_time_deltas: vec![LapTimeDelta {
      race_id:            1,
      lap:                1,
      position_ahead:     1,
      position_behind:    2,
      driver_id_ahead:    2,
      driver_id_behind:   1,
      lap_time_delta:     Some(-0.7),
      race_time_delta:    None,
      is_lap_down_ahead:  false,
      is_retired_ahead:   false,
      is_lap_down_behind: false,
      is_retired_behind:  true,
    }],
    qualifying: vec![QualifyingRecord {
      race_id:   1,
      driver_id: 1,
      position:  Some(2),
      q1: Some(90.499),
      q2: Some(90.059),
      q3: None,
      rank_q1: 1,
      rank_q2: 1,
      rank_q3: 20,
    }],
    qualifying_summary: vec![QualifyingSummary {
      race_id:        1,
      q1_escape_time: Some(92.5),
      q2_escape_time: None,
      pole_time:      Some(89.385),
      best_time:      Some(89.385),
      time_107:       Some(1.07 * 89.385),
    }],
  }
}

fn count(db: &Database, table: &str) -> i64 {
  let result = db.query(&format!("SELECT COUNT(*) FROM {table}")).unwrap();
  let Value::Integer(n) = result.rows[0][0] else {
    panic!("expected integer count")
  };
  n
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[test]
fn load_fills_all_eight_tables() {
  let mut db = Database::open_in_memory().unwrap();
  db.load(&sample_warehouse()).unwrap();

  for table in [
    "races",
    "drivers",
    "constructors",
    "results",
    "lap_times",
    "lap_time_deltas",
    "qualifying",
    "qualifying_summary",
  ] {
    assert_eq!(count(&db, table), 1, "{table} should hold one row");
  }
}

#[test]
fn flags_persist_as_zero_or_one() {
  let mut db = Database::open_in_memory().unwrap();
  db.load(&sample_warehouse()).unwrap();

  let result = db
    .query(
      "SELECT is_retired_behind, is_lap_down_behind FROM lap_time_deltas",
    )
    .unwrap();
  assert_eq!(result.rows[0][0], Value::Integer(1));
  assert_eq!(result.rows[0][1], Value::Integer(0));
}

#[test]
fn missing_deltas_persist_as_null() {
  let mut db = Database::open_in_memory().unwrap();
  db.load(&sample_warehouse()).unwrap();

  let result = db
    .query("SELECT lap_time_delta, race_time_delta FROM lap_time_deltas")
    .unwrap();
  assert!(matches!(result.rows[0][0], Value::Real(_)));
  assert_eq!(result.rows[0][1], Value::Null);
}

#[test]
fn dates_persist_as_iso_text() {
  let mut db = Database::open_in_memory().unwrap();
  db.load(&sample_warehouse()).unwrap();

  let result = db.query("SELECT date FROM races").unwrap();
  assert_eq!(result.rows[0][0], Value::Text("2021-03-28".into()));
}

#[test]
fn classification_persists_as_code() {
  let mut db = Database::open_in_memory().unwrap();
  let mut warehouse = sample_warehouse();
  warehouse.results[0].classification = Classification::Retired;
  db.load(&warehouse).unwrap();

  let result = db.query("SELECT classification FROM results").unwrap();
  assert_eq!(result.rows[0][0], Value::Integer(99));
}

// ─── Rebuild semantics ───────────────────────────────────────────────────────

#[test]
fn create_destroys_and_recreates() {
  let path = std::env::temp_dir().join("jolyon-store-recreate.db");

  let mut db = Database::create(&path).unwrap();
  db.load(&sample_warehouse()).unwrap();
  assert_eq!(count(&db, "races"), 1);
  drop(db);

  // A second create starts from empty, not from the previous contents.
  let db = Database::create(&path).unwrap();
  assert_eq!(count(&db, "races"), 0);

  drop(db);
  std::fs::remove_file(&path).ok();
}

#[test]
fn open_is_idempotent_on_existing_store() {
  let path = std::env::temp_dir().join("jolyon-store-reopen.db");

  let mut db = Database::create(&path).unwrap();
  db.load(&sample_warehouse()).unwrap();
  drop(db);

  // Re-opening runs the idempotent DDL and keeps the data.
  let db = Database::open(&path).unwrap();
  assert_eq!(count(&db, "races"), 1);

  drop(db);
  std::fs::remove_file(&path).ok();
}

// ─── Ad hoc queries ──────────────────────────────────────────────────────────

#[test]
fn query_returns_columns_and_rows() {
  let mut db = Database::open_in_memory().unwrap();
  db.load(&sample_warehouse()).unwrap();

  let result = db
    .query("SELECT name, year FROM races WHERE race_id = 1")
    .unwrap();
  assert_eq!(result.columns, vec!["name", "year"]);
  assert_eq!(result.rows.len(), 1);
  assert_eq!(result.rows[0][0], Value::Text("Bahrain Grand Prix".into()));
  assert_eq!(result.rows[0][1], Value::Integer(2021));
}

#[test]
fn query_display_renders_tsv_with_empty_nulls() {
  let mut db = Database::open_in_memory().unwrap();
  db.load(&sample_warehouse()).unwrap();

  let result = db
    .query("SELECT race_id, q2_escape_time FROM qualifying_summary")
    .unwrap();
  let rendered = result.to_string();
  assert_eq!(rendered, "race_id\tq2_escape_time\n1\t\n");
}

#[test]
fn bad_sql_is_an_error() {
  let db = Database::open_in_memory().unwrap();
  assert!(db.query("SELECT nope FROM nowhere").is_err());
}
