//! [`Database`] — the explicit SQLite handle for warehouse loads and ad hoc
//! queries.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, Statement, params, types::Value};

use jolyon_core::{
  Warehouse,
  delta::LapTimeDelta,
  entity::{Constructor, Driver, Race},
  laps::LapRecord,
  qualifying::{QualifyingRecord, QualifyingSummary},
  result::RaceResult,
};

use crate::{Error, Result, schema::SCHEMA};

/// Dates are stored as plain ISO 8601 text.
fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

/// A Jolyon warehouse backed by a single SQLite file (or memory).
pub struct Database {
  conn: Connection,
}

impl Database {
  /// Destroy any existing database at `path` and stand up a fresh, empty
  /// one. This is the write path: a pipeline run always rebuilds from
  /// scratch, never incrementally.
  pub fn create(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      std::fs::remove_file(path).map_err(|source| Error::Remove {
        path: path.to_path_buf(),
        source,
      })?;
      tracing::debug!(path = %path.display(), "removed existing database");
    }
    Self::open(path)
  }

  /// Open (or create) a database at `path` for querying. Schema creation
  /// is idempotent, so opening an already-built store changes nothing.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// In-memory database — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// Bulk-load a complete warehouse, one transaction per table.
  pub fn load(&mut self, warehouse: &Warehouse) -> Result<()> {
    self.insert_races(&warehouse.races)?;
    self.insert_drivers(&warehouse.drivers)?;
    self.insert_constructors(&warehouse.constructors)?;
    self.insert_results(&warehouse.results)?;
    self.insert_lap_times(&warehouse.lap_times)?;
    self.insert_lap_time_deltas(&warehouse.lap_time_deltas)?;
    self.insert_qualifying(&warehouse.qualifying)?;
    self.insert_qualifying_summary(&warehouse.qualifying_summary)?;
    Ok(())
  }

  // ── Per-table bulk inserts ────────────────────────────────────────────

  pub fn insert_races(&mut self, rows: &[Race]) -> Result<()> {
    bulk_insert(
      &mut self.conn,
      "races",
      "INSERT INTO races (race_id, year, round, circuit_id, name, date)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      rows,
      |stmt, r| {
        stmt.execute(params![
          r.race_id,
          r.year,
          r.round,
          r.circuit_id,
          r.name,
          encode_date(r.date),
        ])
      },
    )
  }

  pub fn insert_drivers(&mut self, rows: &[Driver]) -> Result<()> {
    bulk_insert(
      &mut self.conn,
      "drivers",
      "INSERT INTO drivers (driver_id, number, code, name, birth_date, nationality)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      rows,
      |stmt, d| {
        stmt.execute(params![
          d.driver_id,
          d.number,
          d.code,
          d.name,
          d.dob.map(encode_date),
          d.nationality,
        ])
      },
    )
  }

  pub fn insert_constructors(&mut self, rows: &[Constructor]) -> Result<()> {
    bulk_insert(
      &mut self.conn,
      "constructors",
      "INSERT INTO constructors (constructor_id, name, nationality)
       VALUES (?1, ?2, ?3)",
      rows,
      |stmt, c| stmt.execute(params![c.constructor_id, c.name, c.nationality]),
    )
  }

  pub fn insert_results(&mut self, rows: &[RaceResult]) -> Result<()> {
    bulk_insert(
      &mut self.conn,
      "results",
      "INSERT INTO results (
         year, race_id, driver_id, constructor_id, grid, position,
         classification, laps, pct_complete, not_on_grid, pitlane_start,
         points, status, finished_running
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
      rows,
      |stmt, r| {
        stmt.execute(params![
          r.year,
          r.race_id,
          r.driver_id,
          r.constructor_id,
          r.grid,
          r.finish_position,
          r.classification.code(),
          r.laps,
          r.pct_complete,
          r.not_on_grid,
          r.pitlane_start,
          r.points,
          r.status,
          r.finished_running,
        ])
      },
    )
  }

  pub fn insert_lap_times(&mut self, rows: &[LapRecord]) -> Result<()> {
    bulk_insert(
      &mut self.conn,
      "lap_times",
      "INSERT INTO lap_times (
         race_id, driver_id, lap, race_laps, pct_complete, seconds,
         total_seconds, position, stops, stint, is_inlap, is_outlap
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
      rows,
      |stmt, l| {
        stmt.execute(params![
          l.race_id,
          l.driver_id,
          l.lap,
          l.race_laps,
          l.pct_complete,
          l.seconds,
          l.total_seconds,
          l.position,
          l.stops,
          l.stint,
          l.is_inlap,
          l.is_outlap,
        ])
      },
    )
  }

  pub fn insert_lap_time_deltas(&mut self, rows: &[LapTimeDelta]) -> Result<()> {
    bulk_insert(
      &mut self.conn,
      "lap_time_deltas",
      "INSERT INTO lap_time_deltas (
         race_id, lap, position_ahead, position_behind, driver_id_ahead,
         driver_id_behind, lap_time_delta, race_time_delta,
         is_lap_down_ahead, is_retired_ahead, is_lap_down_behind,
         is_retired_behind
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
      rows,
      |stmt, d| {
        stmt.execute(params![
          d.race_id,
          d.lap,
          d.position_ahead,
          d.position_behind,
          d.driver_id_ahead,
          d.driver_id_behind,
          d.lap_time_delta,
          d.race_time_delta,
          d.is_lap_down_ahead,
          d.is_retired_ahead,
          d.is_lap_down_behind,
          d.is_retired_behind,
        ])
      },
    )
  }

  pub fn insert_qualifying(&mut self, rows: &[QualifyingRecord]) -> Result<()> {
    bulk_insert(
      &mut self.conn,
      "qualifying",
      "INSERT INTO qualifying (
         race_id, driver_id, position, q1, q2, q3, rank_q1, rank_q2, rank_q3
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
      rows,
      |stmt, q| {
        stmt.execute(params![
          q.race_id,
          q.driver_id,
          q.position,
          q.q1,
          q.q2,
          q.q3,
          q.rank_q1,
          q.rank_q2,
          q.rank_q3,
        ])
      },
    )
  }

  pub fn insert_qualifying_summary(
    &mut self,
    rows: &[QualifyingSummary],
  ) -> Result<()> {
    bulk_insert(
      &mut self.conn,
      "qualifying_summary",
      "INSERT INTO qualifying_summary (
         race_id, q1_escape_time, q2_escape_time, pole_time, best_time,
         time_107
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      rows,
      |stmt, s| {
        stmt.execute(params![
          s.race_id,
          s.q1_escape_time,
          s.q2_escape_time,
          s.pole_time,
          s.best_time,
          s.time_107,
        ])
      },
    )
  }

  // ── Ad hoc reads ──────────────────────────────────────────────────────

  /// Run an arbitrary SQL statement and collect the result as a dynamic
  /// table.
  pub fn query(&self, sql: &str) -> Result<QueryResult> {
    let mut stmt = self.conn.prepare(sql)?;
    let columns: Vec<String> =
      stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = stmt.column_count();

    let rows = stmt
      .query_map([], |row| {
        (0..column_count)
          .map(|i| row.get::<_, Value>(i))
          .collect::<rusqlite::Result<Vec<Value>>>()
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(QueryResult { columns, rows })
  }
}

/// Insert `rows` through one prepared statement inside one transaction.
/// The first failing row aborts the load with its table and index; the
/// transaction rolls back on drop.
fn bulk_insert<T>(
  conn: &mut Connection,
  table: &'static str,
  sql: &str,
  rows: &[T],
  bind: impl Fn(&mut Statement<'_>, &T) -> rusqlite::Result<usize>,
) -> Result<()> {
  let tx = conn.transaction()?;
  {
    let mut stmt = tx.prepare(sql)?;
    for (idx, row) in rows.iter().enumerate() {
      bind(&mut stmt, row).map_err(|source| Error::RowInsert {
        table,
        row: idx,
        source,
      })?;
    }
  }
  tx.commit()?;
  tracing::debug!(table, rows = rows.len(), "table loaded");
  Ok(())
}

// ─── Query result ────────────────────────────────────────────────────────────

/// Column names plus dynamically-typed rows from an ad hoc query.
#[derive(Debug, Clone)]
pub struct QueryResult {
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<Value>>,
}

impl std::fmt::Display for QueryResult {
  /// Tab-separated, one header line then one line per row; NULL renders
  /// as an empty cell.
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "{}", self.columns.join("\t"))?;
    for row in &self.rows {
      let cells: Vec<String> = row
        .iter()
        .map(|value| match value {
          Value::Null => String::new(),
          Value::Integer(i) => i.to_string(),
          Value::Real(r) => r.to_string(),
          Value::Text(t) => t.clone(),
          Value::Blob(b) => format!("<{} bytes>", b.len()),
        })
        .collect();
      writeln!(f, "{}", cells.join("\t"))?;
    }
    Ok(())
  }
}
