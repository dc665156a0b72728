//! Error type for `jolyon-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("failed to remove existing database {}: {source}", path.display())]
  Remove {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A row failed to insert. The whole table load is rolled back; nothing
  /// skips and continues past a bad row.
  #[error("insert into {table} failed at row {row}: {source}")]
  RowInsert {
    table:  &'static str,
    row:    usize,
    #[source]
    source: rusqlite::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
