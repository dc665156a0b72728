//! Error type for `jolyon-ingest`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The source directory does not hold the complete fixed file set.
  #[error("missing source files in {}: {}", dir.display(), files.join(", "))]
  MissingSources { dir: PathBuf, files: Vec<String> },

  /// A consumed file failed to open or a row failed to decode. Fatal: the
  /// job is an offline batch, re-running after fixing the dump is the
  /// recovery path.
  #[error("failed to read {file}: {source}")]
  Csv {
    file:   String,
    #[source]
    source: csv::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
