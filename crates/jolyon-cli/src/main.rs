//! `jolyon` — build and query the Formula 1 lap-time warehouse.
//!
//! # Usage
//!
//! ```
//! jolyon build --data-dir ./data --database jolyon.db
//! jolyon query "SELECT COUNT(*) FROM lap_time_deltas"
//! ```
//!
//! Settings layer as CLI flags over `JOLYON_*` environment variables over
//! the TOML config file, highest first.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use jolyon_etl::DEFAULT_CUTOFF_SEASON;
use jolyon_ingest::Dataset;
use jolyon_store_sqlite::Database;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "jolyon", about = "Formula 1 lap-time warehouse builder")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "jolyon.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Ingest the CSV dump, run the pipeline and (re)build the database.
  Build {
    /// Directory holding the CSV source files.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output database file. Any existing file is replaced.
    #[arg(long, value_name = "FILE")]
    database: Option<PathBuf>,

    /// First season included in the lap-time delta tables.
    #[arg(long, value_name = "YEAR")]
    cutoff_season: Option<u16>,
  },

  /// Run a SQL statement against a built database and print the rows.
  Query {
    /// Database file to query.
    #[arg(long, value_name = "FILE")]
    database: Option<PathBuf>,

    /// The SQL statement to run.
    sql: String,
  },
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Shape of the config file / environment settings.
#[derive(Deserialize)]
struct Settings {
  #[serde(default = "default_data_dir")]
  data_dir:      PathBuf,
  #[serde(default = "default_database")]
  database:      PathBuf,
  #[serde(default = "default_cutoff_season")]
  cutoff_season: u16,
}

fn default_data_dir() -> PathBuf {
  PathBuf::from("data")
}

fn default_database() -> PathBuf {
  PathBuf::from("jolyon.db")
}

fn default_cutoff_season() -> u16 {
  DEFAULT_CUTOFF_SEASON
}

impl Settings {
  fn load(path: &PathBuf) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.clone()).required(false))
      .add_source(config::Environment::with_prefix("JOLYON"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  match cli.command {
    Command::Build {
      data_dir,
      database,
      cutoff_season,
    } => {
      let data_dir = data_dir.unwrap_or(settings.data_dir);
      let database = database.unwrap_or(settings.database);
      let cutoff_season = cutoff_season.unwrap_or(settings.cutoff_season);

      let dataset = Dataset::load_dir(&data_dir)
        .with_context(|| format!("loading CSV dump from {data_dir:?}"))?;

      let warehouse = jolyon_etl::run(&dataset, cutoff_season);

      let mut db = Database::create(&database)
        .with_context(|| format!("creating database at {database:?}"))?;
      db.load(&warehouse).context("loading warehouse tables")?;

      tracing::info!(path = %database.display(), "database built");
      Ok(())
    }

    Command::Query { database, sql } => {
      let database = database.unwrap_or(settings.database);
      let db = Database::open(&database)
        .with_context(|| format!("opening database at {database:?}"))?;
      let result = db.query(&sql).context("query failed")?;
      print!("{result}");
      Ok(())
    }
  }
}
