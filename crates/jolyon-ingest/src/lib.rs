//! Source loader for the Jolyon warehouse.
//!
//! Reads the fixed set of flat CSV tables of an Ergast-style dump from a
//! configured directory into typed in-memory rows. Ingestion is mechanical:
//! all cleanup beyond null decoding (`\N` → `None`) belongs to the ETL
//! stages in `jolyon-etl`.

pub mod error;
pub mod loader;
pub mod raw;

pub use error::{Error, Result};
pub use loader::{Dataset, SOURCE_FILES};
