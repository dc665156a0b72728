//! Core domain types for the Jolyon race-data warehouse.
//!
//! This crate is deliberately free of I/O and database dependencies.
//! All other crates depend on it; it depends on nothing but `chrono` and
//! `serde`. Every type here is an immutable snapshot produced once per ETL
//! run — each derived table is a pure function of upstream tables.

pub mod delta;
pub mod entity;
pub mod laps;
pub mod qualifying;
pub mod result;
pub mod warehouse;

pub use warehouse::Warehouse;
