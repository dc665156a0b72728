//! SQLite backend for the Jolyon warehouse.
//!
//! The database is an explicit [`Database`] handle passed to every call —
//! there is no implicit default database — so multiple output targets and
//! isolated test databases work the same way. A warehouse load is
//! destructive: [`Database::create`] removes any existing file and rebuilds
//! the store from empty.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{Database, QueryResult};

#[cfg(test)]
mod tests;
