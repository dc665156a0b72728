//! Transformation stages for the Jolyon warehouse.
//!
//! Every stage is a pure function over immutable table values: it takes
//! slices of upstream rows and returns a freshly built vector, so stages
//! compose without hidden state and are independently testable. The
//! pipeline in [`pipeline::run`] wires them together in dependency order:
//!
//!   Dataset
//!     ├─ normalize (drivers, races, constructors, pit stops)
//!     ├─ results::enrich_results
//!     ├─ laps::assemble_lap_times
//!     │    └─ deltas::compute_lap_time_deltas   (the core)
//!     └─ qualifying::normalize_qualifying
//!          └─ qualifying::summarize_qualifying

pub mod deltas;
pub mod laps;
pub mod normalize;
pub mod pipeline;
pub mod qualifying;
pub mod results;

pub use deltas::DEFAULT_CUTOFF_SEASON;
pub use pipeline::run;
