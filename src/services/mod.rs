//! Pure analysis services.
//!
//! Every function here is deterministic and side-effect free: it takes
//! immutable sample data and returns freshly built result values. I/O lives
//! in the provider and HTTP layers; the orchestrator in [`analyzer`] is the
//! only service touching async code.

pub mod analyzer;
pub mod distribution;
pub mod statistics;
pub mod trend;

pub use analyzer::{analyze, Analyzer};
pub use distribution::compute_probabilities;
pub use statistics::{compute_statistics, percentile};
pub use trend::fit_trend;
