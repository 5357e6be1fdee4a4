//! Workload replay and associativity search.
//!
//! This module drives caches with recorded workloads. It provides:
//! 1. **Traces:** Tagged `(key, value, operation)` entries, loadable from JSON.
//! 2. **Optimizer:** Replays one trace against every way-count and reports which one caused
//!    the fewest backing-store fetches.

/// Associativity optimizer.
pub mod optimizer;

/// Recorded operation traces.
pub mod trace;

pub use optimizer::{Candidate, OptimizerReport, lowest_miss_ways, optimize, optimize_with_hasher};
pub use trace::{TraceEntry, TraceError};
