//! Outcome collection and run statistics.
mod sampler;
mod types;


pub use sampler::{Sampler, percentile};
pub use types::{Outcome, Snapshot};

/// Nearest-rank percentiles reported on the final render, in per-mille.
pub const P90: u64 = 900;
pub const P95: u64 = 950;
pub const P99: u64 = 990;
