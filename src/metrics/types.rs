use std::collections::BTreeMap;
use std::time::Duration;

/// Terminal result of one request attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { latency: Duration },
    Failure { category: String },
}

impl Outcome {
    #[must_use]
    pub const fn success(latency: Duration) -> Self {
        Self::Success { latency }
    }

    pub fn failure(category: impl Into<String>) -> Self {
        Self::Failure {
            category: category.into(),
        }
    }
}

/// Point-in-time view of the run, derived from the sampler state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub elapsed: Duration,
    pub requests_issued: u64,
    pub success_count: u64,
    pub error_count: u64,
    /// Issued requests per second, scaled by 100 (two decimal places).
    pub rps_x100: u64,
    pub avg_latency: Duration,
    pub p90: Duration,
    pub p95: Duration,
    pub p99: Duration,
    /// Failure counts keyed by category, ordered by category name.
    pub error_tally: BTreeMap<String, u64>,
}

impl Snapshot {
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.success_count.saturating_add(self.error_count)
    }

    #[must_use]
    pub const fn in_flight(&self) -> u64 {
        self.requests_issued.saturating_sub(self.completed())
    }
}
