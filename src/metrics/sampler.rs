use std::collections::BTreeMap;
use std::time::Duration;

use super::types::{Outcome, Snapshot};
use super::{P90, P95, P99};

const PER_MILLE: u64 = 1_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const RPS_SCALE: u128 = 100;

/// Accumulates outcomes for one run.
///
/// The sampler has a single owner (the dispatch loop); every mutation goes
/// through `&mut self`, so no locking is involved. Latencies are kept as a
/// sorted prefix plus an unsorted tail that is merged in on `snapshot`.
/// Every success latency is retained for the whole run, 16 bytes per sample.
#[derive(Debug, Default)]
pub struct Sampler {
    requests_issued: u64,
    success_count: u64,
    error_count: u64,
    latency_sum_nanos: u128,
    sorted_latencies: Vec<Duration>,
    pending_latencies: Vec<Duration>,
    error_tally: BTreeMap<String, u64>,
}

impl Sampler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a launched request. Called at launch time, before its outcome exists.
    pub const fn record_issued(&mut self) {
        self.requests_issued = self.requests_issued.saturating_add(1);
    }

    pub fn ingest(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success { latency } => {
                self.success_count = self.success_count.saturating_add(1);
                self.latency_sum_nanos = self.latency_sum_nanos.saturating_add(latency.as_nanos());
                self.pending_latencies.push(latency);
            }
            Outcome::Failure { category } => {
                self.error_count = self.error_count.saturating_add(1);
                let count = self.error_tally.entry(category).or_insert(0);
                *count = count.saturating_add(1);
            }
        }
    }

    #[must_use]
    pub const fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.success_count.saturating_add(self.error_count)
    }

    /// Issued requests whose outcome has not been ingested yet.
    #[must_use]
    pub const fn in_flight(&self) -> u64 {
        self.requests_issued.saturating_sub(self.completed())
    }

    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = u128::from(self.success_count);
        let avg_nanos = self.latency_sum_nanos.checked_div(count).unwrap_or(0);
        duration_from_nanos(avg_nanos)
    }

    /// Builds a snapshot for a run that has been going for `elapsed`.
    pub fn snapshot(&mut self, elapsed: Duration) -> Snapshot {
        let sorted = self.sorted_view();
        let p90 = percentile(sorted, P90);
        let p95 = percentile(sorted, P95);
        let p99 = percentile(sorted, P99);

        Snapshot {
            elapsed,
            requests_issued: self.requests_issued,
            success_count: self.success_count,
            error_count: self.error_count,
            rps_x100: rate_x100(self.requests_issued, elapsed),
            avg_latency: self.average_latency(),
            p90,
            p95,
            p99,
            error_tally: self.error_tally.clone(),
        }
    }

    /// All success latencies in ascending order.
    pub fn sorted_view(&mut self) -> &[Duration] {
        if !self.pending_latencies.is_empty() {
            self.pending_latencies.sort_unstable();
            self.sorted_latencies.append(&mut self.pending_latencies);
            // Two ascending runs; the stable sort merges them in linear time.
            self.sorted_latencies.sort();
        }
        &self.sorted_latencies
    }
}

/// Nearest-rank percentile over ascending samples: the element at
/// `ceil(p * n) - 1`, clamped to the sample range. `per_mille` is `p * 1000`.
/// An empty slice yields `Duration::ZERO`.
#[must_use]
pub fn percentile(sorted: &[Duration], per_mille: u64) -> Duration {
    let Some(last) = sorted.len().checked_sub(1) else {
        return Duration::ZERO;
    };
    let len = u128::try_from(sorted.len()).unwrap_or(u128::MAX);
    let scaled = u128::from(per_mille.min(PER_MILLE)).saturating_mul(len);
    let rank = scaled
        .saturating_add(u128::from(PER_MILLE.saturating_sub(1)))
        .checked_div(u128::from(PER_MILLE))
        .unwrap_or(0);
    let index = usize::try_from(rank.saturating_sub(1))
        .unwrap_or(last)
        .min(last);
    sorted.get(index).copied().unwrap_or_default()
}

fn rate_x100(count: u64, elapsed: Duration) -> u64 {
    let elapsed_nanos = elapsed.as_nanos();
    if elapsed_nanos == 0 {
        return 0;
    }
    let scaled = u128::from(count)
        .saturating_mul(RPS_SCALE)
        .saturating_mul(NANOS_PER_SEC)
        .saturating_add(elapsed_nanos.checked_div(2).unwrap_or(0));
    let value = scaled.checked_div(elapsed_nanos).unwrap_or(0);
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn duration_from_nanos(nanos: u128) -> Duration {
    let secs = nanos.checked_div(NANOS_PER_SEC).unwrap_or(0);
    let subsec = nanos.checked_rem(NANOS_PER_SEC).unwrap_or(0);
    Duration::new(
        u64::try_from(secs).unwrap_or(u64::MAX),
        u32::try_from(subsec).unwrap_or(0),
    )
}
