use std::time::Duration;

use tokio::time::Instant;

use crate::args::RequestRate;

/// Scaled units per token: the rate is in millirequests/sec and elapsed time
/// in nanoseconds, so one token is 10^3 * 10^9 units.
const TOKEN_UNITS: u128 = 1_000_000_000_000;
/// Tokens the bucket may hold; a burst of one keeps admissions evenly spaced.
const BURST_TOKENS: u128 = 1;

/// Token bucket gating request launches. Never blocks.
#[derive(Debug)]
pub struct AdmissionController {
    millis_per_sec: u128,
    capacity: u128,
    tokens: u128,
    last_refill: Instant,
}

impl AdmissionController {
    #[must_use]
    pub fn new(rate: RequestRate) -> Self {
        Self::starting_at(rate, Instant::now())
    }

    /// Builds a full bucket whose refill clock starts at `now`.
    #[must_use]
    pub fn starting_at(rate: RequestRate, now: Instant) -> Self {
        let capacity = BURST_TOKENS.saturating_mul(TOKEN_UNITS);
        Self {
            millis_per_sec: u128::from(rate.millis_per_sec()),
            capacity,
            tokens: capacity,
            last_refill: now,
        }
    }

    /// Consumes a token if one is available right now.
    pub fn try_admit(&mut self) -> bool {
        self.try_admit_at(Instant::now())
    }

    pub fn try_admit_at(&mut self, now: Instant) -> bool {
        self.refill(now);
        if self.tokens >= TOKEN_UNITS {
            self.tokens = self.tokens.saturating_sub(TOKEN_UNITS);
            true
        } else {
            false
        }
    }

    /// Time from `now` until the next token becomes available.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Duration {
        let available = self.projected_tokens(now);
        if available >= TOKEN_UNITS {
            return Duration::ZERO;
        }
        let deficit = TOKEN_UNITS.saturating_sub(available);
        let nanos = deficit
            .saturating_add(self.millis_per_sec.saturating_sub(1))
            .checked_div(self.millis_per_sec)
            .unwrap_or(0);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    fn refill(&mut self, now: Instant) {
        if now <= self.last_refill {
            return;
        }
        self.tokens = self.projected_tokens(now);
        self.last_refill = now;
    }

    fn projected_tokens(&self, now: Instant) -> u128 {
        let elapsed_nanos = now.saturating_duration_since(self.last_refill).as_nanos();
        self.tokens
            .saturating_add(self.millis_per_sec.saturating_mul(elapsed_nanos))
            .min(self.capacity)
    }
}
