use std::time::Duration;

use crate::error::ValidationError;

use super::cli::LoadArgs;
use super::defaults::DEFAULT_OUTCOME_QUEUE_CAPACITY;
use super::types::{PositiveUsize, RequestRate};

/// Validated run configuration. Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub rate: RequestRate,
    pub address: String,
    pub headers: Vec<(String, String)>,
    pub auth_token: Option<String>,
    /// `None` runs until interrupted.
    pub run_duration: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_in_flight: Option<PositiveUsize>,
    pub outcome_queue_capacity: usize,
}

impl TryFrom<LoadArgs> for LoadConfig {
    type Error = ValidationError;

    fn try_from(args: LoadArgs) -> Result<Self, Self::Error> {
        let rate = args.rps.ok_or(ValidationError::MissingRate)?;
        let address = args.address.ok_or(ValidationError::MissingAddress)?;
        let address = address.trim();
        if address.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }

        Ok(Self {
            rate,
            address: address.to_owned(),
            headers: args.headers,
            auth_token: args.authentication.filter(|token| !token.is_empty()),
            run_duration: args.duration.filter(|duration| !duration.is_zero()),
            request_timeout: args.timeout,
            max_in_flight: args.max_in_flight,
            outcome_queue_capacity: DEFAULT_OUTCOME_QUEUE_CAPACITY,
        })
    }
}
