//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod resolved;
mod types;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use cli::LoadArgs;
pub use resolved::LoadConfig;
pub use types::{PositiveUsize, RequestRate};

pub(crate) use defaults::{DEFAULT_OUTCOME_QUEUE_CAPACITY, DEFAULT_USER_AGENT};
pub(crate) use parsers::{parse_duration_arg, parse_header};
