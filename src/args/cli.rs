use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_duration_arg, parse_header, parse_positive_usize, parse_rate, parse_timeout,
};
use super::types::{PositiveUsize, RequestRate};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fixed-rate HTTP GET load generator with live throughput, latency percentile, and error reporting."
)]
pub struct LoadArgs {
    /// Requests per second to issue (required, > 0, e.g. 50 or 0.5)
    #[arg(long, value_parser = parse_rate)]
    pub rps: Option<RequestRate>,

    /// Address to send GET requests to (required)
    #[arg(long)]
    pub address: Option<String>,

    /// Token sent as 'Authentication: bearer <token>'
    #[arg(long, env = "STEADYLOAD_AUTHENTICATION", hide_env_values = true)]
    pub authentication: Option<String>,

    /// HTTP headers in 'Name:Value' format (repeatable)
    #[arg(long = "headers", alias = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Total run time (e.g. 1h30m, 10s, 100ms); omitted or 0 runs until interrupted
    #[arg(long, value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Per-request timeout (e.g. 5s, 500ms); requests exceeding it count as 'timeout'
    #[arg(long, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Maximum requests in flight; admission pauses while the cap is reached
    #[arg(long = "max-in-flight", value_parser = parse_positive_usize)]
    pub max_in_flight: Option<PositiveUsize>,

    /// Path to config file (TOML or JSON). Defaults to ./steadyload.toml or ./steadyload.json
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (stderr)
    #[arg(long, short)]
    pub verbose: bool,
}
